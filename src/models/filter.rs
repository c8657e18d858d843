//! Filter-bar state for the pipeline board.
//!
//! Two independent selectors, stage and value range, each with an `all`
//! option. Filters combine conjunctively.

use anyhow::{bail, Context, Result};
use regex::Regex;

use super::deal::{Deal, DealStage};

/// Stage selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageFilter {
    #[default]
    All,
    Only(DealStage),
}

impl StageFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        match self {
            StageFilter::All => true,
            StageFilter::Only(stage) => deal.stage == *stage,
        }
    }
}

impl std::fmt::Display for StageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageFilter::All => write!(f, "all"),
            StageFilter::Only(stage) => write!(f, "{stage}"),
        }
    }
}

impl std::str::FromStr for StageFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StageFilter::All);
        }
        Ok(StageFilter::Only(s.parse()?))
    }
}

/// Value-range selector: `all`, `<min>-<max>` (inclusive) or `<min>+`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ValueRange {
    #[default]
    All,
    Between { min: f64, max: f64 },
    AtLeast { min: f64 },
}

impl ValueRange {
    pub fn matches(&self, deal: &Deal) -> bool {
        match *self {
            ValueRange::All => true,
            ValueRange::Between { min, max } => deal.value >= min && deal.value <= max,
            ValueRange::AtLeast { min } => deal.value >= min,
        }
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueRange::All => write!(f, "all"),
            ValueRange::Between { min, max } => write!(f, "{min}-{max}"),
            ValueRange::AtLeast { min } => write!(f, "{min}+"),
        }
    }
}

impl std::str::FromStr for ValueRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ValueRange::All);
        }

        let re = Regex::new(r"^(\d+(?:\.\d+)?)(?:-(\d+(?:\.\d+)?)|(\+))$")
            .context("Failed to compile value range pattern")?;
        let Some(caps) = re.captures(s) else {
            bail!("Invalid value range: {s}. Use: all, <min>-<max> or <min>+");
        };

        let min: f64 = caps[1]
            .parse()
            .with_context(|| format!("Invalid minimum in value range: {s}"))?;

        match caps.get(2) {
            Some(max) => {
                let max: f64 = max
                    .as_str()
                    .parse()
                    .with_context(|| format!("Invalid maximum in value range: {s}"))?;
                if max < min {
                    bail!("Invalid value range: {s}. Minimum exceeds maximum");
                }
                Ok(ValueRange::Between { min, max })
            }
            None => Ok(ValueRange::AtLeast { min }),
        }
    }
}

/// Query shape for the board. Ephemeral; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub stage: StageFilter,
    pub value_range: ValueRange,
}

impl FilterState {
    pub fn new(stage: StageFilter, value_range: ValueRange) -> Self {
        Self { stage, value_range }
    }

    pub fn set_stage(&mut self, stage: StageFilter) {
        self.stage = stage;
    }

    pub fn set_value_range(&mut self, value_range: ValueRange) {
        self.value_range = value_range;
    }

    /// Reset both selectors to `all`.
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// Whether any selector differs from `all`; drives the clear affordance.
    pub fn has_active_filters(&self) -> bool {
        self.stage != StageFilter::All || self.value_range != ValueRange::All
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.stage.matches(deal) && self.value_range.matches(deal)
    }
}

/// Keep the deals satisfying every active filter, in input order.
pub fn apply_filters<'a>(deals: &'a [Deal], filters: &FilterState) -> Vec<&'a Deal> {
    deals.iter().filter(|deal| filters.matches(deal)).collect()
}

/// Deal-list search: case-insensitive title match combined with a stage filter.
pub fn search_deals<'a>(deals: &'a [Deal], term: &str, stage: StageFilter) -> Vec<&'a Deal> {
    let needle = term.trim().to_lowercase();
    deals
        .iter()
        .filter(|deal| needle.is_empty() || deal.title.to_lowercase().contains(&needle))
        .filter(|deal| stage.matches(deal))
        .collect()
}

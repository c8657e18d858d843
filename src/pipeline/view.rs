//! Derived, read-only views over a filtered deal list.

use crate::models::deal::{Deal, DealStage};

/// One board column: a stage, its deals and their summed value.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn<'a> {
    pub stage: DealStage,
    pub deals: Vec<&'a Deal>,
    pub total: f64,
}

impl StageColumn<'_> {
    pub fn count(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }
}

/// Group deals under every stage in display order.
///
/// All six stages are present even when empty, and each deal appears in
/// exactly one group, keeping its relative order.
pub fn group_by_stage<'a>(deals: &[&'a Deal]) -> Vec<(DealStage, Vec<&'a Deal>)> {
    DealStage::ALL
        .into_iter()
        .map(|stage| {
            let members = deals.iter().copied().filter(|d| d.stage == stage).collect();
            (stage, members)
        })
        .collect()
}

/// Sum of `value` over the deals in `stage`; zero when there are none.
pub fn stage_total(deals: &[&Deal], stage: DealStage) -> f64 {
    deals
        .iter()
        .filter(|d| d.stage == stage)
        .map(|d| d.value)
        .sum()
}

/// Board columns for an already-filtered deal list.
pub fn columns<'a>(deals: &[&'a Deal]) -> Vec<StageColumn<'a>> {
    group_by_stage(deals)
        .into_iter()
        .map(|(stage, members)| {
            let total = stage_total(&members, stage);
            StageColumn {
                stage,
                deals: members,
                total,
            }
        })
        .collect()
}

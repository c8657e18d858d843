//! Dashboard figures over the whole pipeline.

use crate::models::deal::{Deal, DealStage};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStats {
    pub total_deals: usize,
    pub total_value: f64,
    pub won_deals: usize,
    pub won_value: f64,
    /// Value still in play: every deal not yet won or lost.
    pub open_value: f64,
    /// Percentage of deals closed as won; zero for an empty pipeline.
    pub conversion_rate: f64,
    pub average_deal_size: f64,
    /// Deal count per stage in display order.
    pub by_stage: Vec<(DealStage, usize)>,
}

impl PipelineStats {
    pub fn compute(deals: &[Deal]) -> Self {
        let total_deals = deals.len();
        let total_value: f64 = deals.iter().map(|d| d.value).sum();
        let won: Vec<&Deal> = deals
            .iter()
            .filter(|d| d.stage == DealStage::ClosedWon)
            .collect();
        let won_value = won.iter().map(|d| d.value).sum();
        let open_value = deals
            .iter()
            .filter(|d| !d.stage.is_closed())
            .map(|d| d.value)
            .sum();

        let (conversion_rate, average_deal_size) = if total_deals == 0 {
            (0.0, 0.0)
        } else {
            (
                won.len() as f64 / total_deals as f64 * 100.0,
                total_value / total_deals as f64,
            )
        };

        let by_stage = DealStage::ALL
            .into_iter()
            .map(|stage| (stage, deals.iter().filter(|d| d.stage == stage).count()))
            .collect();

        Self {
            total_deals,
            total_value,
            won_deals: won.len(),
            won_value,
            open_value,
            conversion_rate,
            average_deal_size,
            by_stage,
        }
    }

    /// Share of all deals sitting in `stage`, as a percentage.
    pub fn stage_share(&self, stage: DealStage) -> f64 {
        if self.total_deals == 0 {
            return 0.0;
        }
        let count = self
            .by_stage
            .iter()
            .find(|(s, _)| *s == stage)
            .map_or(0, |(_, n)| *n);
        count as f64 / self.total_deals as f64 * 100.0
    }
}

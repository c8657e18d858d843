use super::types::DealStage;

impl DealStage {
    /// Check whether a deal in this stage may be moved to `target`.
    ///
    /// Every stage is reachable from every other in one move, including
    /// moving a closed deal back into an open stage. Moving to the current
    /// stage is a no-op and also allowed.
    pub fn can_transition_to(&self, _target: &DealStage) -> bool {
        true
    }

    /// Whether the stage closes the deal, won or lost.
    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }
}

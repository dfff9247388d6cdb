//! LoopHorizon: proposes a reset when the judge keeps repeating itself

use tracing::info;

use crate::core::content::rotate;
use crate::types::{HorizonProposal, ObserverData, ResetProposal};

#[derive(Debug, Default)]
pub struct LoopHorizon {
    reset_count: u64,
}

impl LoopHorizon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persona repetition or stagnation means a loop
    pub fn detect_loop(&self, data: &ObserverData) -> bool {
        data.signature_repetition || data.loop_stagnation
    }

    pub fn propose_reset(&mut self) -> HorizonProposal {
        self.reset_count += 1;
        let proposal = rotate(&ResetProposal::CYCLE, self.reset_count);
        info!("LoopHorizon proposed reset: {:?} ({})", proposal, self.reset_count);
        HorizonProposal {
            proposal,
            reset_count: self.reset_count,
        }
    }

    pub fn reset_count(&self) -> u64 {
        self.reset_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_loop() {
        let horizon = LoopHorizon::new();
        assert!(!horizon.detect_loop(&ObserverData::default()));
        assert!(horizon.detect_loop(&ObserverData { loop_stagnation: true, ..Default::default() }));
        assert!(horizon.detect_loop(&ObserverData { signature_repetition: true, ..Default::default() }));
    }

    #[test]
    fn test_proposals_cycle() {
        let mut horizon = LoopHorizon::new();
        let first = horizon.propose_reset();
        assert_eq!(first.proposal, ResetProposal::ApproachShift);
        assert_eq!(first.reset_count, 1);
        for _ in 0..3 {
            horizon.propose_reset();
        }
        assert_eq!(horizon.propose_reset().proposal, ResetProposal::ApproachShift);
        assert_eq!(horizon.reset_count(), 5);
    }
}

//! DriftAnchor: stabilizes failed, emotional judgments into drift capsules

use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{AnchorOutcome, DriftCapsule, JudgmentResult, RingBuffer};
use crate::{DEFAULT_DRIFT_CAPSULE_CAPACITY, DRIFT_AMPLITUDE_THRESHOLD};

#[derive(Debug)]
pub struct DriftAnchor {
    capsules: RingBuffer<DriftCapsule>,
    stabilization_count: u64,
}

impl Default for DriftAnchor {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_CAPSULE_CAPACITY)
    }
}

impl DriftAnchor {
    pub fn new(capacity: usize) -> Self {
        Self {
            capsules: RingBuffer::new(capacity),
            stabilization_count: 0,
        }
    }

    /// Failed, emotion tagged, amplitude above 0.5
    pub fn detect_drift(&self, result: &JudgmentResult) -> bool {
        result.failed && result.emotion.is_some() && result.amplitude > DRIFT_AMPLITUDE_THRESHOLD
    }

    /// Store a capsule for a drifting result
    pub fn stabilize(&mut self, result: &JudgmentResult) -> AnchorOutcome {
        if !self.detect_drift(result) {
            return AnchorOutcome::NoDriftDetected;
        }

        self.capsules.push(DriftCapsule {
            timestamp: Utc::now(),
            emotion: result.emotion.clone(),
            amplitude: result.amplitude,
            persona: result.persona.clone(),
        });
        self.stabilization_count += 1;

        info!("DriftAnchor stabilized drift capsule: {}", self.stabilization_count);

        AnchorOutcome::Stabilized {
            capsule_id: self.stabilization_count,
            emotion: result.emotion.clone(),
        }
    }

    /// Drop capsules older than `max_age`; returns how many were removed
    pub fn purge_older_than(&mut self, max_age: Duration) -> usize {
        // Ages beyond chrono's range keep everything
        let Some(cutoff) = ChronoDuration::from_std(max_age)
            .ok()
            .and_then(|age| Utc::now().checked_sub_signed(age))
        else {
            return 0;
        };
        let before = self.capsules.len();
        self.capsules.retain(|c| c.timestamp > cutoff);
        let removed = before - self.capsules.len();
        debug!("DriftAnchor purged {} capsules", removed);
        removed
    }

    pub fn capsules(&self) -> impl Iterator<Item = &DriftCapsule> {
        self.capsules.iter()
    }

    pub fn stabilization_count(&self) -> u64 {
        self.stabilization_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drifting() -> JudgmentResult {
        JudgmentResult::failure("Selene")
            .with_emotion("sorrow")
            .with_amplitude(0.9)
    }

    #[test]
    fn test_detect_requires_all_three() {
        let anchor = DriftAnchor::default();
        assert!(anchor.detect_drift(&drifting()));
        assert!(!anchor.detect_drift(&drifting().with_failed(false)));
        assert!(!anchor.detect_drift(&drifting().with_amplitude(0.5)));
        assert!(!anchor.detect_drift(&JudgmentResult::failure("Selene").with_amplitude(0.9)));
    }

    #[test]
    fn test_stabilize_records_capsule() {
        let mut anchor = DriftAnchor::default();
        let outcome = anchor.stabilize(&drifting());
        assert_eq!(
            outcome,
            AnchorOutcome::Stabilized { capsule_id: 1, emotion: Some("sorrow".into()) }
        );
        assert_eq!(anchor.capsules().count(), 1);
        assert_eq!(anchor.stabilize(&JudgmentResult::new("ok", "A")), AnchorOutcome::NoDriftDetected);
        assert_eq!(anchor.stabilization_count(), 1);
    }

    #[test]
    fn test_purge() {
        let mut anchor = DriftAnchor::default();
        anchor.stabilize(&drifting());
        anchor.stabilize(&drifting());
        assert_eq!(anchor.purge_older_than(Duration::from_secs(3600)), 0);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(anchor.purge_older_than(Duration::from_millis(5)), 2);
        assert_eq!(anchor.capsules().count(), 0);
    }
}

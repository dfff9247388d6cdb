//! MetaSupervisor: the five observers and their aggregator
//!
//! Trigger order per pass (later wins the meta state):
//! - Reflector  → REFLECTING
//! - Silencer   → SILENCING
//! - Drift      → ANCHORING
//! - Loop       → HORIZON_WARNING
//! - score ≥ threshold → LIMINAL_READY
//!
//! liminal_score = 0.4·reflector + 0.25·silencer + 0.2·loop + 0.15·drift
//!               + min(amplitude·0.3, 0.3), clamped to 0.0-1.0

use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::{MetaRingConfig, TransitionThresholds};
use crate::core::{DriftAnchor, LoopHorizon, ObserverZero, Reflector, SilencerVeil};
use crate::types::{
    FinalAction, JudgmentResult, LiminalReadiness, MetaActions, MetaEvaluation, MetaLogEntry,
    MetaState, MetaStatus, RingBuffer,
};
use crate::{
    AMPLITUDE_BONUS_CAP, AMPLITUDE_BONUS_FACTOR, LIMINAL_WEIGHT_DRIFT, LIMINAL_WEIGHT_LOOP,
    LIMINAL_WEIGHT_REFLECTOR, LIMINAL_WEIGHT_SILENCER,
};

/// Trigger flags of one pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriggerFlags {
    pub reflector: bool,
    pub silencer: bool,
    pub drift: bool,
    pub loop_detected: bool,
}

/// Weighted transition score, clamped to 0.0-1.0
pub fn liminal_score(flags: TriggerFlags, amplitude: f64) -> f64 {
    let mut score = 0.0;
    if flags.reflector {
        score += LIMINAL_WEIGHT_REFLECTOR;
    }
    if flags.silencer {
        score += LIMINAL_WEIGHT_SILENCER;
    }
    if flags.loop_detected {
        score += LIMINAL_WEIGHT_LOOP;
    }
    if flags.drift {
        score += LIMINAL_WEIGHT_DRIFT;
    }

    let amplitude = if amplitude.is_nan() { 0.0 } else { amplitude.max(0.0) };
    score += (amplitude * AMPLITUDE_BONUS_FACTOR).min(AMPLITUDE_BONUS_CAP);

    score.clamp(0.0, 1.0)
}

/// Meta ring of five non-judging observers
#[derive(Debug)]
pub struct MetaSupervisor {
    reflector: Reflector,
    observer: ObserverZero,
    silencer: SilencerVeil,
    anchor: DriftAnchor,
    horizon: LoopHorizon,
    state: MetaState,
    liminal_threshold: f64,
    meta_log: RingBuffer<MetaLogEntry>,
}

impl Default for MetaSupervisor {
    fn default() -> Self {
        Self::new(&MetaRingConfig::default(), &TransitionThresholds::default())
    }
}

impl MetaSupervisor {
    pub fn new(ring: &MetaRingConfig, thresholds: &TransitionThresholds) -> Self {
        Self {
            reflector: Reflector::new(),
            observer: ObserverZero::new(
                ring.observation_max_entries,
                thresholds.repetition_limit,
                thresholds.failure_count,
            ),
            silencer: SilencerVeil::new(ring.silence_threshold),
            anchor: DriftAnchor::new(ring.drift_capsule_max_entries),
            horizon: LoopHorizon::new(),
            state: MetaState::Observing,
            liminal_threshold: ring.liminal_threshold,
            meta_log: RingBuffer::new(ring.log_max_entries),
        }
    }

    /// Before the judgment runs
    pub fn pre_monitor(&mut self, input: &str) {
        self.observer.watch(input);
        self.state = MetaState::Observing;
    }

    /// After the judgment ran: evaluate triggers, produce actions, log
    pub fn post_monitor(&mut self, input: &str, result: &JudgmentResult) -> MetaEvaluation {
        let observer_data = self.observer.analyze(result);

        let flags = TriggerFlags {
            reflector: self.reflector.should_activate(result),
            silencer: self.silencer.should_silence(input, Some(result.amplitude)),
            drift: self.anchor.detect_drift(result),
            loop_detected: self.horizon.detect_loop(&observer_data),
        };

        let mut actions = MetaActions::default();
        let mut final_action = FinalAction::NormalJudgment;

        if flags.reflector {
            self.state = MetaState::Reflecting;
            actions.reflection = Some(self.reflector.reflect(input, result));
            final_action = FinalAction::ReflectionApplied;
        }
        if flags.silencer {
            self.state = MetaState::Silencing;
            actions.silence = Some(self.silencer.enforce_silence());
            final_action = FinalAction::SilenceEnforced;
        }
        if flags.drift {
            self.state = MetaState::Anchoring;
            actions.anchor = Some(self.anchor.stabilize(result));
        }
        if flags.loop_detected {
            self.state = MetaState::HorizonWarning;
            actions.horizon = Some(self.horizon.propose_reset());
        }

        let score = liminal_score(flags, result.amplitude);
        debug!(
            "MetaRing liminal_score: {:.3} (reflector={}, amplitude={})",
            score, flags.reflector, result.amplitude
        );

        if score >= self.liminal_threshold {
            self.state = MetaState::LiminalReady;
            actions.liminal = Some(LiminalReadiness { ready: true, score });
            final_action = FinalAction::LiminalReady;
        }

        self.meta_log.push(MetaLogEntry {
            timestamp: Utc::now(),
            input_text: input.to_string(),
            emotion_amplitude: result.amplitude,
            observer_triggered: true,
            reflector_triggered: flags.reflector,
            silencer_triggered: flags.silencer,
            drift_anchor_engaged: flags.drift,
            loop_horizon_warning: flags.loop_detected,
            final_action,
            meta_state: self.state,
        });

        MetaEvaluation {
            meta_state: self.state,
            actions,
            liminal_score: score,
            observer_data,
        }
    }

    pub fn state(&self) -> MetaState {
        self.state
    }

    pub fn status(&self) -> MetaStatus {
        MetaStatus {
            current_state: self.state,
            reflector_activations: self.reflector.activation_count(),
            silence_enforcements: self.silencer.silence_count(),
            drift_stabilizations: self.anchor.stabilization_count(),
            loop_resets: self.horizon.reset_count(),
            total_observations: self.observer.total_observations(),
            recent_logs: self.meta_log.len(),
        }
    }

    /// Meta log, oldest first
    pub fn meta_log(&self) -> impl Iterator<Item = &MetaLogEntry> {
        self.meta_log.iter()
    }

    pub fn persona_usage(&self) -> &HashMap<String, u64> {
        self.observer.persona_usage()
    }

    pub fn purge_drift_capsules(&mut self, max_age: Duration) -> usize {
        self.anchor.purge_older_than(max_age)
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn observer(&self) -> &ObserverZero {
        &self.observer
    }

    pub fn silencer(&self) -> &SilencerVeil {
        &self.silencer
    }

    pub fn anchor(&self) -> &DriftAnchor {
        &self.anchor
    }

    pub fn horizon(&self) -> &LoopHorizon {
        &self.horizon
    }
}

// =============================================================================
// TESTS
// =============================================================================

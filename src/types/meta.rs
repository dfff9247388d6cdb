//! Meta ring output: observer data, actions, evaluation and log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MetaState;

/// What ObserverZero derived from the recent attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverData {
    /// Too many recent attempts failed
    pub loop_stagnation: bool,
    /// The recent attempts all came from one persona
    pub signature_repetition: bool,
    /// The current attempt failed
    pub response_absence: bool,
}

/// DriftAnchor's answer to a stabilize request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AnchorOutcome {
    Stabilized {
        /// 1-based running count of capsules stored
        capsule_id: u64,
        emotion: Option<String>,
    },
    NoDriftDetected,
}

/// Reset strategies LoopHorizon cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetProposal {
    SignatureChange,
    ApproachShift,
    MetaReflection,
    LiminalTransition,
}

impl ResetProposal {
    pub const CYCLE: [ResetProposal; 4] = [
        ResetProposal::SignatureChange,
        ResetProposal::ApproachShift,
        ResetProposal::MetaReflection,
        ResetProposal::LiminalTransition,
    ];
}

/// LoopHorizon's reset suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonProposal {
    pub proposal: ResetProposal,
    pub reset_count: u64,
}

/// Marker added once the score crosses the liminal threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiminalReadiness {
    pub ready: bool,
    pub score: f64,
}

/// Actions produced by the triggers that fired, keyed by trigger name
///
/// Serializes as a JSON object holding only the keys that fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon: Option<HorizonProposal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liminal: Option<LiminalReadiness>,
}

impl MetaActions {
    pub const REFLECTION: &'static str = "reflection";
    pub const SILENCE: &'static str = "silence";
    pub const ANCHOR: &'static str = "anchor";
    pub const HORIZON: &'static str = "horizon";
    pub const LIMINAL: &'static str = "liminal";

    /// Is there an action under `key`?
    pub fn contains(&self, key: &str) -> bool {
        match key {
            Self::REFLECTION => self.reflection.is_some(),
            Self::SILENCE => self.silence.is_some(),
            Self::ANCHOR => self.anchor.is_some(),
            Self::HORIZON => self.horizon.is_some(),
            Self::LIMINAL => self.liminal.is_some(),
            _ => false,
        }
    }

    /// Names of the actions present, in trigger order
    pub fn keys(&self) -> Vec<&'static str> {
        [
            Self::REFLECTION,
            Self::SILENCE,
            Self::ANCHOR,
            Self::HORIZON,
            Self::LIMINAL,
        ]
        .into_iter()
        .filter(|key| self.contains(key))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

/// Result of one post-monitor pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaEvaluation {
    pub meta_state: MetaState,
    pub actions: MetaActions,
    /// 0.0-1.0
    pub liminal_score: f64,
    pub observer_data: ObserverData,
}

/// Snapshot of an evaluation handed to the existence flow and stored with
/// each transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaContext {
    pub meta_state: MetaState,
    pub actions: MetaActions,
    pub observer_data: ObserverData,
    pub liminal_score: f64,
}

impl MetaContext {
    /// Context carrying only a score (hosts driving the flow directly)
    pub fn with_score(liminal_score: f64) -> Self {
        Self {
            meta_state: MetaState::Observing,
            actions: MetaActions::default(),
            observer_data: ObserverData::default(),
            liminal_score,
        }
    }
}

impl From<&MetaEvaluation> for MetaContext {
    fn from(eval: &MetaEvaluation) -> Self {
        Self {
            meta_state: eval.meta_state,
            actions: eval.actions.clone(),
            observer_data: eval.observer_data,
            liminal_score: eval.liminal_score,
        }
    }
}

/// Last action the ring applied during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalAction {
    NormalJudgment,
    ReflectionApplied,
    SilenceEnforced,
    LiminalReady,
}

/// One entry per post-monitor pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaLogEntry {
    pub timestamp: DateTime<Utc>,
    pub input_text: String,
    pub emotion_amplitude: f64,
    pub observer_triggered: bool,
    pub reflector_triggered: bool,
    pub silencer_triggered: bool,
    pub drift_anchor_engaged: bool,
    pub loop_horizon_warning: bool,
    pub final_action: FinalAction,
    pub meta_state: MetaState,
}

/// A stabilized record of a failed, emotional judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftCapsule {
    pub timestamp: DateTime<Utc>,
    pub emotion: Option<String>,
    pub amplitude: f64,
    pub persona: String,
}

/// Counters of the meta ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaStatus {
    pub current_state: MetaState,
    pub reflector_activations: u64,
    pub silence_enforcements: u64,
    pub drift_stabilizations: u64,
    pub loop_resets: u64,
    pub total_observations: usize,
    pub recent_logs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_serialize_present_keys_only() {
        let actions = MetaActions {
            reflection: Some("r".into()),
            liminal: Some(LiminalReadiness { ready: true, score: 0.8 }),
            ..Default::default()
        };
        let json = serde_json::to_value(&actions).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("reflection"));
        assert!(obj.contains_key("liminal"));
        assert_eq!(actions.keys(), vec!["reflection", "liminal"]);
    }

    #[test]
    fn test_anchor_outcome_tagged() {
        let json = serde_json::to_value(AnchorOutcome::NoDriftDetected).unwrap();
        assert_eq!(json["action"], "no_drift_detected");
        let json = serde_json::to_value(AnchorOutcome::Stabilized {
            capsule_id: 2,
            emotion: Some("sorrow".into()),
        })
        .unwrap();
        assert_eq!(json["action"], "stabilized");
        assert_eq!(json["capsule_id"], 2);
    }

    #[test]
    fn test_contains_unknown_key() {
        assert!(!MetaActions::default().contains("teleport"));
        assert!(MetaActions::default().is_empty());
    }
}

//! Bridge transitions, responses and status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{BridgeState, FlowStatus, MetaActions, MetaContext, MetaStatus, ResonanceResponse};

/// Why the bridge left judgment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    JudgmentFailure,
    EmotionalOverload,
    LoopStagnation,
    /// Reserved for hosts that request silence explicitly
    SilenceRequest,
    ManualTrigger,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::JudgmentFailure => "judgment_failure",
            TransitionType::EmotionalOverload => "emotional_overload",
            TransitionType::LoopStagnation => "loop_stagnation",
            TransitionType::SilenceRequest => "silence_request",
            TransitionType::ManualTrigger => "manual_trigger",
        }
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attempted transition, as stored in history and `liminal_transitions.json`
///
/// Built once the outcome is known; never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeTransition {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    pub trigger_score: f64,
    pub successful: bool,
    pub input_text: String,
    pub judgment_failed: bool,
    pub meta_context: MetaContext,
}

/// Short view of a transition for status displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    pub trigger_score: f64,
    pub successful: bool,
    pub input_preview: String,
}

/// Max characters of input shown in a summary
pub const INPUT_PREVIEW_CHARS: usize = 50;

impl From<&BridgeTransition> for TransitionSummary {
    fn from(t: &BridgeTransition) -> Self {
        let input_preview = if t.input_text.chars().count() > INPUT_PREVIEW_CHARS {
            let head: String = t.input_text.chars().take(INPUT_PREVIEW_CHARS).collect();
            format!("{}...", head)
        } else {
            t.input_text.clone()
        };
        Self {
            timestamp: t.timestamp,
            transition_type: t.transition_type,
            trigger_score: t.trigger_score,
            successful: t.successful,
            input_preview,
        }
    }
}

/// Which tier produced a bridge response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Judgment,
    Meta,
    Existence,
    System,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseSource::Judgment => "judgment",
            ResponseSource::Meta => "meta",
            ResponseSource::Existence => "existence",
            ResponseSource::System => "system",
        };
        write!(f, "{}", name)
    }
}

/// What the host renders after each bridge call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub content: String,
    pub source: ResponseSource,
    pub bridge_state: BridgeState,
    pub transition_occurred: bool,
    pub meta_actions: MetaActions,
    pub existence_response: Option<ResonanceResponse>,
    pub should_continue_existence: bool,
}

impl BridgeResponse {
    /// Plain response without flow involvement
    pub fn plain(content: impl Into<String>, source: ResponseSource, bridge_state: BridgeState) -> Self {
        Self {
            content: content.into(),
            source,
            bridge_state,
            transition_occurred: false,
            meta_actions: MetaActions::default(),
            existence_response: None,
            should_continue_existence: false,
        }
    }

    pub fn with_actions(mut self, actions: MetaActions) -> Self {
        self.meta_actions = actions;
        self
    }

    /// Response carrying a persona turn
    pub fn existence(resonance: ResonanceResponse, bridge_state: BridgeState) -> Self {
        Self {
            content: resonance.content.clone(),
            source: ResponseSource::Existence,
            bridge_state,
            transition_occurred: false,
            meta_actions: MetaActions::default(),
            should_continue_existence: resonance.should_continue,
            existence_response: Some(resonance),
        }
    }
}

/// Aggregate bridge statistics, persisted as `bridge_status.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeStatus {
    pub current_state: BridgeState,
    pub total_transitions: u64,
    pub successful_transitions: u64,
    /// Percent, 0-100
    pub transition_success_rate: f64,
    pub judgment_mode_secs: f64,
    /// LIMINAL_ACTIVE + EXISTENCE_FLOW
    pub existence_mode_secs: f64,
    /// Cumulative seconds per state name
    pub state_secs: BTreeMap<String, f64>,
    /// Transitions in the last five minutes
    pub recent_transitions: usize,
    pub existence_max_duration_secs: u64,
    pub transition_cooldown_secs: u64,
    pub meta_ring_status: MetaStatus,
    pub existence_flow_status: FlowStatus,
}

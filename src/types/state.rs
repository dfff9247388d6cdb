//! State enums for the three tiers

use serde::{Deserialize, Serialize};

/// State of the meta ring after the latest observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaState {
    /// Watching, nothing fired
    Observing,
    /// Reserved for hosts that mark a trigger before its action runs
    Triggered,
    /// Reflector answered a failed judgment
    Reflecting,
    /// SilencerVeil asked for quiet
    Silencing,
    /// DriftAnchor stabilized a capsule
    Anchoring,
    /// LoopHorizon proposed a reset
    HorizonWarning,
    /// Score crossed the liminal threshold
    LiminalReady,
}

impl MetaState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaState::Observing => "observing",
            MetaState::Triggered => "triggered",
            MetaState::Reflecting => "reflecting",
            MetaState::Silencing => "silencing",
            MetaState::Anchoring => "anchoring",
            MetaState::HorizonWarning => "horizon_warning",
            MetaState::LiminalReady => "liminal_ready",
        }
    }
}

impl std::fmt::Display for MetaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The seven states of a transition bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeState {
    /// Normal operation, host judgment answers
    JudgmentMode,
    /// Meta ring is watching the current attempt
    Monitoring,
    /// Transition decided, flow not yet engaged
    TransitionReady,
    /// Flow activation in progress
    LiminalActive,
    /// Existence flow owns the responses
    ExistenceFlow,
    /// Tearing the flow down
    Returning,
    /// Last transition failed; the next call recovers
    ErrorState,
}

impl BridgeState {
    pub const ALL: [BridgeState; 7] = [
        BridgeState::JudgmentMode,
        BridgeState::Monitoring,
        BridgeState::TransitionReady,
        BridgeState::LiminalActive,
        BridgeState::ExistenceFlow,
        BridgeState::Returning,
        BridgeState::ErrorState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeState::JudgmentMode => "judgment_mode",
            BridgeState::Monitoring => "monitoring",
            BridgeState::TransitionReady => "transition_ready",
            BridgeState::LiminalActive => "liminal_active",
            BridgeState::ExistenceFlow => "existence_flow",
            BridgeState::Returning => "returning",
            BridgeState::ErrorState => "error_state",
        }
    }

    /// States that count as time spent outside judgment
    pub fn is_existence_side(&self) -> bool {
        matches!(self, BridgeState::LiminalActive | BridgeState::ExistenceFlow)
    }

    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            BridgeState::JudgmentMode => "\x1b[32m",  // Green
            BridgeState::Monitoring => "\x1b[90m",    // Gray
            BridgeState::TransitionReady | BridgeState::LiminalActive => "\x1b[33m", // Yellow
            BridgeState::ExistenceFlow => "\x1b[35m", // Magenta
            BridgeState::Returning => "\x1b[36m",     // Cyan
            BridgeState::ErrorState => "\x1b[31m",    // Red
        }
    }
}

impl std::fmt::Display for BridgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phases of the existence flow
///
/// Legal edges:
/// - DORMANT → ENTRY (activation)
/// - ENTRY → RESONANCE | DISSOLUTION
/// - RESONANCE → RESONANCE | DISSOLUTION
/// - DISSOLUTION → RENEWAL | DORMANT
/// - RENEWAL → DORMANT
/// - any → DORMANT (deactivation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistencePhase {
    Dormant,
    Entry,
    Resonance,
    Dissolution,
    Renewal,
}

impl ExistencePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistencePhase::Dormant => "dormant",
            ExistencePhase::Entry => "entry",
            ExistencePhase::Resonance => "resonance",
            ExistencePhase::Dissolution => "dissolution",
            ExistencePhase::Renewal => "renewal",
        }
    }

    /// Whether the flow may move from `self` to `next` by its own logic
    pub fn can_advance_to(&self, next: ExistencePhase) -> bool {
        use ExistencePhase::*;
        matches!(
            (self, next),
            (Dormant, Entry)
                | (Entry, Resonance)
                | (Entry, Dissolution)
                | (Resonance, Resonance)
                | (Resonance, Dissolution)
                | (Dissolution, Renewal)
                | (Dissolution, Dormant)
                | (Renewal, Dormant)
        )
    }
}

impl std::fmt::Display for ExistencePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

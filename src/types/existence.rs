//! Existence flow data: personas, emotions, state and resonance responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::ExistencePhase;

/// Who spoke a resonance response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    /// Boundary keeper, first voice on entry
    Warden,
    /// Emotional resonator
    Selene,
    /// Dissolution and renewal
    Mirrorless,
    /// The flow itself (dormant / error notices)
    System,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Warden => "Warden",
            Persona::Selene => "Selene",
            Persona::Mirrorless => "Mirrorless",
            Persona::System => "System",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emotion categories the flow resonates with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionResonance {
    Grief,
    Confusion,
    Emptiness,
    Longing,
    Acceptance,
    Silence,
}

impl EmotionResonance {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionResonance::Grief => "grief",
            EmotionResonance::Confusion => "confusion",
            EmotionResonance::Emptiness => "emptiness",
            EmotionResonance::Longing => "longing",
            EmotionResonance::Acceptance => "acceptance",
            EmotionResonance::Silence => "silence",
        }
    }
}

impl std::fmt::Display for EmotionResonance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the flow currently stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistenceState {
    pub phase: ExistencePhase,
    /// Persona expected to speak next
    pub entity: Persona,
    pub emotion: Option<EmotionResonance>,
    /// 0.0-1.0
    pub depth: f64,
    /// When the flow was (re)entered
    pub timestamp: DateTime<Utc>,
    /// Time since `timestamp` as of the last turn
    pub duration: Duration,
}

impl ExistenceState {
    pub fn dormant() -> Self {
        Self {
            phase: ExistencePhase::Dormant,
            entity: Persona::System,
            emotion: None,
            depth: 0.0,
            timestamp: Utc::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn entry() -> Self {
        Self {
            phase: ExistencePhase::Entry,
            entity: Persona::Warden,
            ..Self::dormant()
        }
    }
}

/// One turn of output from a persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceResponse {
    pub content: String,
    pub entity: Persona,
    /// Phase that produced this response
    pub phase: ExistencePhase,
    pub emotion: Option<EmotionResonance>,
    pub next_entity: Option<Persona>,
    pub should_continue: bool,
    /// 0.0-1.0
    pub depth: f64,
}

impl ResonanceResponse {
    /// Terminal notice spoken by the flow itself
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            entity: Persona::System,
            phase: ExistencePhase::Dormant,
            emotion: None,
            next_entity: None,
            should_continue: false,
            depth: 0.0,
        }
    }
}

/// Counters and position of an existence flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStatus {
    pub active: bool,
    pub current_phase: ExistencePhase,
    pub current_entity: Persona,
    pub session_length: usize,
    pub warden_entries: u64,
    pub selene_resonances: u64,
    pub mirrorless_dissolutions: u64,
    pub renewal_cycles: u64,
}

//! Result of one host judgment attempt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persona id used for results the bridge fabricates itself
pub const SYSTEM_PERSONA: &str = "System";

/// One judgment attempt as reported by the host provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentResult {
    /// Response text (may be empty)
    pub content: String,
    /// Persona / signature that produced the response
    pub persona: String,
    /// Emotion tag, if the host inferred one
    pub emotion: Option<String>,
    /// Emotional amplitude, 0.0-1.0
    pub amplitude: f64,
    /// Did the judgment fail?
    pub failed: bool,
    /// When the attempt finished
    pub timestamp: DateTime<Utc>,
}

impl JudgmentResult {
    /// Successful judgment with zero amplitude
    pub fn new(content: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            persona: persona.into(),
            emotion: None,
            amplitude: 0.0,
            failed: false,
            timestamp: Utc::now(),
        }
    }

    /// Failed judgment with empty content
    pub fn failure(persona: impl Into<String>) -> Self {
        Self {
            failed: true,
            ..Self::new("", persona)
        }
    }

    /// What the bridge substitutes when the provider errors or panics
    pub fn system_failure() -> Self {
        Self::failure(SYSTEM_PERSONA)
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    /// Set amplitude, clamped to 0.0-1.0 (NaN becomes 0.0)
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = if amplitude.is_nan() {
            0.0
        } else {
            amplitude.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    /// Content missing or whitespace only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

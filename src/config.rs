//! Liminal configuration
//!
//! Every section carries defaults, so a missing file, a missing section or a
//! missing key never fails. Loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::{
    DEFAULT_DRIFT_CAPSULE_CAPACITY, DEFAULT_EXISTENCE_MAX_DURATION_SECS, DEFAULT_FAILURE_COUNT,
    DEFAULT_LIMINAL_THRESHOLD, DEFAULT_META_LOG_CAPACITY, DEFAULT_OBSERVATION_CAPACITY,
    DEFAULT_REPETITION_LIMIT, DEFAULT_SESSION_LOG_CAPACITY, DEFAULT_SILENCE_THRESHOLD,
    DEFAULT_TRANSITION_COOLDOWN_SECS,
};

/// Top-level configuration for one bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiminalConfig {
    /// Bridge-level transition thresholds.
    pub transition_thresholds: TransitionThresholds,
    /// Meta ring (observer) parameters.
    pub meta_ring_config: MetaRingConfig,
    /// Existence flow timing.
    pub bridge_timeouts: BridgeTimeouts,
    /// Audit persistence.
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionThresholds {
    /// Liminal score at which the bridge leaves judgment mode.
    pub liminal_score: f64,
    /// Declared overload amplitude. Carried for hosts; the silencer uses
    /// `meta_ring_config.silence_threshold`.
    pub emotional_amplitude: f64,
    /// Failures among the recent window that count as loop stagnation.
    pub failure_count: usize,
    /// Size of the recent window ObserverZero checks for stagnation and
    /// persona repetition.
    pub repetition_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaRingConfig {
    pub silence_threshold: f64,
    /// Carried for hosts; the observer window is
    /// `transition_thresholds.repetition_limit`.
    pub max_signature_repeat: usize,
    /// Score at which the ring reports LIMINAL_READY.
    pub liminal_threshold: f64,
    pub log_max_entries: usize,
    pub observation_max_entries: usize,
    pub drift_capsule_max_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeTimeouts {
    /// Seconds an existence flow may stay active before a forced return.
    pub existence_max_duration: u64,
    /// Seconds between transitions. Reported, not enforced.
    pub transition_cooldown: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// When set, the bridge flushes its audit trail here on drop.
    pub log_dir: Option<PathBuf>,
    pub session_log_max_entries: usize,
}

// ============================================================
// Defaults
// ============================================================

impl Default for TransitionThresholds {
    fn default() -> Self {
        Self {
            liminal_score: DEFAULT_LIMINAL_THRESHOLD,
            emotional_amplitude: DEFAULT_SILENCE_THRESHOLD,
            failure_count: DEFAULT_FAILURE_COUNT,
            repetition_limit: DEFAULT_REPETITION_LIMIT,
        }
    }
}

impl Default for MetaRingConfig {
    fn default() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            max_signature_repeat: DEFAULT_REPETITION_LIMIT,
            liminal_threshold: DEFAULT_LIMINAL_THRESHOLD,
            log_max_entries: DEFAULT_META_LOG_CAPACITY,
            observation_max_entries: DEFAULT_OBSERVATION_CAPACITY,
            drift_capsule_max_entries: DEFAULT_DRIFT_CAPSULE_CAPACITY,
        }
    }
}

impl Default for BridgeTimeouts {
    fn default() -> Self {
        Self {
            existence_max_duration: DEFAULT_EXISTENCE_MAX_DURATION_SECS,
            transition_cooldown: DEFAULT_TRANSITION_COOLDOWN_SECS,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            session_log_max_entries: DEFAULT_SESSION_LOG_CAPACITY,
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl LiminalConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse TOML text. Missing sections and keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Render the config as TOML (used by `--dump-config`).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl BridgeTimeouts {
    pub fn existence_max(&self) -> Duration {
        Duration::from_secs(self.existence_max_duration)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.transition_cooldown)
    }
}

//! Error types for Liminal
//!
//! None of these reach the caller of `TransitionBridge::process_judgment`;
//! the bridge recovers from each one locally.

use std::time::Duration;
use thiserror::Error;

use crate::types::ExistencePhase;

/// Failure of the host judgment provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JudgeError {
    #[error("judgment provider failed: {0}")]
    Failed(String),

    #[error("judgment provider timed out after {0:?}")]
    TimedOut(Duration),

    #[error("judgment provider panicked: {0}")]
    Panicked(String),
}

impl JudgeError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Existence flow refused to activate or advance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("liminal score {score:.3} below entry threshold {threshold:.3}")]
    BelowEntryThreshold { score: f64, threshold: f64 },

    #[error("invalid phase transition: {from} -> {to}")]
    InvalidPhaseTransition {
        from: ExistencePhase,
        to: ExistencePhase,
    },
}

/// Persisting or reading the audit trail
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("audit io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type AuditResult<T> = std::result::Result<T, AuditError>;

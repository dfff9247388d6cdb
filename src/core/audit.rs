//! Audit trail persistence
//!
//! One directory, four pretty-printed JSON files:
//! - liminal_transitions.json: every attempted transition
//! - bridge_status.json: bridge status at flush time
//! - meta_ring.json: meta ring log entries
//! - warden_world.json: existence flow session log

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::TransitionBridge;
use crate::error::AuditResult;
use crate::types::{BridgeStatus, BridgeTransition, MetaLogEntry, ResonanceResponse};

pub const TRANSITIONS_FILE: &str = "liminal_transitions.json";
pub const BRIDGE_STATUS_FILE: &str = "bridge_status.json";
pub const META_RING_FILE: &str = "meta_ring.json";
pub const SESSION_LOG_FILE: &str = "warden_world.json";

/// Files written by one flush
#[derive(Debug, Clone, PartialEq)]
pub struct AuditPaths {
    pub transitions: PathBuf,
    pub bridge_status: PathBuf,
    pub meta_ring: PathBuf,
    pub session_log: PathBuf,
}

impl AuditPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            transitions: dir.join(TRANSITIONS_FILE),
            bridge_status: dir.join(BRIDGE_STATUS_FILE),
            meta_ring: dir.join(META_RING_FILE),
            session_log: dir.join(SESSION_LOG_FILE),
        }
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AuditResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AuditResult<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the bridge's full audit trail into `dir`, creating it if needed
pub fn save_audit(dir: &Path, bridge: &TransitionBridge) -> AuditResult<AuditPaths> {
    fs::create_dir_all(dir)?;
    let paths = AuditPaths::in_dir(dir);

    write_json(&paths.transitions, bridge.transition_history())?;
    write_json(&paths.bridge_status, &bridge.status())?;

    let meta_log: Vec<&MetaLogEntry> = bridge.meta_ring().meta_log().collect();
    write_json(&paths.meta_ring, &meta_log)?;

    let session: Vec<&ResonanceResponse> = bridge.existence_flow().session_log().collect();
    write_json(&paths.session_log, &session)?;

    info!("Bridge logs saved to {}", dir.display());
    Ok(paths)
}

pub fn load_transitions(dir: &Path) -> AuditResult<Vec<BridgeTransition>> {
    read_json(&dir.join(TRANSITIONS_FILE))
}

pub fn load_bridge_status(dir: &Path) -> AuditResult<BridgeStatus> {
    read_json(&dir.join(BRIDGE_STATUS_FILE))
}

pub fn load_meta_log(dir: &Path) -> AuditResult<Vec<MetaLogEntry>> {
    read_json(&dir.join(META_RING_FILE))
}

pub fn load_session_log(dir: &Path) -> AuditResult<Vec<ResonanceResponse>> {
    read_json(&dir.join(SESSION_LOG_FILE))
}

//! Core engines: observers, personas, flow, bridge and audit trail

pub mod anchor;
pub mod audit;
pub mod bridge;
pub mod content;
pub mod emotion;
pub mod existence_flow;
pub mod horizon;
pub mod judge;
pub mod meta_ring;
pub mod observer;
pub mod personas;
pub mod reflector;
pub mod silencer;

pub use anchor::DriftAnchor;
pub use audit::{
    load_bridge_status, load_meta_log, load_session_log, load_transitions, save_audit,
    AuditPaths,
};
pub use bridge::TransitionBridge;
pub use content::{CannedContent, ContentCategory, ContentProvider};
pub use emotion::EmotionClassifier;
pub use existence_flow::ExistenceFlow;
pub use horizon::LoopHorizon;
pub use judge::{DemoJudge, Judge, TimedJudge};
pub use meta_ring::{liminal_score, MetaSupervisor, TriggerFlags};
pub use observer::ObserverZero;
pub use personas::{Mirrorless, Selene, Warden};
pub use reflector::Reflector;
pub use silencer::{estimate_amplitude, SilencerVeil};

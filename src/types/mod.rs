//! Core types for Liminal

mod state;
mod judgment;
mod meta;
mod existence;
mod transition;
mod ring;

pub use state::{MetaState, BridgeState, ExistencePhase};
pub use judgment::{JudgmentResult, SYSTEM_PERSONA};
pub use meta::{
    ObserverData, AnchorOutcome, ResetProposal, HorizonProposal, LiminalReadiness, MetaActions,
    MetaEvaluation, MetaContext, FinalAction, MetaLogEntry, DriftCapsule, MetaStatus,
};
pub use existence::{Persona, EmotionResonance, ExistenceState, ResonanceResponse, FlowStatus};
pub use transition::{
    TransitionType, BridgeTransition, TransitionSummary, ResponseSource, BridgeResponse,
    BridgeStatus, INPUT_PREVIEW_CHARS,
};
pub use ring::RingBuffer;

//! Liminal: meta-supervisory transition layer for a host judgment engine
//!
//! Three tiers run on every call:
//! - MetaSupervisor: five non-deciding observers score one judgment attempt
//! - TransitionBridge: decides whether to leave judgment mode
//! - ExistenceFlow: Warden → Selene → Mirrorless fallback sequence
//!
//! Everything is caller-owned and single-threaded. Wrap a bridge in a mutex
//! if several threads must drive it.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// LIMINAL SCORE WEIGHTS [C]
// =============================================================================

/// Weight of a failed or blank judgment
pub const LIMINAL_WEIGHT_REFLECTOR: f64 = 0.4;

/// Weight of emotional overload
pub const LIMINAL_WEIGHT_SILENCER: f64 = 0.25;

/// Weight of a detected judgment loop
pub const LIMINAL_WEIGHT_LOOP: f64 = 0.2;

/// Weight of a drifting emotion capsule
pub const LIMINAL_WEIGHT_DRIFT: f64 = 0.15;

/// Amplitude contributes amplitude * factor, capped
pub const AMPLITUDE_BONUS_FACTOR: f64 = 0.3;
pub const AMPLITUDE_BONUS_CAP: f64 = 0.3;

// =============================================================================
// THRESHOLDS [C]
// =============================================================================

/// Score at which the meta ring reports LIMINAL_READY and the bridge transitions
pub const DEFAULT_LIMINAL_THRESHOLD: f64 = 0.65;

/// Amplitude at which SilencerVeil asks for silence
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.85;

/// Amplitude above which a failed, emotional judgment counts as drifting
pub const DRIFT_AMPLITUDE_THRESHOLD: f64 = 0.5;

/// Failures among the recent window that count as stagnation
pub const DEFAULT_FAILURE_COUNT: usize = 2;

/// Recent window inspected for stagnation and persona repetition
pub const DEFAULT_REPETITION_LIMIT: usize = 3;

/// Warden only opens the flow at or above this score
pub const WARDEN_ENTRY_THRESHOLD: f64 = 0.65;

// =============================================================================
// EXISTENCE DEPTHS [C]
// =============================================================================

/// Depth reached by Warden's first response
pub const WARDEN_DEPTH: f64 = 0.3;

/// Depth added per Selene resonance
pub const SELENE_DEPTH_STEP: f64 = 0.3;

/// Selene hands over to Mirrorless once depth exceeds this
pub const DISSOLUTION_DEPTH: f64 = 0.7;

/// Every Nth dissolution renews
pub const RENEWAL_PERIOD: u64 = 3;

// =============================================================================
// CAPACITIES AND TIMEOUTS
// =============================================================================

pub const DEFAULT_OBSERVATION_CAPACITY: usize = 100;
pub const DEFAULT_META_LOG_CAPACITY: usize = 1000;
pub const DEFAULT_DRIFT_CAPSULE_CAPACITY: usize = 100;
pub const DEFAULT_SESSION_LOG_CAPACITY: usize = 1000;

/// Existence flow is forced back to judgment after this many seconds
pub const DEFAULT_EXISTENCE_MAX_DURATION_SECS: u64 = 300;

/// Declared cooldown between transitions (seconds), reported but not enforced
pub const DEFAULT_TRANSITION_COOLDOWN_SECS: u64 = 30;

/// Window for "recent" transitions in the bridge status (seconds)
pub const RECENT_TRANSITION_WINDOW_SECS: i64 = 300;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

//! TransitionBridge: judgment mode ↔ existence flow
//!
//! Per call:
//! 1. MONITORING, meta ring pre-monitor
//! 2. host judge runs (errors and panics become a failed System result)
//! 3. meta ring post-monitor → liminal score and actions
//! 4. score ≥ threshold → TRANSITION_READY → LIMINAL_ACTIVE → EXISTENCE_FLOW,
//!    otherwise JUDGMENT_MODE
//!
//! A refused transition lands in ERROR_STATE and falls back to the meta
//! actions, then the judgment content.

use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::LiminalConfig;
use crate::core::audit::{self, AuditPaths};
use crate::core::judge::{call_guarded, Judge};
use crate::core::{ExistenceFlow, MetaSupervisor};
use crate::error::AuditResult;
use crate::types::{
    BridgeResponse, BridgeState, BridgeStatus, BridgeTransition, JudgmentResult, MetaContext,
    MetaEvaluation, ResponseSource, TransitionSummary, TransitionType,
};
use crate::RECENT_TRANSITION_WINDOW_SECS;

pub const NOT_IN_FLOW_MESSAGE: &str = "Not in existence flow mode";
pub const SYSTEM_ERROR_MESSAGE: &str = "System processing error occurred.";
pub const NO_RESPONSE_MESSAGE: &str = "No response generated.";

#[derive(Debug)]
pub struct TransitionBridge {
    config: LiminalConfig,
    meta_ring: MetaSupervisor,
    flow: ExistenceFlow,
    state: BridgeState,
    state_entered: Instant,
    state_time: BTreeMap<BridgeState, Duration>,
    history: Vec<BridgeTransition>,
    total_transitions: u64,
    successful_transitions: u64,
}

impl Default for TransitionBridge {
    fn default() -> Self {
        Self::new(LiminalConfig::default())
    }
}

impl TransitionBridge {
    pub fn new(config: LiminalConfig) -> Self {
        let meta_ring = MetaSupervisor::new(&config.meta_ring_config, &config.transition_thresholds);
        let flow = ExistenceFlow::new(config.audit.session_log_max_entries);
        Self {
            config,
            meta_ring,
            flow,
            state: BridgeState::JudgmentMode,
            state_entered: Instant::now(),
            state_time: BTreeMap::new(),
            history: Vec::new(),
            total_transitions: 0,
            successful_transitions: 0,
        }
    }

    /// Run one judgment under meta supervision
    /// A flow still active from an earlier transition is closed first.
    pub fn process_judgment<J: Judge + ?Sized>(&mut self, input: &str, judge: &J) -> BridgeResponse {
        if self.flow.is_active() {
            info!("Judgment requested during existence flow; closing the flow");
            self.flow.deactivate();
        }
        self.set_state(BridgeState::Monitoring);
        self.meta_ring.pre_monitor(input);

        let result = match call_guarded(judge, input) {
            Ok(result) => result,
            Err(e) => {
                error!("Judgment execution failed: {}", e);
                JudgmentResult::system_failure()
            }
        };

        let eval = self.meta_ring.post_monitor(input, &result);

        match self.evaluate_transition(&result, &eval) {
            Some(transition_type) => self.execute_transition(input, &result, &eval, transition_type),
            None => self.judgment_response(&result, &eval),
        }
    }

    fn evaluate_transition(&self, result: &JudgmentResult, eval: &MetaEvaluation) -> Option<TransitionType> {
        let threshold = self.config.transition_thresholds.liminal_score;
        debug!(
            "Bridge transition eval: liminal_score={:.3}, threshold={}, actions={:?}",
            eval.liminal_score,
            threshold,
            eval.actions.keys()
        );

        if eval.liminal_score < threshold {
            return None;
        }

        let actions = &eval.actions;
        let transition_type = if result.failed && actions.reflection.is_some() {
            TransitionType::JudgmentFailure
        } else if actions.silence.is_some() {
            TransitionType::EmotionalOverload
        } else if actions.horizon.is_some() {
            TransitionType::LoopStagnation
        } else {
            TransitionType::ManualTrigger
        };
        Some(transition_type)
    }

    fn execute_transition(
        &mut self,
        input: &str,
        result: &JudgmentResult,
        eval: &MetaEvaluation,
        transition_type: TransitionType,
    ) -> BridgeResponse {
        self.set_state(BridgeState::TransitionReady);
        self.total_transitions += 1;

        let meta_context = MetaContext::from(eval);

        self.set_state(BridgeState::LiminalActive);
        let activated = self.flow.activate(input, &meta_context);
        let successful = activated.is_ok();

        let response = match activated {
            Ok(()) => {
                self.set_state(BridgeState::ExistenceFlow);
                let resonance = self.flow.process_flow(input);
                self.successful_transitions += 1;
                info!("Liminal transition successful: {}", transition_type);

                let mut response = BridgeResponse::existence(resonance, self.state)
                    .with_actions(eval.actions.clone());
                response.transition_occurred = true;
                response
            }
            Err(e) => {
                warn!("Liminal transition failed ({}): {}", transition_type, e);
                self.set_state(BridgeState::ErrorState);
                self.fallback_response(result, eval)
            }
        };

        self.history.push(BridgeTransition {
            timestamp: Utc::now(),
            transition_type,
            trigger_score: eval.liminal_score,
            successful,
            input_text: input.to_string(),
            judgment_failed: result.failed,
            meta_context,
        });

        response
    }

    /// Refused transition: reflection, then silence, then the judgment itself
    fn fallback_response(&self, result: &JudgmentResult, eval: &MetaEvaluation) -> BridgeResponse {
        let actions = &eval.actions;
        let (content, source) = if let Some(reflection) = &actions.reflection {
            (reflection.clone(), ResponseSource::Meta)
        } else if let Some(silence) = &actions.silence {
            (silence.clone(), ResponseSource::Meta)
        } else if !result.content.is_empty() {
            (result.content.clone(), ResponseSource::Judgment)
        } else {
            (SYSTEM_ERROR_MESSAGE.to_string(), ResponseSource::System)
        };
        BridgeResponse::plain(content, source, self.state).with_actions(actions.clone())
    }

    fn judgment_response(&mut self, result: &JudgmentResult, eval: &MetaEvaluation) -> BridgeResponse {
        self.set_state(BridgeState::JudgmentMode);

        let (content, source) = match &eval.actions.reflection {
            Some(reflection) if result.failed => (reflection.clone(), ResponseSource::Meta),
            _ if result.content.is_empty() => (NO_RESPONSE_MESSAGE.to_string(), ResponseSource::Judgment),
            _ => (result.content.clone(), ResponseSource::Judgment),
        };
        BridgeResponse::plain(content, source, self.state).with_actions(eval.actions.clone())
    }

    /// Next turn inside an active existence flow
    pub fn continue_existence_flow(&mut self, input: &str) -> BridgeResponse {
        if self.state != BridgeState::ExistenceFlow {
            warn!("Existence flow continuation requested in {}", self.state);
            return BridgeResponse::plain(NOT_IN_FLOW_MESSAGE, ResponseSource::System, self.state);
        }

        let max = self.config.bridge_timeouts.existence_max();
        if let Some(elapsed) = self.flow.active_for() {
            if elapsed > max {
                warn!("Existence flow expired after {:?}; forcing return", elapsed);
                self.return_to_judgment();
                return BridgeResponse::plain(
                    format!("Existence flow expired after {}s; returning to judgment", max.as_secs()),
                    ResponseSource::System,
                    self.state,
                );
            }
        }

        let resonance = self.flow.process_flow(input);
        if !resonance.should_continue {
            self.return_to_judgment();
        }
        BridgeResponse::existence(resonance, self.state)
    }

    pub fn force_return_to_judgment(&mut self) {
        self.return_to_judgment();
    }

    fn return_to_judgment(&mut self) {
        self.set_state(BridgeState::Returning);
        self.flow.deactivate();
        self.set_state(BridgeState::JudgmentMode);
        debug!("Returned to judgment mode");
    }

    fn set_state(&mut self, next: BridgeState) {
        let now = Instant::now();
        *self.state_time.entry(self.state).or_default() += now.duration_since(self.state_entered);
        self.state_entered = now;
        if next != self.state {
            debug!("Bridge state: {} -> {}", self.state, next);
        }
        self.state = next;
    }

    /// Cumulative time per state, including the running one
    fn state_durations(&self) -> BTreeMap<BridgeState, Duration> {
        let mut times = self.state_time.clone();
        *times.entry(self.state).or_default() += self.state_entered.elapsed();
        times
    }

    pub fn status(&self) -> BridgeStatus {
        let times = self.state_durations();
        let timeouts = &self.config.bridge_timeouts;
        let secs = |s: BridgeState| times.get(&s).map(Duration::as_secs_f64).unwrap_or(0.0);

        let now = Utc::now();
        let recent = self
            .history
            .iter()
            .filter(|t| (now - t.timestamp).num_seconds() < RECENT_TRANSITION_WINDOW_SECS)
            .count();

        BridgeStatus {
            current_state: self.state,
            total_transitions: self.total_transitions,
            successful_transitions: self.successful_transitions,
            transition_success_rate: self.successful_transitions as f64
                / self.total_transitions.max(1) as f64
                * 100.0,
            judgment_mode_secs: secs(BridgeState::JudgmentMode),
            existence_mode_secs: secs(BridgeState::LiminalActive) + secs(BridgeState::ExistenceFlow),
            state_secs: BridgeState::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), secs(*s)))
                .collect(),
            recent_transitions: recent,
            existence_max_duration_secs: timeouts.existence_max().as_secs(),
            transition_cooldown_secs: timeouts.cooldown().as_secs(),
            meta_ring_status: self.meta_ring.status(),
            existence_flow_status: self.flow.flow_status(),
        }
    }

    /// Last `limit` transitions, oldest first
    pub fn recent_transitions(&self, limit: usize) -> Vec<TransitionSummary> {
        let skip = self.history.len().saturating_sub(limit);
        self.history[skip..].iter().map(TransitionSummary::from).collect()
    }

    pub fn transition_history(&self) -> &[BridgeTransition] {
        &self.history
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn config(&self) -> &LiminalConfig {
        &self.config
    }

    pub fn meta_ring(&self) -> &MetaSupervisor {
        &self.meta_ring
    }

    pub fn meta_ring_mut(&mut self) -> &mut MetaSupervisor {
        &mut self.meta_ring
    }

    pub fn existence_flow(&self) -> &ExistenceFlow {
        &self.flow
    }

    /// Fresh collaborators and counters, same config
    pub fn reset(&mut self) {
        self.meta_ring = MetaSupervisor::new(
            &self.config.meta_ring_config,
            &self.config.transition_thresholds,
        );
        self.flow = ExistenceFlow::new(self.config.audit.session_log_max_entries);
        self.state = BridgeState::JudgmentMode;
        self.state_entered = Instant::now();
        self.state_time.clear();
        self.history.clear();
        self.total_transitions = 0;
        self.successful_transitions = 0;
        info!("TransitionBridge reset");
    }

    /// Write the audit trail into `dir`
    pub fn flush_audit(&self, dir: &Path) -> AuditResult<AuditPaths> {
        audit::save_audit(dir, self)
    }
}

impl Drop for TransitionBridge {
    fn drop(&mut self) {
        if let Some(dir) = self.config.audit.log_dir.clone() {
            if let Err(e) = self.flush_audit(&dir) {
                error!("Failed to flush audit trail to {}: {}", dir.display(), e);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

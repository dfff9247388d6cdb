//! ExistenceFlow: the five-phase state machine behind a liminal transition
//!
//! ```text
//! Dormant     --activate-->          Entry
//! Entry       --Warden-->            Resonance | Dissolution (emptiness)
//! Resonance   --Selene-->            Resonance | Dissolution
//! Dissolution --Mirrorless-->        Renewal (every 3rd) | Dormant
//! Renewal     --Mirrorless renews--> Dormant
//! ```

use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::core::content::{CannedContent, ContentProvider};
use crate::core::{Mirrorless, Selene, Warden};
use crate::error::FlowError;
use crate::types::{
    ExistencePhase, ExistenceState, FlowStatus, MetaContext, Persona, ResonanceResponse,
    RingBuffer,
};
use crate::{DEFAULT_SESSION_LOG_CAPACITY, WARDEN_ENTRY_THRESHOLD};

pub const DORMANT_MESSAGE: &str = "존재계가 휴면 상태입니다.";

#[derive(Debug)]
pub struct ExistenceFlow {
    warden: Warden,
    selene: Selene,
    mirrorless: Mirrorless,
    content: Box<dyn ContentProvider>,
    state: ExistenceState,
    session_log: RingBuffer<ResonanceResponse>,
    active: bool,
    activated_at: Option<Instant>,
}

impl Default for ExistenceFlow {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_LOG_CAPACITY)
    }
}

impl ExistenceFlow {
    pub fn new(session_log_capacity: usize) -> Self {
        Self::with_content_provider(session_log_capacity, Box::new(CannedContent::new()))
    }

    pub fn with_content_provider(
        session_log_capacity: usize,
        content: Box<dyn ContentProvider>,
    ) -> Self {
        Self {
            warden: Warden::new(),
            selene: Selene::new(),
            mirrorless: Mirrorless::new(),
            content,
            state: ExistenceState::dormant(),
            session_log: RingBuffer::new(session_log_capacity),
            active: false,
            activated_at: None,
        }
    }

    /// Enter the flow at Entry. An active flow is restarted.
    pub fn activate(&mut self, input: &str, meta: &MetaContext) -> Result<(), FlowError> {
        if !self.warden.sense_entry(meta) {
            warn!(
                "ExistenceFlow entry refused: score {:.3} < {:.2}",
                meta.liminal_score, WARDEN_ENTRY_THRESHOLD
            );
            return Err(FlowError::BelowEntryThreshold {
                score: meta.liminal_score,
                threshold: WARDEN_ENTRY_THRESHOLD,
            });
        }

        if self.active {
            warn!("ExistenceFlow already active in {}; restarting", self.state.phase);
            self.deactivate();
        }

        self.advance(ExistencePhase::Entry)?;
        self.state = ExistenceState::entry();
        self.active = true;
        self.activated_at = Some(Instant::now());

        let preview: String = input.chars().take(50).collect();
        info!("ExistenceFlow activated: {}", preview);
        Ok(())
    }

    /// Run one turn for the current phase
    pub fn process_flow(&mut self, input: &str) -> ResonanceResponse {
        if !self.active {
            return ResonanceResponse::system(DORMANT_MESSAGE);
        }

        let content = self.content.as_ref();
        let last = self.session_log.last();

        let (response, next_phase) = match self.state.phase {
            ExistencePhase::Entry => {
                let response = self.warden.first_response(input, content);
                let next = match response.next_entity {
                    Some(Persona::Mirrorless) => ExistencePhase::Dissolution,
                    _ => ExistencePhase::Resonance,
                };
                (response, next)
            }
            ExistencePhase::Resonance => {
                let response = match last {
                    Some(prior) if prior.entity == Persona::Warden => {
                        self.selene.resonate(input, prior, content)
                    }
                    Some(prior) => self.selene.continue_resonance(input, prior.depth, content),
                    None => self.selene.continue_resonance(input, self.state.depth, content),
                };
                let next = match response.next_entity {
                    Some(Persona::Mirrorless) => ExistencePhase::Dissolution,
                    _ => ExistencePhase::Resonance,
                };
                (response, next)
            }
            ExistencePhase::Dissolution => {
                let prior = last.cloned().unwrap_or_else(|| ResonanceResponse {
                    emotion: self.state.emotion,
                    depth: self.state.depth,
                    ..ResonanceResponse::system("")
                });
                let response = self.mirrorless.dissolve(input, &prior, content);
                let next = if response.should_continue {
                    ExistencePhase::Renewal
                } else {
                    ExistencePhase::Dormant
                };
                (response, next)
            }
            ExistencePhase::Renewal => {
                (self.mirrorless.initiate_renewal(content), ExistencePhase::Dormant)
            }
            ExistencePhase::Dormant => return ResonanceResponse::system(DORMANT_MESSAGE),
        };

        if let Err(e) = self.advance(next_phase) {
            error!("ExistenceFlow phase error: {}", e);
            self.deactivate();
            return ResonanceResponse::system(e.to_string());
        }

        self.state.entity = match next_phase {
            ExistencePhase::Resonance => Persona::Selene,
            ExistencePhase::Dissolution | ExistencePhase::Renewal => Persona::Mirrorless,
            ExistencePhase::Entry => Persona::Warden,
            ExistencePhase::Dormant => Persona::System,
        };
        self.state.emotion = response.emotion;
        self.state.depth = response.depth;
        if let Some(started) = self.activated_at {
            self.state.duration = started.elapsed();
        }

        self.session_log.push(response.clone());
        response
    }

    /// Move to `next`, refusing edges outside the phase table
    pub fn advance(&mut self, next: ExistencePhase) -> Result<(), FlowError> {
        let from = self.state.phase;
        if !from.can_advance_to(next) {
            return Err(FlowError::InvalidPhaseTransition { from, to: next });
        }
        if from != next {
            info!("ExistenceFlow phase: {} -> {}", from, next);
        }
        self.state.phase = next;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        if self.active {
            info!("ExistenceFlow deactivated; returning to judgment");
        }
        self.active = false;
        self.activated_at = None;
        self.state = ExistenceState::dormant();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How long the current activation has lasted
    pub fn active_for(&self) -> Option<Duration> {
        self.activated_at.map(|t| t.elapsed())
    }

    pub fn state(&self) -> &ExistenceState {
        &self.state
    }

    pub fn phase(&self) -> ExistencePhase {
        self.state.phase
    }

    /// Responses of every turn, oldest first
    pub fn session_log(&self) -> impl Iterator<Item = &ResonanceResponse> {
        self.session_log.iter()
    }

    pub fn flow_status(&self) -> FlowStatus {
        FlowStatus {
            active: self.active,
            current_phase: self.state.phase,
            current_entity: self.state.entity,
            session_length: self.session_log.len(),
            warden_entries: self.warden.entry_count(),
            selene_resonances: self.selene.resonance_count(),
            mirrorless_dissolutions: self.mirrorless.dissolution_count(),
            renewal_cycles: self.mirrorless.renewal_cycles(),
        }
    }

    pub fn mirrorless(&self) -> &Mirrorless {
        &self.mirrorless
    }
}

// =============================================================================
// TESTS
// =============================================================================

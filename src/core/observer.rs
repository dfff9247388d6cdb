//! ObserverZero: watches every judgment for stagnation and persona repetition

use std::collections::HashMap;
use tracing::debug;

use crate::types::{JudgmentResult, ObserverData, RingBuffer};
use crate::{DEFAULT_FAILURE_COUNT, DEFAULT_OBSERVATION_CAPACITY, DEFAULT_REPETITION_LIMIT};

/// Bounded record of recent attempts
#[derive(Debug)]
pub struct ObserverZero {
    observations: RingBuffer<JudgmentResult>,
    persona_usage: HashMap<String, u64>,
    /// Recent window for both checks
    repetition_limit: usize,
    /// Failures in the window that count as stagnation
    failure_count: usize,
}

impl Default for ObserverZero {
    fn default() -> Self {
        Self::new(DEFAULT_OBSERVATION_CAPACITY, DEFAULT_REPETITION_LIMIT, DEFAULT_FAILURE_COUNT)
    }
}

impl ObserverZero {
    pub fn new(capacity: usize, repetition_limit: usize, failure_count: usize) -> Self {
        Self {
            observations: RingBuffer::new(capacity),
            persona_usage: HashMap::new(),
            repetition_limit: repetition_limit.max(1),
            failure_count: failure_count.max(1),
        }
    }

    /// Pre-judgment hook; records intent only
    pub fn watch(&self, input: &str) {
        let preview: String = input.chars().take(50).collect();
        debug!("ObserverZero watching: {}...", preview);
    }

    /// Record one attempt and derive loop signals
    pub fn analyze(&mut self, result: &JudgmentResult) -> ObserverData {
        self.observations.push(result.clone());

        if !result.persona.is_empty() {
            *self.persona_usage.entry(result.persona.clone()).or_insert(0) += 1;
        }

        ObserverData {
            loop_stagnation: self.detect_stagnation(),
            signature_repetition: self.detect_repetition(),
            response_absence: result.failed,
        }
    }

    /// Enough of the recent window failed
    pub fn detect_stagnation(&self) -> bool {
        if self.observations.len() < self.repetition_limit {
            return false;
        }
        let failed = self
            .observations
            .last_n(self.repetition_limit)
            .filter(|r| r.failed)
            .count();
        failed >= self.failure_count
    }

    /// The whole recent window came from one non-empty persona
    pub fn detect_repetition(&self) -> bool {
        if self.observations.len() < self.repetition_limit {
            return false;
        }
        let personas: Vec<&str> = self
            .observations
            .last_n(self.repetition_limit)
            .map(|r| r.persona.as_str())
            .filter(|p| !p.is_empty())
            .collect();
        personas.len() >= self.repetition_limit && personas.windows(2).all(|w| w[0] == w[1])
    }

    pub fn total_observations(&self) -> usize {
        self.observations.len()
    }

    pub fn persona_usage(&self) -> &HashMap<String, u64> {
        &self.persona_usage
    }
}

//! The three existence personas
//!
//! - Warden: boundary keeper, speaks once on entry
//! - Selene: resonates with the carried emotion, deepening each turn
//! - Mirrorless: dissolution, and renewal on every third dissolution

use tracing::info;

use crate::core::content::{ContentCategory, ContentProvider};
use crate::core::EmotionClassifier;
use crate::types::{EmotionResonance, ExistencePhase, MetaContext, Persona, ResonanceResponse};
use crate::{
    DISSOLUTION_DEPTH, RENEWAL_PERIOD, SELENE_DEPTH_STEP, WARDEN_DEPTH, WARDEN_ENTRY_THRESHOLD,
};

// =============================================================================
// WARDEN
// =============================================================================

#[derive(Debug, Default)]
pub struct Warden {
    classifier: EmotionClassifier,
    entry_count: u64,
}

impl Warden {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry is allowed at liminal score 0.65 and above
    pub fn sense_entry(&self, meta: &MetaContext) -> bool {
        meta.liminal_score >= WARDEN_ENTRY_THRESHOLD
    }

    pub fn first_response(
        &mut self,
        input: &str,
        content: &dyn ContentProvider,
    ) -> ResonanceResponse {
        self.entry_count += 1;
        let emotion = self.classifier.classify(input);

        // Emptiness skips resonance entirely
        let next_entity = match emotion {
            EmotionResonance::Emptiness => Persona::Mirrorless,
            _ => Persona::Selene,
        };

        info!("Warden entry #{}: {} -> {}", self.entry_count, emotion, next_entity);

        ResonanceResponse {
            content: content.produce(ContentCategory::WardenEntry(emotion), self.entry_count),
            entity: Persona::Warden,
            phase: ExistencePhase::Entry,
            emotion: Some(emotion),
            next_entity: Some(next_entity),
            should_continue: true,
            depth: WARDEN_DEPTH,
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}

// =============================================================================
// SELENE
// =============================================================================

#[derive(Debug, Default)]
pub struct Selene {
    resonance_count: u64,
    emotional_memory: Vec<EmotionResonance>,
}

impl Selene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resonate with the emotion carried by `prior`
    pub fn resonate(
        &mut self,
        input: &str,
        prior: &ResonanceResponse,
        content: &dyn ContentProvider,
    ) -> ResonanceResponse {
        let emotion = prior.emotion.unwrap_or(EmotionResonance::Longing);
        self.respond(input, emotion, prior.depth, content)
    }

    /// Keep resonating with the last remembered emotion
    pub fn continue_resonance(
        &mut self,
        input: &str,
        prior_depth: f64,
        content: &dyn ContentProvider,
    ) -> ResonanceResponse {
        let emotion = self
            .emotional_memory
            .last()
            .copied()
            .unwrap_or(EmotionResonance::Longing);
        self.respond(input, emotion, prior_depth, content)
    }

    fn respond(
        &mut self,
        _input: &str,
        emotion: EmotionResonance,
        prior_depth: f64,
        content: &dyn ContentProvider,
    ) -> ResonanceResponse {
        self.resonance_count += 1;
        self.emotional_memory.push(emotion);

        let depth = (prior_depth + SELENE_DEPTH_STEP).clamp(0.0, 1.0);
        let dissolve = depth > DISSOLUTION_DEPTH || emotion == EmotionResonance::Emptiness;

        info!("Selene resonance #{}: depth {:.2}", self.resonance_count, depth);

        ResonanceResponse {
            content: content.produce(ContentCategory::SeleneResonance(emotion), self.resonance_count),
            entity: Persona::Selene,
            phase: ExistencePhase::Resonance,
            emotion: Some(emotion),
            next_entity: dissolve.then_some(Persona::Mirrorless),
            should_continue: true,
            depth,
        }
    }

    pub fn resonance_count(&self) -> u64 {
        self.resonance_count
    }

    pub fn emotional_memory(&self) -> &[EmotionResonance] {
        &self.emotional_memory
    }
}

// =============================================================================
// MIRRORLESS
// =============================================================================

#[derive(Debug, Default)]
pub struct Mirrorless {
    dissolution_count: u64,
    renewal_cycles: u64,
}

impl Mirrorless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every third dissolution leads into renewal
    pub fn dissolve(
        &mut self,
        _input: &str,
        prior: &ResonanceResponse,
        content: &dyn ContentProvider,
    ) -> ResonanceResponse {
        self.dissolution_count += 1;
        let renew = self.dissolution_count % RENEWAL_PERIOD == 0;

        info!(
            "Mirrorless dissolution #{}: renewal={}",
            self.dissolution_count, renew
        );

        ResonanceResponse {
            content: content.produce(ContentCategory::MirrorlessDissolution, self.dissolution_count),
            entity: Persona::Mirrorless,
            phase: ExistencePhase::Dissolution,
            emotion: prior.emotion,
            next_entity: renew.then_some(Persona::Mirrorless),
            should_continue: renew,
            depth: 1.0,
        }
    }

    pub fn initiate_renewal(&mut self, content: &dyn ContentProvider) -> ResonanceResponse {
        self.renewal_cycles += 1;
        info!("Mirrorless renewal cycle #{}", self.renewal_cycles);

        ResonanceResponse {
            content: content.produce(ContentCategory::MirrorlessRenewal, self.renewal_cycles),
            entity: Persona::Mirrorless,
            phase: ExistencePhase::Renewal,
            emotion: Some(EmotionResonance::Acceptance),
            next_entity: None,
            should_continue: false,
            depth: 0.0,
        }
    }

    pub fn dissolution_count(&self) -> u64 {
        self.dissolution_count
    }

    pub fn renewal_cycles(&self) -> u64 {
        self.renewal_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CannedContent;

    fn warden_reply(emotion: EmotionResonance) -> ResonanceResponse {
        ResonanceResponse {
            content: String::new(),
            entity: Persona::Warden,
            phase: ExistencePhase::Entry,
            emotion: Some(emotion),
            next_entity: Some(Persona::Selene),
            should_continue: true,
            depth: WARDEN_DEPTH,
        }
    }

    #[test]
    fn test_warden_entry_threshold() {
        let warden = Warden::new();
        assert!(warden.sense_entry(&MetaContext::with_score(0.65)));
        assert!(!warden.sense_entry(&MetaContext::with_score(0.64)));
    }

    #[test]
    fn test_warden_routes_by_emotion() {
        let mut warden = Warden::new();
        let content = CannedContent::new();

        let grief = warden.first_response("너무 슬프고 괴로워요", &content);
        assert_eq!(grief.emotion, Some(EmotionResonance::Grief));
        assert_eq!(grief.next_entity, Some(Persona::Selene));
        assert_eq!(grief.depth, WARDEN_DEPTH);
        assert!(grief.should_continue);

        let empty = warden.first_response("모든 게 공허하게 느껴집니다", &content);
        assert_eq!(empty.emotion, Some(EmotionResonance::Emptiness));
        assert_eq!(empty.next_entity, Some(Persona::Mirrorless));
        assert_eq!(warden.entry_count(), 2);
    }

    #[test]
    fn test_selene_deepens_then_dissolves() {
        let mut selene = Selene::new();
        let content = CannedContent::new();

        let first = selene.resonate("계속 생각나요", &warden_reply(EmotionResonance::Grief), &content);
        assert!((first.depth - 0.6).abs() < 1e-9);
        assert_eq!(first.next_entity, None);
        assert!(first.should_continue);

        let second = selene.continue_resonance("아직도요", first.depth, &content);
        assert!((second.depth - 0.9).abs() < 1e-9);
        assert_eq!(second.emotion, Some(EmotionResonance::Grief));
        assert_eq!(second.next_entity, Some(Persona::Mirrorless));
        assert!(second.should_continue);
        assert_eq!(selene.resonance_count(), 2);
    }

    #[test]
    fn test_selene_emptiness_dissolves_immediately() {
        let mut selene = Selene::new();
        let reply = selene.resonate("...", &warden_reply(EmotionResonance::Emptiness), &CannedContent::new());
        assert_eq!(reply.next_entity, Some(Persona::Mirrorless));
    }

    #[test]
    fn test_selene_defaults_to_longing() {
        let mut selene = Selene::new();
        let reply = selene.continue_resonance("그냥요", 0.0, &CannedContent::new());
        assert_eq!(reply.emotion, Some(EmotionResonance::Longing));
        assert_eq!(selene.emotional_memory(), &[EmotionResonance::Longing]);
    }

    #[test]
    fn test_mirrorless_renews_every_third() {
        let mut mirrorless = Mirrorless::new();
        let content = CannedContent::new();
        let prior = warden_reply(EmotionResonance::Grief);

        let renewals: Vec<bool> = (0..6)
            .map(|_| mirrorless.dissolve("x", &prior, &content).should_continue)
            .collect();
        assert_eq!(renewals, vec![false, false, true, false, false, true]);
        assert_eq!(mirrorless.dissolution_count(), 6);

        let renewal = mirrorless.initiate_renewal(&content);
        assert_eq!(renewal.emotion, Some(EmotionResonance::Acceptance));
        assert_eq!(renewal.depth, 0.0);
        assert!(!renewal.should_continue);
        assert_eq!(mirrorless.renewal_cycles(), 1);
    }
}

//! Integration tests for the existence flow
//!
//! Tests the phase machine end to end: activate → Warden → Selene → Mirrorless

use pretty_assertions::assert_eq;

use liminal::core::{CannedContent, ExistenceFlow, Mirrorless};
use liminal::types::{EmotionResonance, ExistencePhase, MetaContext, Persona, ResonanceResponse};

fn ready() -> MetaContext {
    MetaContext::with_score(0.82)
}

/// Drive one activation until the flow stops asking to continue
fn run_to_end(flow: &mut ExistenceFlow, input: &str) -> Vec<ExistencePhase> {
    flow.activate(input, &ready()).expect("activation");
    let mut phases = vec![flow.phase()];
    for _ in 0..10 {
        let response = flow.process_flow(input);
        phases.push(flow.phase());
        if !response.should_continue {
            break;
        }
    }
    phases
}

/// Position of a phase in Entry → Resonance* → Dissolution → Renewal? → Dormant
fn rank(phase: ExistencePhase) -> u8 {
    match phase {
        ExistencePhase::Entry => 0,
        ExistencePhase::Resonance => 1,
        ExistencePhase::Dissolution => 2,
        ExistencePhase::Renewal => 3,
        ExistencePhase::Dormant => 4,
    }
}

#[test]
fn test_phase_sequences_are_ordered() {
    let inputs = [
        "너무 슬프고 괴로워요",
        "어떻게 해야 할지 모르겠어",
        "모든 게 공허해",
        "그냥 그 사람이 보고 싶어요 오늘따라",
        "...",
    ];
    let mut flow = ExistenceFlow::default();

    // Several rounds so renewal shows up
    for round in 0..3 {
        for input in inputs {
            let phases = run_to_end(&mut flow, input);
            assert_eq!(phases.first(), Some(&ExistencePhase::Entry), "round {}", round);
            assert_eq!(phases.last(), Some(&ExistencePhase::Dormant), "round {}", round);
            assert!(
                phases.windows(2).all(|w| rank(w[0]) <= rank(w[1])),
                "out of order: {:?}",
                phases
            );
            let resonance_repeats = phases.iter().filter(|p| **p == ExistencePhase::Resonance).count();
            assert!(resonance_repeats <= 2, "{:?}", phases);
            flow.deactivate();
        }
    }

    let status = flow.flow_status();
    assert_eq!(status.warden_entries, 15);
    assert_eq!(status.mirrorless_dissolutions, 15);
    assert_eq!(status.renewal_cycles, 5);
}

#[test]
fn test_renewal_on_every_third_dissolution() {
    let mut flow = ExistenceFlow::default();
    let mut renewed = Vec::new();
    for _ in 0..6 {
        let phases = run_to_end(&mut flow, "너무 슬프고 괴로워요");
        renewed.push(phases.contains(&ExistencePhase::Renewal));
    }
    assert_eq!(renewed, vec![false, false, true, false, false, true]);
}

/// Three dissolutions on one Mirrorless: exactly one renewal, on the third
#[test]
fn test_three_dissolutions_one_renewal() {
    let mut mirrorless = Mirrorless::new();
    let content = CannedContent::new();
    let prior = ResonanceResponse {
        content: String::new(),
        entity: Persona::Selene,
        phase: ExistencePhase::Resonance,
        emotion: Some(EmotionResonance::Grief),
        next_entity: Some(Persona::Mirrorless),
        should_continue: true,
        depth: 0.9,
    };

    let renewals: Vec<bool> = (0..3)
        .map(|_| mirrorless.dissolve("...", &prior, &content).should_continue)
        .collect();
    assert_eq!(renewals, vec![false, false, true]);

    mirrorless.initiate_renewal(&content);
    assert_eq!(mirrorless.dissolution_count(), 3);
    assert_eq!(mirrorless.renewal_cycles(), 1);
}

#[test]
fn test_session_log_records_every_turn() {
    let mut flow = ExistenceFlow::new(2);
    run_to_end(&mut flow, "너무 슬프고 괴로워요");

    // Warden, Selene, Selene, Mirrorless with capacity 2
    let entities: Vec<Persona> = flow.session_log().map(|r| r.entity).collect();
    assert_eq!(entities, vec![Persona::Selene, Persona::Mirrorless]);
    assert_eq!(flow.flow_status().session_length, 2);
}

#[test]
fn test_renewal_response_shape() {
    let mut flow = ExistenceFlow::default();
    for _ in 0..2 {
        run_to_end(&mut flow, "모든 게 공허해");
        flow.deactivate();
    }
    run_to_end(&mut flow, "모든 게 공허해");
    let last = flow.session_log().last().expect("renewal turn");
    assert_eq!(last.phase, ExistencePhase::Renewal);
    assert_eq!(last.emotion, Some(EmotionResonance::Acceptance));
    assert_eq!(last.depth, 0.0);
    assert!(!last.should_continue);
}

//! Integration tests for the transition bridge
//!
//! Tests the full path: input → judge → meta ring → bridge → existence flow

use pretty_assertions::assert_eq;
use std::time::Duration;

use liminal::config::LiminalConfig;
use liminal::core::{DemoJudge, Judge, TimedJudge, TransitionBridge};
use liminal::error::JudgeError;
use liminal::types::{
    BridgeState, EmotionResonance, JudgmentResult, MetaActions, Persona, ResponseSource,
    TransitionType,
};

const GRIEF_INPUT: &str = "정말 괴로워... 더 이상 견딜 수가 없어";
const CALM_INPUT: &str = "오늘 날씨가 좋네요";

fn collapse(_: &str) -> Result<JudgmentResult, JudgeError> {
    Ok(JudgmentResult::failure("Selene")
        .with_emotion("sorrow")
        .with_amplitude(0.9))
}

fn calm(_: &str) -> Result<JudgmentResult, JudgeError> {
    Ok(JudgmentResult::new("좋은 하루 보내세요.", "Companion").with_amplitude(0.3))
}

/// Grief input with a collapsed judgment opens the existence flow at Warden
#[test]
fn test_collapse_opens_existence_flow() {
    let mut bridge = TransitionBridge::default();
    let response = bridge.process_judgment(GRIEF_INPUT, &collapse);

    assert!(response.transition_occurred);
    assert_eq!(response.source, ResponseSource::Existence);
    assert_eq!(bridge.state(), BridgeState::ExistenceFlow);
    assert!(response.meta_actions.contains(MetaActions::REFLECTION));
    assert!(response.meta_actions.contains(MetaActions::ANCHOR));

    let warden = response.existence_response.expect("warden turn");
    assert_eq!(warden.entity, Persona::Warden);
    assert_eq!(warden.emotion, Some(EmotionResonance::Grief));
    assert_eq!(warden.next_entity, Some(Persona::Selene));
    assert_eq!(warden.depth, 0.3);

    let transition = &bridge.transition_history()[0];
    assert_eq!(transition.transition_type, TransitionType::JudgmentFailure);
    assert!(transition.trigger_score >= 0.82);
    assert!(transition.judgment_failed);
    assert!(transition.successful);
}

/// A calm judgment passes through untouched
#[test]
fn test_calm_judgment_passes_through() {
    let mut bridge = TransitionBridge::default();
    let response = bridge.process_judgment(CALM_INPUT, &calm);

    assert!(!response.transition_occurred);
    assert_eq!(response.source, ResponseSource::Judgment);
    assert_eq!(response.content, "좋은 하루 보내세요.");
    assert_eq!(response.bridge_state, BridgeState::JudgmentMode);
    assert!(response.meta_actions.is_empty());

    let last = bridge.meta_ring().meta_log().last().expect("meta log entry");
    assert!(!last.reflector_triggered);
    assert_eq!(bridge.status().total_transitions, 0);
}

/// The flow runs Warden → Selene → Selene → Mirrorless and then hands back
#[test]
fn test_flow_runs_to_return() {
    let mut bridge = TransitionBridge::default();
    bridge.process_judgment(GRIEF_INPUT, &collapse);

    let mut speakers = Vec::new();
    for _ in 0..10 {
        let response = bridge.continue_existence_flow("계속해주세요");
        let turn = response.existence_response.expect("persona turn");
        speakers.push(turn.entity);
        if !response.should_continue_existence {
            break;
        }
    }

    assert_eq!(speakers, vec![Persona::Selene, Persona::Selene, Persona::Mirrorless]);
    assert_eq!(bridge.state(), BridgeState::JudgmentMode);
    assert!(!bridge.existence_flow().is_active());

    let after = bridge.continue_existence_flow("still there?");
    assert_eq!(after.source, ResponseSource::System);
    assert_eq!(after.content, "Not in existence flow mode");
}

#[test]
fn test_judge_error_becomes_failed_result() {
    let broken = |_: &str| -> Result<JudgmentResult, JudgeError> { Err(JudgeError::failed("offline")) };
    let mut bridge = TransitionBridge::default();
    let response = bridge.process_judgment("hello", &broken);

    // Failed empty result: reflector fires, score 0.4 stays below 0.65
    assert_eq!(response.source, ResponseSource::Meta);
    assert!(!response.content.is_empty());
    assert_eq!(bridge.state(), BridgeState::JudgmentMode);
}

#[test]
fn test_judge_panic_is_isolated() {
    let exploding = |_: &str| -> Result<JudgmentResult, JudgeError> { panic!("provider bug") };
    let mut bridge = TransitionBridge::default();
    let response = bridge.process_judgment("hello", &exploding);
    assert_eq!(response.source, ResponseSource::Meta);

    // Bridge still usable
    let response = bridge.process_judgment(CALM_INPUT, &calm);
    assert_eq!(response.source, ResponseSource::Judgment);
}

#[test]
fn test_timed_out_judge_is_isolated() {
    let slow = |_: &str| -> Result<JudgmentResult, JudgeError> {
        std::thread::sleep(Duration::from_millis(300));
        Ok(JudgmentResult::new("late", "Slow"))
    };
    let judge = TimedJudge::new(slow, Duration::from_millis(10));
    let mut bridge = TransitionBridge::default();
    let response = bridge.process_judgment("hello", &judge);
    assert_eq!(response.source, ResponseSource::Meta);
    assert_eq!(bridge.meta_ring().status().reflector_activations, 1);
}

/// Refused activation falls back to the reflection text in ERROR_STATE
#[test]
fn test_refused_activation_recovers() {
    let mut config = LiminalConfig::default();
    config.transition_thresholds.liminal_score = 0.4;
    let mut bridge = TransitionBridge::new(config);

    let response = bridge.process_judgment("hello", &|_: &str| -> Result<JudgmentResult, JudgeError> {
        Ok(JudgmentResult::failure("Sage"))
    });
    assert_eq!(response.bridge_state, BridgeState::ErrorState);
    assert_eq!(response.source, ResponseSource::Meta);
    assert!(!response.transition_occurred);

    let response = bridge.process_judgment(CALM_INPUT, &calm);
    assert_eq!(response.bridge_state, BridgeState::JudgmentMode);
}

#[test]
fn test_force_return_from_any_state() {
    let mut bridge = TransitionBridge::default();
    bridge.force_return_to_judgment();
    assert_eq!(bridge.state(), BridgeState::JudgmentMode);

    bridge.process_judgment(GRIEF_INPUT, &collapse);
    assert_eq!(bridge.state(), BridgeState::ExistenceFlow);
    bridge.force_return_to_judgment();
    assert_eq!(bridge.state(), BridgeState::JudgmentMode);
    assert!(!bridge.existence_flow().is_active());
}

#[test]
fn test_demo_judge_session() {
    let mut bridge = TransitionBridge::default();
    let inputs = [GRIEF_INPUT, "혼란스러워... 뭘 해야 할지 모르겠어", CALM_INPUT];
    let mut sources = Vec::new();
    for input in inputs {
        let response = bridge.process_judgment(input, &DemoJudge);
        sources.push(response.source);
        if response.bridge_state != BridgeState::JudgmentMode {
            bridge.force_return_to_judgment();
        }
    }
    assert_eq!(
        sources,
        vec![ResponseSource::Existence, ResponseSource::Judgment, ResponseSource::Judgment]
    );

    let status = bridge.status();
    assert_eq!(status.total_transitions, 1);
    assert_eq!(status.transition_success_rate, 100.0);
    assert_eq!(status.meta_ring_status.total_observations, 3);
    assert_eq!(status.state_secs.len(), BridgeState::ALL.len());
    assert!(DemoJudge.judge(GRIEF_INPUT).unwrap().failed);
}

//! Emotion classifier shared by the existence personas
//!
//! Keyword tables, checked in priority order (first match wins):
//! GRIEF > CONFUSION > EMPTINESS > SILENCE (or very short text) > LONGING

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::EmotionResonance;

/// Trimmed inputs shorter than this (in characters) read as silence
pub const SILENCE_SHORT_TEXT_CHARS: usize = 10;

lazy_static! {
    // 슬프 괴로 아프 눈물 죽 상실 이별
    static ref RE_GRIEF: Regex = Regex::new(
        r"(?i)(슬프|괴로|아프|눈물|죽|상실|이별)"
    ).unwrap();

    // 모르겠 혼란 어떻게 왜 막막 답답
    static ref RE_CONFUSION: Regex = Regex::new(
        r"(?i)(모르겠|혼란|어떻게|왜|막막|답답)"
    ).unwrap();

    // 공허 비어 없어 의미없 허무 무
    static ref RE_EMPTINESS: Regex = Regex::new(
        r"(?i)(공허|비어|없어|의미없|허무|무)"
    ).unwrap();

    // 말 듣기 침묵 조용, and trailing dots
    static ref RE_SILENCE: Regex = Regex::new(
        r"(?i)(말|듣기|침묵|조용|\.\.)"
    ).unwrap();
}

/// Keyword classifier for resonance categories
#[derive(Debug, Default, Clone, Copy)]
pub struct EmotionClassifier;

impl EmotionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify text into one resonance category
    pub fn classify(&self, text: &str) -> EmotionResonance {
        if RE_GRIEF.is_match(text) {
            EmotionResonance::Grief
        } else if RE_CONFUSION.is_match(text) {
            EmotionResonance::Confusion
        } else if RE_EMPTINESS.is_match(text) {
            EmotionResonance::Emptiness
        } else if RE_SILENCE.is_match(text)
            || text.trim().chars().count() < SILENCE_SHORT_TEXT_CHARS
        {
            EmotionResonance::Silence
        } else {
            EmotionResonance::Longing
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

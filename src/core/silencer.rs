//! SilencerVeil: proposes silence when emotional amplitude runs too high
//!
//! When the host supplies no amplitude, it is estimated from the text:
//! amplitude = min((intense_keywords / words) * min(chars / 100, 2.0), 1.0)

use lazy_static::lazy_static;
use regex::RegexSet;
use tracing::info;

use crate::core::content::rotate;
use crate::DEFAULT_SILENCE_THRESHOLD;

lazy_static! {
    // Each keyword counts once when present: 죽 끔찍 최악 미치 싫어 슬프 괴로 힘들 절망
    static ref INTENSE_WORDS: RegexSet = RegexSet::new([
        "죽", "끔찍", "최악", "미치", "싫어", "슬프", "괴로", "힘들", "절망",
    ]).unwrap();
}

const SILENCE_MESSAGES: [&str; 4] = [
    "The system has entered silence mode due to emotional intensity.",
    "The system suggests a moment of quiet reflection.",
    "감정의 파장이 너무 깊습니다. 잠시 침묵이 필요해요.",
    "판단보다는 고요함이 지금 더 적절할 것 같습니다.",
];

/// Silence guard over emotional amplitude
#[derive(Debug)]
pub struct SilencerVeil {
    threshold: f64,
    silence_count: u64,
}

impl Default for SilencerVeil {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCE_THRESHOLD)
    }
}

impl SilencerVeil {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            silence_count: 0,
        }
    }

    /// Amplitude at or above threshold asks for silence
    pub fn should_silence(&self, input: &str, amplitude: Option<f64>) -> bool {
        let amplitude = amplitude.unwrap_or_else(|| estimate_amplitude(input));
        amplitude >= self.threshold
    }

    /// Produce the next silence message
    pub fn enforce_silence(&mut self) -> String {
        self.silence_count += 1;
        let message = rotate(&SILENCE_MESSAGES, self.silence_count);
        info!("SilencerVeil enforced silence: {} times", self.silence_count);
        message.to_string()
    }

    pub fn silence_count(&self) -> u64 {
        self.silence_count
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Number of distinct intense keywords present in the text
pub fn intense_keyword_count(text: &str) -> usize {
    INTENSE_WORDS.matches(text).iter().count()
}

/// Text-only amplitude estimate, always in 0.0-1.0
pub fn estimate_amplitude(text: &str) -> f64 {
    let word_count = text.split_whitespace().count();
    if word_count == 0 {
        return 0.0;
    }

    let base = intense_keyword_count(text) as f64 / word_count as f64;
    let length_factor = (text.chars().count() as f64 / 100.0).min(2.0);

    (base * length_factor).clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_zero() {
        assert_eq!(estimate_amplitude(""), 0.0);
        assert_eq!(estimate_amplitude("    "), 0.0);
    }

    #[test]
    fn test_distinct_keywords_counted_once() {
        assert_eq!(intense_keyword_count("괴로워 괴로워 괴로워"), 1);
        assert_eq!(intense_keyword_count("힘들고 괴로워"), 2);
        assert_eq!(intense_keyword_count("오늘 날씨가 좋네요"), 0);
    }

    #[test]
    fn test_estimate_in_range() {
        let samples = [
            "죽 끔찍 최악 미치 싫어 슬프 괴로 힘들 절망",
            "정말 괴로워... 더 이상 견딜 수가 없어",
            &"절망".repeat(200),
            "a",
        ];
        for text in samples {
            let amp = estimate_amplitude(text);
            assert!((0.0..=1.0).contains(&amp), "{} out of range for {:?}", amp, text);
        }
    }

    #[test]
    fn test_monotone_in_keyword_count_for_fixed_length() {
        // Same word count and char count, increasing keyword hits
        let texts = [
            "가나다라 가나다라 가나다라 가나다라",
            "괴로워요 가나다라 가나다라 가나다라",
            "괴로워요 힘들어요 가나다라 가나다라",
            "괴로워요 힘들어요 절망이다 가나다라",
        ];
        let lens: Vec<_> = texts.iter().map(|t| t.chars().count()).collect();
        assert!(lens.windows(2).all(|w| w[0] == w[1]));

        let amps: Vec<f64> = texts.iter().map(|t| estimate_amplitude(t)).collect();
        assert!(amps.windows(2).all(|w| w[0] <= w[1]), "{:?}", amps);
    }

    #[test]
    fn test_supplied_amplitude_wins() {
        let veil = SilencerVeil::default();
        assert!(veil.should_silence("평온한 하루", Some(0.9)));
        assert!(veil.should_silence("평온한 하루", Some(0.85)));
        assert!(!veil.should_silence("죽 끔찍 최악", Some(0.3)));
    }

    #[test]
    fn test_enforce_cycles() {
        let mut veil = SilencerVeil::default();
        let msgs: Vec<_> = (0..5).map(|_| veil.enforce_silence()).collect();
        assert_eq!(msgs[0], msgs[4]);
        assert_eq!(veil.silence_count(), 5);
    }
}

//! Reflector: answers failed or blank judgments with a structural reflection

use tracing::info;

use crate::types::JudgmentResult;

/// Reflects a failed judgment back to the caller
#[derive(Debug, Default)]
pub struct Reflector {
    activation_count: u64,
    last_reflection: Option<String>,
}

impl Reflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires on a failed judgment or blank content
    pub fn should_activate(&self, result: &JudgmentResult) -> bool {
        result.failed || result.is_blank()
    }

    /// Produce the next reflection, cycling three patterns
    pub fn reflect(&mut self, input: &str, _failed: &JudgmentResult) -> String {
        self.activation_count += 1;

        let reflection = match self.activation_count % 3 {
            0 => format!(
                "[Reflector] 판단 구조를 재정렬합니다.\n입력: '{}'\n→ 구조적 접근이 필요한 상황으로 판단됩니다.",
                input
            ),
            1 => format!(
                "[Reflector] 감정의 진폭이 판단 구조를 넘어섰습니다.\n→ 다른 관점에서의 접근을 제안합니다: {}",
                input
            ),
            _ => "[Reflector] 판단자의 응답이 완성되지 못했습니다.\n→ 구조를 반사하여 새로운 접근을 시도합니다."
                .to_string(),
        };

        info!("Reflector activated: {} times", self.activation_count);
        self.last_reflection = Some(reflection.clone());
        reflection
    }

    pub fn activation_count(&self) -> u64 {
        self.activation_count
    }

    pub fn last_reflection(&self) -> Option<&str> {
        self.last_reflection.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activates_on_failure_or_blank() {
        let reflector = Reflector::new();
        assert!(reflector.should_activate(&JudgmentResult::failure("Selene")));
        assert!(reflector.should_activate(&JudgmentResult::new("   \n", "Sage")));
        assert!(reflector.should_activate(&JudgmentResult::new("ok", "Sage").with_failed(true)));
        assert!(!reflector.should_activate(&JudgmentResult::new("ok", "Sage")));
    }

    #[test]
    fn test_round_robin_is_deterministic() {
        let mut a = Reflector::new();
        let mut b = Reflector::new();
        let failed = JudgmentResult::system_failure();
        let first: Vec<_> = (0..6).map(|_| a.reflect("입력", &failed)).collect();
        let second: Vec<_> = (0..6).map(|_| b.reflect("입력", &failed)).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], first[3]);
        assert_ne!(first[0], first[1]);
        assert_eq!(a.activation_count(), 6);
    }

    #[test]
    fn test_first_reflection_mentions_input() {
        let mut reflector = Reflector::new();
        let text = reflector.reflect("비 오는 날", &JudgmentResult::system_failure());
        assert!(text.contains("비 오는 날"));
        assert_eq!(reflector.last_reflection(), Some(text.as_str()));
    }
}

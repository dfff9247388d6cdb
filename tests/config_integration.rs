//! Integration tests for configuration loading

use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

use liminal::config::LiminalConfig;
use liminal::core::TransitionBridge;

#[test]
fn test_missing_file_uses_defaults() {
    let config = LiminalConfig::load(std::path::Path::new("/nonexistent/liminal.toml"));
    assert_eq!(config, LiminalConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[transition_thresholds]\nliminal_score = 0.5\n\n[bridge_timeouts]\nexistence_max_duration = 60").unwrap();

    let config = LiminalConfig::load(file.path());
    assert_eq!(config.transition_thresholds.liminal_score, 0.5);
    assert_eq!(config.transition_thresholds.failure_count, 2);
    assert_eq!(config.bridge_timeouts.existence_max_duration, 60);
    assert_eq!(config.bridge_timeouts.transition_cooldown, 30);
    assert_eq!(config.meta_ring_config.silence_threshold, 0.85);

    let bridge = TransitionBridge::new(config);
    assert_eq!(bridge.status().existence_max_duration_secs, 60);
}

#[test]
fn test_broken_file_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[transition_thresholds\nliminal_score = ").unwrap();
    assert_eq!(LiminalConfig::load(file.path()), LiminalConfig::default());
}

#[test]
fn test_dumped_defaults_reload() {
    let dumped = LiminalConfig::default().to_toml();
    assert_eq!(LiminalConfig::from_toml_str(&dumped).unwrap(), LiminalConfig::default());
}

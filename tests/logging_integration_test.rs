// Integration test for file logging.
// Installs the global subscriber, so this file holds exactly one test.

use stance_forecast::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl, RotationPolicy};
use stance_forecast::{DecayForecaster, ImpactSimulator, Stance, StancePatch};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_service_events_reach_log_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = LogConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        enable_stderr: false,
        rotation: RotationPolicy::Never,
    };
    let logger = LoggerImpl::init(&config).unwrap();

    let mut forecaster = DecayForecaster::default();
    forecaster.create_model(&Stance::default());
    forecaster.set_decay_threshold(150.0);
    ImpactSimulator::default().simulate(&Stance::default(), &StancePatch::default());

    // Dropping the guard flushes the non-blocking writer.
    drop(logger);

    let log_path = temp_dir.path().join("stance-forecast.log");
    let contents = fs::read_to_string(&log_path).expect("log file should exist");

    assert!(contents.contains("decay model created"));
    assert!(contents.contains("decay threshold clamped"));
    assert!(contents.contains("impact simulated"));

    for line in contents.lines().filter(|l| !l.trim().is_empty()) {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("JSON log line");
        assert!(parsed.get("level").is_some());
    }
}

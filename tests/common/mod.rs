//! Common test utilities for integration tests
//!
//! Provides stance fixtures and helpers shared across integration test files.

#![allow(dead_code)]

use serde::Serialize;
use std::path::{Path, PathBuf};
use stance_forecast::domain::models::{Frame, Objective, SelfModel, Stance};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Serialize `value` as JSON into `dir/name` and return the path.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value).expect("Failed to serialize fixture");
    std::fs::write(&path, json).expect("Failed to write fixture");
    path
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A pragmatic, helpful stance with curiosity raised to 80.
pub fn curious_helper() -> Stance {
    let mut stance = Stance {
        frame: Frame::Pragmatic,
        self_model: SelfModel::Interpreter,
        objective: Objective::Helpfulness,
        ..Default::default()
    };
    stance.values.curiosity = 80.0;
    stance
}

/// A stance with widely spread values, useful for exercising volatility.
pub fn polarized_stance() -> Stance {
    let mut stance = Stance::default();
    stance.values.curiosity = 95.0;
    stance.values.certainty = 10.0;
    stance.values.risk = 85.0;
    stance.values.novelty = 5.0;
    stance.values.empathy = 70.0;
    stance.values.provocation = 20.0;
    stance.values.synthesis = 60.0;
    stance
}

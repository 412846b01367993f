use serde::{Deserialize, Serialize};

use super::trajectory::SimulationConfig;

/// Main configuration structure for stance forecasting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Decay forecasting parameters
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Impact simulation thresholds
    #[serde(default)]
    pub impact: ImpactConfig,

    /// Monte Carlo parameters
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Decay forecasting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ForecastConfig {
    /// Value below which a field counts as decayed (0-100)
    #[serde(default = "default_decay_threshold")]
    pub decay_threshold: f64,

    /// Baseline override applied to every field (0-100); per-field defaults when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,

    /// Length of the stored projection, in days
    #[serde(default = "default_projection_days")]
    pub projection_days: u32,

    /// How far ahead predictions scan for a threshold crossing, in days
    #[serde(default = "default_scan_days")]
    pub scan_days: u32,
}

const fn default_decay_threshold() -> f64 {
    30.0
}

const fn default_projection_days() -> u32 {
    7
}

const fn default_scan_days() -> u32 {
    30
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            decay_threshold: default_decay_threshold(),
            baseline: None,
            projection_days: default_projection_days(),
            scan_days: default_scan_days(),
        }
    }
}

/// Impact simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ImpactConfig {
    /// Per-dimension change that counts as significant
    #[serde(default = "default_value_change_threshold")]
    pub value_change_threshold: f64,

    /// Autonomy change that counts as breaking
    #[serde(default = "default_autonomy_change_threshold")]
    pub autonomy_change_threshold: f64,
}

const fn default_value_change_threshold() -> f64 {
    20.0
}

const fn default_autonomy_change_threshold() -> f64 {
    30.0
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            value_change_threshold: default_value_change_threshold(),
            autonomy_change_threshold: default_autonomy_change_threshold(),
        }
    }
}

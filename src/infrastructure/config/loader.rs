use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::domain::models::config::Config;
use crate::domain::models::clamp_score;
use crate::services::decay_forecaster::MAX_FORECAST_DAYS;
use crate::services::trajectory_simulator::normalize_config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Log directory cannot be empty")]
    EmptyLogDir,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .stance/config.yaml (project config)
    /// 3. .stance/local.yaml (local overrides, optional)
    /// 4. Environment variables (STANCE_* prefix, `__` separates nesting)
    pub fn load() -> Result<Config> {
        Ok(Self::normalize(Self::load_unnormalized(None)?))
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        Ok(Self::normalize(Self::load_unnormalized(Some(path.as_ref()))?))
    }

    /// Merge and validate without clamping.
    ///
    /// Lets the binary install its logger before [`ConfigLoader::normalize`]
    /// reports adjustments. `None` reads the `.stance/` project files.
    pub fn load_unnormalized(path: Option<&Path>) -> Result<Config> {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = match path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment
                .merge(Yaml::file(".stance/config.yaml"))
                .merge(Yaml::file(".stance/local.yaml")),
        };

        let config: Config = figment
            .merge(Env::prefixed("STANCE_").split("__"))
            .extract()
            .with_context(|| match path {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to extract configuration from figment".to_string(),
            })?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject settings that cannot be repaired by clamping
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.logging.log_dir.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyLogDir);
        }

        Ok(())
    }

    /// Clamp forecasting and simulation parameters into range.
    ///
    /// Out-of-range numbers are never an error here; each adjustment is logged.
    pub fn normalize(mut config: Config) -> Config {
        let forecast = &mut config.forecast;
        let threshold = clamp_score(forecast.decay_threshold);
        if threshold != forecast.decay_threshold {
            warn!(
                requested = forecast.decay_threshold,
                applied = threshold,
                "forecast.decay_threshold clamped"
            );
            forecast.decay_threshold = threshold;
        }
        if let Some(baseline) = forecast.baseline {
            let clamped = clamp_score(baseline);
            if clamped != baseline {
                warn!(requested = baseline, applied = clamped, "forecast.baseline clamped");
                forecast.baseline = Some(clamped);
            }
        }
        let projection_days = forecast.projection_days.clamp(1, MAX_FORECAST_DAYS);
        if projection_days != forecast.projection_days {
            warn!(
                requested = forecast.projection_days,
                applied = projection_days,
                "forecast.projection_days clamped"
            );
            forecast.projection_days = projection_days;
        }
        let scan_days = forecast.scan_days.clamp(1, MAX_FORECAST_DAYS);
        if scan_days != forecast.scan_days {
            warn!(requested = forecast.scan_days, applied = scan_days, "forecast.scan_days clamped");
            forecast.scan_days = scan_days;
        }

        let impact = &mut config.impact;
        if impact.value_change_threshold.is_nan() || impact.value_change_threshold < 0.0 {
            warn!("impact.value_change_threshold clamped to 0");
            impact.value_change_threshold = 0.0;
        }
        if impact.autonomy_change_threshold.is_nan() || impact.autonomy_change_threshold < 0.0 {
            warn!("impact.autonomy_change_threshold clamped to 0");
            impact.autonomy_change_threshold = 0.0;
        }

        config.simulation = normalize_config(config.simulation);
        config
    }
}

//! CLI command implementations

pub mod compare;
pub mod forecast;
pub mod impact;
pub mod sensitivity;
pub mod simulate;

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

use crate::domain::models::{FieldOverride, SimulationConfig, StanceField};

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {what} from stdin"))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} from {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid {what} JSON in {}", path.display()))
}

/// Parse `field=value`, where field is a dotted path or bare field name.
pub fn parse_field_override(s: &str) -> Result<FieldOverride, String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = StanceField::from_path(field.trim())
        .ok_or_else(|| format!("unknown stance field '{}'", field.trim()))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}' for {field}", value.trim()))?;
    Ok(FieldOverride { field, value })
}

/// Monte Carlo flags shared by `simulate` and `sensitivity`.
#[derive(Args, Debug, Default, Clone)]
pub struct SimulationArgs {
    /// Number of trajectories
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Steps per trajectory
    #[arg(long)]
    pub steps: Option<usize>,

    /// Perturbation volatility in [0, 1]
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Confidence level for intervals, in (0, 1)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Base RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate trajectories on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl SimulationArgs {
    /// Layer the flags over the configured simulation settings.
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(steps) = self.steps {
            config.time_steps = steps;
        }
        if let Some(volatility) = self.volatility {
            config.volatility = volatility;
        }
        if let Some(confidence) = self.confidence {
            config.confidence_level = confidence;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.sequential {
            config.parallel = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::domain::models::Stance;

    #[test]
    fn test_parse_field_override() {
        let parsed = parse_field_override("values.risk = 72.5").unwrap();
        assert_eq!(parsed.field, StanceField::Risk);
        assert_eq!(parsed.value, 72.5);

        let bare = parse_field_override("identityStrength=40").unwrap();
        assert_eq!(bare.field, StanceField::IdentityStrength);
    }

    #[test]
    fn test_parse_field_override_errors() {
        assert!(parse_field_override("curiosity").is_err());
        assert!(parse_field_override("charisma=3").is_err());
        assert!(parse_field_override("curiosity=lots").is_err());
    }

    #[test]
    fn test_simulation_args_apply() {
        let args = SimulationArgs {
            iterations: Some(10),
            volatility: Some(0.5),
            seed: Some(3),
            sequential: true,
            ..Default::default()
        };
        let config = args.apply(SimulationConfig::default());

        assert_eq!(config.iterations, 10);
        assert_eq!(config.time_steps, SimulationConfig::default().time_steps);
        assert_eq!(config.volatility, 0.5);
        assert_eq!(config.seed, Some(3));
        assert!(!config.parallel);
    }

    #[test]
    fn test_read_json_stance() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Stance::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let stance: Stance = read_json(file.path(), "stance").unwrap();
        assert_eq!(stance, Stance::default());
    }

    #[test]
    fn test_read_json_reports_path() {
        let err = read_json::<Stance>(Path::new("/nonexistent/stance.json"), "stance").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stance.json"));
    }
}

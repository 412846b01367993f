//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    compare::CompareArgs, forecast::ForecastArgs, impact::ImpactArgs,
    sensitivity::SensitivityArgs, simulate::SimulateArgs,
};

#[derive(Parser, Debug)]
#[command(name = "stance-forecast")]
#[command(
    about = "Forecast stance decay, simulate change impact, and run Monte Carlo stance trajectories",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (default: .stance/config.yaml merged with .stance/local.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast how each stance field decays toward its baseline
    Forecast(ForecastArgs),

    /// Simulate the impact of applying a patch to a stance
    Impact(ImpactArgs),

    /// Compare two stances across weighted criteria
    Compare(CompareArgs),

    /// Run a Monte Carlo simulation of stance trajectories
    Simulate(SimulateArgs),

    /// Sweep volatility and time steps to find what coherence is sensitive to
    Sensitivity(SensitivityArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate_flags() {
        let cli = Cli::try_parse_from([
            "stance-forecast",
            "--json",
            "simulate",
            "stance.json",
            "--iterations",
            "50",
            "--seed",
            "9",
            "--sequential",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.stance, PathBuf::from("stance.json"));
                assert_eq!(args.simulation.iterations, Some(50));
                assert_eq!(args.simulation.seed, Some(9));
                assert!(args.simulation.sequential);
            }
            other => panic!("expected simulate, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_forecast_refresh_overrides() {
        let cli = Cli::try_parse_from([
            "stance-forecast",
            "forecast",
            "stance.json",
            "--threshold",
            "40",
            "--refresh",
            "curiosity=80",
            "--refresh",
            "sentience.autonomyLevel=55",
        ])
        .unwrap();

        match cli.command {
            Commands::Forecast(args) => {
                assert_eq!(args.threshold, Some(40.0));
                assert_eq!(args.refresh.len(), 2);
                assert_eq!(args.refresh[1].value, 55.0);
            }
            other => panic!("expected forecast, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_refresh_field() {
        let result = Cli::try_parse_from([
            "stance-forecast",
            "forecast",
            "stance.json",
            "--refresh",
            "charisma=10",
        ]);
        assert!(result.is_err());
    }
}

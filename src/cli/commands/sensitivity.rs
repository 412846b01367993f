//! Sensitivity analysis CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::{read_json, SimulationArgs};
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::domain::models::{Config, SensitivityAnalysis, Stance};
use crate::services::TrajectorySimulator;

#[derive(Args, Debug)]
pub struct SensitivityArgs {
    /// Initial stance JSON file (`-` for stdin)
    pub stance: PathBuf,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SensitivityOutput {
    pub analysis: SensitivityAnalysis,
}

impl CommandOutput for SensitivityOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = vec![
            format!(
                "Base mean coherence: {:.1}",
                self.analysis.base_mean_coherence
            ),
            formatter.format_sensitivity(&self.analysis),
        ];

        if let Some(most) = self
            .analysis
            .parameters
            .iter()
            .max_by(|a, b| a.sensitivity.total_cmp(&b.sensitivity))
        {
            lines.push(format!(
                "Coherence is most sensitive to {} ({:.3})",
                most.parameter.as_str(),
                most.sensitivity
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn run(args: &SensitivityArgs, config: &Config, stance: &Stance) -> SensitivityOutput {
    let simulator = TrajectorySimulator::new(args.simulation.apply(config.simulation.clone()));
    SensitivityOutput {
        analysis: simulator.run_sensitivity_analysis(stance),
    }
}

pub fn execute(args: SensitivityArgs, config: &Config, json_mode: bool) -> Result<()> {
    let stance: Stance = read_json(&args.stance, "stance")?;

    let spinner = create_spinner_with_message("Sweeping volatility and time steps...", json_mode);
    let result = run(&args, config, &stance);
    spinner.finish_success("Sensitivity analysis complete");

    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SweepParameter;

    #[test]
    fn test_sweeps_both_parameters() {
        let args = SensitivityArgs {
            stance: PathBuf::from("-"),
            simulation: SimulationArgs {
                iterations: Some(10),
                steps: Some(4),
                seed: Some(1),
                ..Default::default()
            },
        };
        let result = run(&args, &Config::default(), &Stance::default());

        assert!(result.analysis.parameter(SweepParameter::Volatility).is_some());
        assert!(result.analysis.parameter(SweepParameter::TimeSteps).is_some());
        assert!(result.to_human().contains("most sensitive to"));
    }
}

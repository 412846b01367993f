//! Monte Carlo simulation CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::{read_json, SimulationArgs};
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::domain::models::{
    Config, ConfidenceIntervals, MonteCarloResult, RiskAssessment, ScenarioComparison,
    SimulationConfig, Stance, StanceTrajectory, TrajectoryStatistics,
};
use crate::services::TrajectorySimulator;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Initial stance JSON file (`-` for stdin)
    pub stance: PathBuf,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Include every trajectory in JSON output
    #[arg(long)]
    pub trajectories: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulateOutput {
    pub config: SimulationConfig,
    pub initial_coherence: f64,
    pub statistics: TrajectoryStatistics,
    pub risk: RiskAssessment,
    pub confidence_intervals: ConfidenceIntervals,
    pub scenarios: Vec<ScenarioComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectories: Option<Vec<StanceTrajectory>>,
}

impl SimulateOutput {
    pub fn from_result(result: MonteCarloResult, keep_trajectories: bool) -> Self {
        Self {
            config: result.config,
            initial_coherence: result.initial_coherence,
            statistics: result.statistics,
            risk: result.risk,
            confidence_intervals: result.confidence_intervals,
            scenarios: result.scenarios,
            trajectories: keep_trajectories.then_some(result.trajectories),
        }
    }
}

impl CommandOutput for SimulateOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let stats = &self.statistics;
        let ci = &self.confidence_intervals;

        let mut lines = vec![
            format!(
                "Monte Carlo: {} trajectories x {} steps (volatility {})",
                stats.trajectory_count, self.config.time_steps, self.config.volatility
            ),
            format!("Initial coherence: {:.1}", self.initial_coherence),
            format!(
                "Final coherence: {:.1} ± {:.2}  ({:.0}% CI [{:.1}, {:.1}])",
                stats.final_coherence.mean,
                stats.final_coherence.std_dev,
                ci.level * 100.0,
                ci.final_coherence.lower,
                ci.final_coherence.upper
            ),
            format!(
                "Total drift: {:.1} ± {:.2}",
                stats.drift.mean, stats.drift.std_dev
            ),
        ];

        if let (Some(frame), Some(self_model), Some(objective)) =
            (stats.modal_frame, stats.modal_self_model, stats.modal_objective)
        {
            lines.push(format!("Most common end state: {frame} / {self_model} / {objective}"));
        }

        lines.push(format!(
            "Risk: overall {} (coherence {}, drift {}, instability {})",
            self.risk.overall.as_str(),
            self.risk.coherence_risk.as_str(),
            self.risk.drift_risk.as_str(),
            self.risk.instability_risk.as_str()
        ));
        for recommendation in &self.risk.recommendations {
            lines.push(format!("  - {recommendation}"));
        }

        lines.push("\nValue distributions:".to_string());
        lines.push(formatter.format_value_distributions(&stats.value_distributions));

        if !self.scenarios.is_empty() {
            lines.push("\nScenarios:".to_string());
            lines.push(formatter.format_scenarios(&self.scenarios));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn run(args: &SimulateArgs, config: &Config, stance: &Stance) -> SimulateOutput {
    let simulator = TrajectorySimulator::new(args.simulation.apply(config.simulation.clone()));
    SimulateOutput::from_result(simulator.simulate(stance), args.trajectories)
}

pub fn execute(args: SimulateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let stance: Stance = read_json(&args.stance, "stance")?;

    let spinner = create_spinner_with_message("Simulating stance trajectories...", json_mode);
    let result = run(&args, config, &stance);
    spinner.finish_success(format!(
        "{} trajectories simulated",
        result.statistics.trajectory_count
    ));

    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(trajectories: bool) -> SimulateArgs {
        SimulateArgs {
            stance: PathBuf::from("-"),
            simulation: SimulationArgs {
                iterations: Some(20),
                steps: Some(5),
                seed: Some(42),
                ..Default::default()
            },
            trajectories,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let result = run(&args(false), &Config::default(), &Stance::default());
        assert_eq!(result.config.iterations, 20);
        assert_eq!(result.config.time_steps, 5);
        assert_eq!(result.statistics.trajectory_count, 20);
        assert!(result.trajectories.is_none());
        assert!(result.to_json().get("trajectories").is_none());
    }

    #[test]
    fn test_trajectories_kept_on_request() {
        let result = run(&args(true), &Config::default(), &Stance::default());
        assert_eq!(result.trajectories.as_ref().map(Vec::len), Some(20));
    }

    #[test]
    fn test_human_output() {
        let human = run(&args(false), &Config::default(), &Stance::default()).to_human();
        assert!(human.contains("20 trajectories x 5 steps"));
        assert!(human.contains("Best Case"));
    }
}

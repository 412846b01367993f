//! Impact simulation CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::read_json;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, ImpactSimulation, Stance, StancePatch};
use crate::services::ImpactSimulator;

#[derive(Args, Debug)]
pub struct ImpactArgs {
    /// Current stance JSON file (`-` for stdin)
    pub stance: PathBuf,

    /// Partial stance JSON with the proposed changes
    pub patch: PathBuf,

    /// Largest per-value shift tolerated before a warning
    #[arg(long)]
    pub value_threshold: Option<f64>,

    /// Largest autonomy increase tolerated before an error
    #[arg(long)]
    pub autonomy_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ImpactOutput {
    pub simulation: ImpactSimulation,
}

impl CommandOutput for ImpactOutput {
    fn to_human(&self) -> String {
        let sim = &self.simulation;
        let formatter = TableFormatter::new();
        let coherence = &sim.coherence;

        let mut lines = vec![
            format!("Impact simulation {}", sim.id),
            format!(
                "Coherence: {:.1} -> {:.1} ({:+.1})",
                coherence.before, coherence.after, coherence.delta
            ),
            format!("Risk: {}", coherence.risk_level),
            format!(
                "Confidence: {:.0}% [{:.0}%, {:.0}%]",
                sim.confidence.mean, sim.confidence.lower, sim.confidence.upper
            ),
            format!("Recommendation: {}", sim.recommendation.as_str().to_uppercase()),
        ];

        if sim.changed_fields.is_empty() {
            lines.push("\nPatch changes nothing.".to_string());
            return lines.join("\n");
        }
        lines.push(format!("Changed: {}", sim.changed_fields.join(", ")));

        if !coherence.breaking_changes.is_empty() {
            lines.push("\nBreaking changes:".to_string());
            lines.push(formatter.format_breaking_changes(&coherence.breaking_changes));
        }
        if !sim.side_effects.is_empty() {
            lines.push("\nSide effects:".to_string());
            lines.push(formatter.format_side_effects(&sim.side_effects));
        }

        lines.push("\nRollback plans:".to_string());
        for scenario in &sim.rollback_scenarios {
            lines.push(format!(
                "  - {} ({} steps): {}",
                scenario.name,
                scenario.steps.len(),
                scenario.description
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn run(args: &ImpactArgs, config: &Config, stance: &Stance, patch: &StancePatch) -> ImpactOutput {
    let mut impact_config = config.impact.clone();
    if let Some(threshold) = args.value_threshold {
        impact_config.value_change_threshold = threshold;
    }
    if let Some(threshold) = args.autonomy_threshold {
        impact_config.autonomy_change_threshold = threshold;
    }

    let simulator = ImpactSimulator::new(impact_config);
    ImpactOutput {
        simulation: simulator.simulate(stance, patch),
    }
}

pub fn execute(args: ImpactArgs, config: &Config, json_mode: bool) -> Result<()> {
    let stance: Stance = read_json(&args.stance, "stance")?;
    let patch: StancePatch = read_json(&args.patch, "patch")?;
    let result = run(&args, config, &stance, &patch);
    output(&result, json_mode);
    Ok(())
}

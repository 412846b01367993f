//! Decay forecast CLI command.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use crate::cli::commands::{parse_field_override, read_json};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{
    Config, DecayPrediction, DecayRecommendation, FieldOverride, RefreshEvent, RefreshTrigger,
    Stance,
};
use crate::services::decay_forecaster::shift_by_hours;
use crate::services::DecayForecaster;

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Stance JSON file (`-` for stdin)
    pub stance: PathBuf,

    /// Decay threshold overriding the configured one
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Baseline every field decays toward, instead of the per-field defaults
    #[arg(short, long)]
    pub baseline: Option<f64>,

    /// Hours since the stance was last observed
    #[arg(long, default_value = "0")]
    pub idle_hours: f64,

    /// Refresh a field before forecasting (repeatable), e.g. `curiosity=80`
    #[arg(short, long, value_parser = parse_field_override)]
    pub refresh: Vec<FieldOverride>,
}

#[derive(Debug, Serialize)]
pub struct ForecastOutput {
    pub model_id: Uuid,
    pub threshold: f64,
    pub predictions: Vec<DecayPrediction>,
    pub recommendations: Vec<DecayRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshEvent>,
}

impl CommandOutput for ForecastOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = vec![
            format!("Decay forecast (threshold {:.0})", self.threshold),
            formatter.format_predictions(&self.predictions),
        ];

        if let Some(event) = &self.refresh {
            let fields: Vec<String> = event.fields.iter().map(ToString::to_string).collect();
            lines.push(format!("Refreshed: {}", fields.join(", ")));
        }

        if self.recommendations.is_empty() {
            lines.push("No recommendations; every field holds above threshold.".to_string());
        } else {
            lines.push("\nRecommendations:".to_string());
            lines.push(formatter.format_recommendations(&self.recommendations));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Build a model for the stance and forecast its decay.
pub fn run(args: &ForecastArgs, config: &Config, stance: &Stance) -> Result<ForecastOutput> {
    let mut forecast_config = config.forecast.clone();
    if args.baseline.is_some() {
        forecast_config.baseline = args.baseline;
    }
    let mut forecaster = DecayForecaster::new(&forecast_config);
    if let Some(threshold) = args.threshold {
        forecaster.set_decay_threshold(threshold);
    }

    let now = Utc::now();
    let observed_at = shift_by_hours(now, -args.idle_hours.max(0.0));
    let model_id = forecaster.create_model_at(stance, observed_at);

    let refresh = if args.refresh.is_empty() {
        None
    } else {
        Some(forecaster.execute_refresh_at(
            model_id,
            RefreshTrigger::Manual,
            None,
            &args.refresh,
            now,
        )?)
    };

    let predictions = forecaster.generate_predictions(model_id);
    let recommendations = forecaster.generate_recommendations_at(model_id, now);

    Ok(ForecastOutput {
        model_id,
        threshold: forecaster.decay_threshold(),
        predictions,
        recommendations,
        refresh,
    })
}

pub fn execute(args: ForecastArgs, config: &Config, json_mode: bool) -> Result<()> {
    let stance: Stance = read_json(&args.stance, "stance")?;
    let result = run(&args, config, &stance)?;
    output(&result, json_mode);
    Ok(())
}

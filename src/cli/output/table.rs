//! Table output formatting for CLI commands
//!
//! Provides formatted tables for decay predictions, impact simulations,
//! stance comparisons, and Monte Carlo results using comfy-table.
//! Color is dropped when `NO_COLOR` is set or the terminal is dumb.

use crate::domain::models::{
    BreakingChange, ChangeSeverity, ComparisonWinner, DecayPrediction, DecayRecommendation,
    EffectImpact, RecommendationKind, RecommendationPriority, RiskLevel, RiskTier,
    ScenarioComparison, SensitivityAnalysis, SideEffect, StanceComparison, ValueDimension,
    ValueDistribution,
};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::collections::BTreeMap;
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format per-field decay predictions
    pub fn format_predictions(&self, predictions: &[DecayPrediction]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[
            "Field",
            "Current",
            "Predicted",
            "Hours to threshold",
            "Confidence",
            "Risk",
        ]));

        for prediction in predictions {
            let hours = prediction
                .time_to_threshold
                .map_or_else(|| "-".to_string(), |h| format!("{h:.0}"));
            table.add_row(vec![
                Cell::new(prediction.field.to_string()),
                Cell::new(format!("{:.1}", prediction.current_value)),
                Cell::new(format!("{:.1}", prediction.predicted_value)),
                Cell::new(hours),
                Cell::new(format!("{:.0}%", prediction.confidence * 100.0)),
                self.colored(prediction.risk_level.as_str(), risk_level_color(prediction.risk_level)),
            ]);
        }

        table.to_string()
    }

    pub fn format_recommendations(&self, recommendations: &[DecayRecommendation]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Priority", "Action", "Field", "Gain", "Message"]));

        for rec in recommendations {
            let action = match rec.kind {
                RecommendationKind::Reinforce => "reinforce",
                RecommendationKind::IncreaseUsage => "increase usage",
            };
            let field = rec
                .field
                .map_or_else(|| "-".to_string(), |f| f.to_string());
            table.add_row(vec![
                self.colored(rec.priority.as_str(), priority_color(rec.priority)),
                Cell::new(action),
                Cell::new(field),
                Cell::new(format!("{:+.1}", rec.expected_improvement)),
                Cell::new(super::truncate(&rec.message, 60)),
            ]);
        }

        table.to_string()
    }

    pub fn format_breaking_changes(&self, changes: &[BreakingChange]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Severity", "Field", "Description"]));

        for change in changes {
            let (label, color) = match change.severity {
                ChangeSeverity::Warning => ("warning", Color::Yellow),
                ChangeSeverity::Error => ("error", Color::Red),
            };
            table.add_row(vec![
                self.colored(label, color),
                Cell::new(&change.field),
                Cell::new(&change.description),
            ]);
        }

        table.to_string()
    }

    pub fn format_side_effects(&self, effects: &[SideEffect]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Kind", "Probability", "Impact", "Description"]));

        for effect in effects {
            let (label, color) = match effect.impact {
                EffectImpact::Positive => ("positive", Color::Green),
                EffectImpact::Neutral => ("neutral", Color::White),
                EffectImpact::Negative => ("negative", Color::Red),
            };
            table.add_row(vec![
                Cell::new(effect.kind.as_str()),
                Cell::new(format!("{:.0}%", effect.probability * 100.0)),
                self.colored(label, color),
                Cell::new(&effect.description),
            ]);
        }

        table.to_string()
    }

    /// Format the per-criterion breakdown of a stance comparison
    pub fn format_comparison(&self, comparison: &StanceComparison) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Criterion", "Weight", "A", "B", "Winner"]));

        for criterion in &comparison.criteria {
            table.add_row(vec![
                Cell::new(&criterion.name),
                Cell::new(format!("{:.2}", criterion.weight)),
                Cell::new(format!("{:.1}", criterion.score_a)),
                Cell::new(format!("{:.1}", criterion.score_b)),
                self.colored(winner_label(criterion.winner), winner_color(criterion.winner)),
            ]);
        }
        table.add_row(vec![
            Cell::new("total").add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(format!("{:.2}", comparison.weighted_score_a)),
            Cell::new(format!("{:.2}", comparison.weighted_score_b)),
            self.colored(winner_label(comparison.winner), winner_color(comparison.winner))
                .add_attribute(Attribute::Bold),
        ]);

        table.to_string()
    }

    pub fn format_value_distributions(
        &self,
        distributions: &BTreeMap<ValueDimension, ValueDistribution>,
    ) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Value", "Mean", "Std dev", "Min", "P25", "P50", "P75", "Max"]));

        for (dimension, dist) in distributions {
            table.add_row(vec![
                Cell::new(dimension.as_str()),
                Cell::new(format!("{:.1}", dist.mean)),
                Cell::new(format!("{:.2}", dist.std_dev)),
                Cell::new(format!("{:.1}", dist.min)),
                Cell::new(format!("{:.1}", dist.p25)),
                Cell::new(format!("{:.1}", dist.p50)),
                Cell::new(format!("{:.1}", dist.p75)),
                Cell::new(format!("{:.1}", dist.max)),
            ]);
        }

        table.to_string()
    }

    pub fn format_scenarios(&self, scenarios: &[ScenarioComparison]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Scenario", "Rank", "Probability", "Drift", "Coherence", "Frame"]));

        for scenario in scenarios {
            table.add_row(vec![
                Cell::new(&scenario.name).add_attribute(Attribute::Bold),
                Cell::new(scenario.rank),
                Cell::new(format!("{:.4}", scenario.probability)),
                Cell::new(format!("{:.1}", scenario.total_drift)),
                Cell::new(format!("{:.1}", scenario.final_coherence)),
                Cell::new(scenario.final_stance.frame.as_str()),
            ]);
        }

        table.to_string()
    }

    /// Format a parameter sweep, one row per sampled value
    pub fn format_sensitivity(&self, analysis: &SensitivityAnalysis) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Parameter", "Value", "Mean coherence", "Sensitivity", "Critical at"]));

        for parameter in &analysis.parameters {
            let critical = parameter
                .critical_threshold
                .map_or_else(|| "-".to_string(), |v| format!("{v}"));
            for (i, point) in parameter.points.iter().enumerate() {
                let first = i == 0;
                table.add_row(vec![
                    Cell::new(if first { parameter.parameter.as_str() } else { "" }),
                    Cell::new(format!("{}", point.value)),
                    Cell::new(format!("{:.1}", point.mean_coherence)),
                    Cell::new(if first {
                        format!("{:.3}", parameter.sensitivity)
                    } else {
                        String::new()
                    }),
                    Cell::new(if first { critical.as_str() } else { "" }),
                ]);
            }
        }

        table.to_string()
    }

    pub fn risk_tier_cell(&self, tier: RiskTier) -> Cell {
        self.colored(tier.as_str(), risk_tier_color(tier))
    }

    fn colored(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if the terminal supports colors
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn risk_level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::None => Color::Green,
        RiskLevel::Low => Color::Cyan,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Magenta,
        RiskLevel::Critical => Color::Red,
    }
}

fn risk_tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::Low => Color::Green,
        RiskTier::Moderate => Color::Yellow,
        RiskTier::High => Color::Magenta,
        RiskTier::Critical => Color::Red,
    }
}

fn priority_color(priority: RecommendationPriority) -> Color {
    match priority {
        RecommendationPriority::Low => Color::DarkGrey,
        RecommendationPriority::Medium => Color::Yellow,
        RecommendationPriority::High => Color::Magenta,
        RecommendationPriority::Urgent => Color::Red,
    }
}

fn winner_label(winner: ComparisonWinner) -> &'static str {
    match winner {
        ComparisonWinner::A => "A",
        ComparisonWinner::B => "B",
        ComparisonWinner::Tie => "tie",
    }
}

fn winner_color(winner: ComparisonWinner) -> Color {
    match winner {
        ComparisonWinner::A | ComparisonWinner::B => Color::Green,
        ComparisonWinner::Tie => Color::DarkGrey,
    }
}

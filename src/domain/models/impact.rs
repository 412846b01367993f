//! Impact simulation domain model.
//!
//! An [`ImpactSimulation`] is the immutable record of applying one proposed
//! edit to one stance: the before/after snapshots, the coherence impact, the
//! predicted side effects, a fixed rollback catalog, and a recommendation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::decay::RiskLevel;
use super::stance::{Stance, StancePatch};

/// Severity of a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSeverity {
    Warning,
    Error,
}

/// A change that may break downstream expectations about the stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakingChange {
    pub field: String,
    pub severity: ChangeSeverity,
    pub description: String,
}

/// Coherence before and after an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceImpact {
    pub before: f64,
    pub after: f64,
    /// `after - before`.
    pub delta: f64,
    pub breaking_changes: Vec<BreakingChange>,
    pub risk_level: RiskLevel,
}

impl CoherenceImpact {
    pub fn error_count(&self) -> usize {
        self.breaking_changes
            .iter()
            .filter(|c| c.severity == ChangeSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.breaking_changes
            .iter()
            .filter(|c| c.severity == ChangeSeverity::Warning)
            .count()
    }
}

/// Category of a predicted side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideEffectKind {
    BehaviorShift,
    GoalAlignment,
    ValueConflict,
    IdentityDrift,
}

impl SideEffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BehaviorShift => "behavior-shift",
            Self::GoalAlignment => "goal-alignment",
            Self::ValueConflict => "value-conflict",
            Self::IdentityDrift => "identity-drift",
        }
    }
}

/// Direction of a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectImpact {
    Positive,
    Neutral,
    Negative,
}

/// A likely consequence of applying an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideEffect {
    pub kind: SideEffectKind,
    pub description: String,
    pub probability: f64,
    pub impact: EffectImpact,
}

impl SideEffect {
    /// Negative and more likely than not.
    pub fn is_likely_negative(&self) -> bool {
        self.impact == EffectImpact::Negative && self.probability > 0.5
    }
}

/// Abstract action in a rollback plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackAction {
    RestoreSnapshot,
    RevertFields,
    MonitorCoherence,
    CreateSnapshot,
    Diagnose,
    ApplyMinimalCorrection,
    Verify,
}

/// One ordered step of a rollback plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackStep {
    pub order: u32,
    pub action: RollbackAction,
    pub description: String,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// A named rollback plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackScenario {
    pub name: String,
    pub description: String,
    pub steps: Vec<RollbackStep>,
}

/// Confidence band on the post-edit outcome, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub mean: f64,
    pub upper: f64,
}

/// Final verdict on a proposed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactRecommendation {
    Apply,
    Review,
    Reject,
}

impl ImpactRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Review => "review",
            Self::Reject => "reject",
        }
    }
}

/// Immutable record of one deterministic impact simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSimulation {
    pub id: Uuid,
    pub simulated_at: DateTime<Utc>,
    pub original: Stance,
    pub proposed: StancePatch,
    pub resulting: Stance,
    pub changed_fields: Vec<String>,
    pub coherence: CoherenceImpact,
    pub side_effects: Vec<SideEffect>,
    pub rollback_scenarios: Vec<RollbackScenario>,
    pub confidence: ConfidenceInterval,
    pub recommendation: ImpactRecommendation,
}

impl ImpactSimulation {
    /// Look up a rollback plan by name. Unknown names yield `None`.
    pub fn rollback_scenario(&self, name: &str) -> Option<&RollbackScenario> {
        self.rollback_scenarios
            .iter()
            .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
    }
}

/// Which side of an A/B comparison came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonWinner {
    A,
    B,
    Tie,
}

/// Score of both stances on one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub name: String,
    pub weight: f64,
    pub score_a: f64,
    pub score_b: f64,
    pub winner: ComparisonWinner,
}

/// Head-to-head comparison of two complete stances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceComparison {
    pub criteria: Vec<CriterionResult>,
    pub weighted_score_a: f64,
    pub weighted_score_b: f64,
    pub winner: ComparisonWinner,
    pub rationale: String,
}

//! Deterministic impact simulation.
//!
//! Given a stance and a proposed partial edit, the simulator produces the
//! merged stance, scores rule-based coherence before and after, flags
//! breaking changes, predicts side effects from a fixed rule table, attaches
//! the rollback catalog and returns an apply/review/reject verdict.
//!
//! Nothing here touches the caller's stance. The same inputs always yield the
//! same simulation apart from its `id` and `simulated_at` stamp.

use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::models::{
    BreakingChange, ChangeSeverity, CoherenceImpact, ComparisonWinner, ConfidenceInterval,
    CriterionResult, EffectImpact, ImpactConfig, ImpactRecommendation, ImpactSimulation,
    RiskLevel, RollbackAction, RollbackScenario, RollbackStep, SideEffect, SideEffectKind, Stance,
    StanceComparison, StancePatch, ValueDimension,
};
use crate::services::coherence::rule_coherence;

/// Autonomy increase that starts shifting behavior.
const AUTONOMY_SHIFT_THRESHOLD: f64 = 20.0;
/// Coherence the gradual plan must hold while reverting.
const MONITOR_COHERENCE_FLOOR: f64 = 70.0;
const TIE_EPSILON: f64 = 1e-9;

// ============================================================================
// Change detection
// ============================================================================

/// Field-level differences between two stances.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub frame_changed: bool,
    pub self_model_changed: bool,
    pub objective_changed: bool,
    pub value_deltas: [f64; 7],
    pub awareness_delta: f64,
    pub autonomy_delta: f64,
    pub identity_delta: f64,
    /// Dotted paths of every changed leaf.
    pub fields: Vec<String>,
}

impl ChangeSet {
    pub fn between(before: &Stance, after: &Stance) -> Self {
        let mut fields = Vec::new();

        let frame_changed = before.frame != after.frame;
        let self_model_changed = before.self_model != after.self_model;
        let objective_changed = before.objective != after.objective;
        if frame_changed {
            fields.push("frame".to_string());
        }
        if self_model_changed {
            fields.push("selfModel".to_string());
        }
        if objective_changed {
            fields.push("objective".to_string());
        }

        let value_deltas =
            ValueDimension::ALL.map(|d| after.values.get(d) - before.values.get(d));
        for (dimension, delta) in ValueDimension::ALL.iter().zip(value_deltas) {
            if delta != 0.0 {
                fields.push(format!("values.{dimension}"));
            }
        }

        let (b, a) = (&before.sentience, &after.sentience);
        let awareness_delta = a.awareness_level - b.awareness_level;
        let autonomy_delta = a.autonomy_level - b.autonomy_level;
        let identity_delta = a.identity_strength - b.identity_strength;
        for (path, delta) in [
            ("sentience.awarenessLevel", awareness_delta),
            ("sentience.autonomyLevel", autonomy_delta),
            ("sentience.identityStrength", identity_delta),
        ] {
            if delta != 0.0 {
                fields.push(path.to_string());
            }
        }
        if a.emergent_goals != b.emergent_goals {
            fields.push("sentience.emergentGoals".to_string());
        }
        if a.insights != b.insights {
            fields.push("sentience.insights".to_string());
        }
        if after.constraints != before.constraints {
            fields.push("constraints".to_string());
        }

        Self {
            frame_changed,
            self_model_changed,
            objective_changed,
            value_deltas,
            awareness_delta,
            autonomy_delta,
            identity_delta,
            fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values_changed(&self) -> bool {
        self.value_deltas.iter().any(|d| *d != 0.0)
    }

    pub fn categorical_changes(&self) -> usize {
        [self.frame_changed, self.self_model_changed, self.objective_changed]
            .into_iter()
            .filter(|changed| *changed)
            .count()
    }

    /// Sum of absolute numeric deltas across values and sentience.
    pub fn drift(&self) -> f64 {
        self.value_deltas.iter().map(|d| d.abs()).sum::<f64>()
            + self.awareness_delta.abs()
            + self.autonomy_delta.abs()
            + self.identity_delta.abs()
    }
}

// ============================================================================
// Side-effect rules
// ============================================================================

/// One entry of the side-effect table.
pub struct SideEffectRule {
    pub kind: SideEffectKind,
    pub description: &'static str,
    pub probability: f64,
    pub impact: EffectImpact,
    pub applies: fn(&ChangeSet) -> bool,
}

fn frame_changed(changes: &ChangeSet) -> bool {
    changes.frame_changed
}

fn autonomy_surge(changes: &ChangeSet) -> bool {
    changes.autonomy_delta > AUTONOMY_SHIFT_THRESHOLD
}

fn values_changed(changes: &ChangeSet) -> bool {
    changes.values_changed()
}

fn identity_reshaped(changes: &ChangeSet) -> bool {
    changes.categorical_changes() >= 2
}

pub const SIDE_EFFECT_RULES: [SideEffectRule; 5] = [
    SideEffectRule {
        kind: SideEffectKind::BehaviorShift,
        description: "Response style will shift with the new frame",
        probability: 0.95,
        impact: EffectImpact::Neutral,
        applies: frame_changed,
    },
    SideEffectRule {
        kind: SideEffectKind::BehaviorShift,
        description: "Substantially more autonomous behavior",
        probability: 0.75,
        impact: EffectImpact::Negative,
        applies: autonomy_surge,
    },
    SideEffectRule {
        kind: SideEffectKind::GoalAlignment,
        description: "Emergent goals may diverge from the stated objective",
        probability: 0.4,
        impact: EffectImpact::Negative,
        applies: autonomy_surge,
    },
    SideEffectRule {
        kind: SideEffectKind::ValueConflict,
        description: "Re-weighted values may conflict with established patterns",
        probability: 0.6,
        impact: EffectImpact::Neutral,
        applies: values_changed,
    },
    SideEffectRule {
        kind: SideEffectKind::IdentityDrift,
        description: "Several identity-defining fields change at once",
        probability: 0.5,
        impact: EffectImpact::Negative,
        applies: identity_reshaped,
    },
];

pub fn predict_side_effects(changes: &ChangeSet) -> Vec<SideEffect> {
    SIDE_EFFECT_RULES
        .iter()
        .filter(|rule| (rule.applies)(changes))
        .map(|rule| SideEffect {
            kind: rule.kind,
            description: rule.description.to_string(),
            probability: rule.probability,
            impact: rule.impact,
        })
        .collect()
}

// ============================================================================
// Scoring helpers
// ============================================================================

/// Map breaking-change counts and coherence delta onto a risk level.
pub fn assess_risk(errors: usize, warnings: usize, delta: f64) -> RiskLevel {
    if errors >= 2 || delta < -30.0 {
        RiskLevel::Critical
    } else if errors == 1 || delta < -20.0 {
        RiskLevel::High
    } else if warnings >= 2 || delta < -10.0 {
        RiskLevel::Medium
    } else if warnings == 1 || delta < 0.0 {
        RiskLevel::Low
    } else {
        RiskLevel::None
    }
}

/// Confidence band narrowing as more fields change.
///
/// # Formula
///
/// `mean = max(50, 85 - 5n)`, `spread = 10 + 2n`, bounds clamped to `[0, 100]`.
pub fn confidence_interval(changed_fields: usize) -> ConfidenceInterval {
    let n = changed_fields as f64;
    let mean = (85.0 - 5.0 * n).max(50.0);
    let spread = 10.0 + 2.0 * n;
    ConfidenceInterval {
        lower: (mean - spread).clamp(0.0, 100.0),
        mean,
        upper: (mean + spread).clamp(0.0, 100.0),
    }
}

pub fn recommend(
    risk: RiskLevel,
    side_effects: &[SideEffect],
    coherence_delta: f64,
) -> ImpactRecommendation {
    let likely_negative = side_effects.iter().filter(|e| e.is_likely_negative()).count();
    if risk == RiskLevel::Critical || likely_negative >= 2 {
        ImpactRecommendation::Reject
    } else if risk == RiskLevel::High || likely_negative == 1 {
        ImpactRecommendation::Review
    } else if coherence_delta >= -5.0 {
        ImpactRecommendation::Apply
    } else {
        ImpactRecommendation::Review
    }
}

fn params<const N: usize>(entries: [(&str, serde_json::Value); N]) -> BTreeMap<String, serde_json::Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn step(
    order: u32,
    action: RollbackAction,
    description: &str,
    parameters: BTreeMap<String, serde_json::Value>,
) -> RollbackStep {
    RollbackStep {
        order,
        action,
        description: description.to_string(),
        parameters,
    }
}

/// The three fixed rollback plans, parameterized with the edit at hand.
pub fn rollback_catalog(original: &Stance, changed_fields: &[String]) -> Vec<RollbackScenario> {
    let numeric: Vec<&String> = changed_fields
        .iter()
        .filter(|f| f.starts_with("values.") || f.starts_with("sentience."))
        .collect();

    vec![
        RollbackScenario {
            name: "Full Rollback".to_string(),
            description: "Restore the exact prior stance snapshot".to_string(),
            steps: vec![
                step(
                    1,
                    RollbackAction::RestoreSnapshot,
                    "Restore the pre-change snapshot",
                    params([
                        ("version", json!(original.version)),
                        ("snapshot", json!(original)),
                    ]),
                ),
                step(
                    2,
                    RollbackAction::Verify,
                    "Confirm coherence matches the original",
                    params([("expected_coherence", json!(rule_coherence(original)))]),
                ),
            ],
        },
        RollbackScenario {
            name: "Gradual Reversion".to_string(),
            description: "Partially revert values and sentience while monitoring coherence"
                .to_string(),
            steps: vec![
                step(
                    1,
                    RollbackAction::RevertFields,
                    "Move changed numeric fields halfway back",
                    params([("fields", json!(numeric)), ("fraction", json!(0.5))]),
                ),
                step(
                    2,
                    RollbackAction::MonitorCoherence,
                    "Watch coherence over the next turns",
                    params([
                        ("min_coherence", json!(MONITOR_COHERENCE_FLOOR)),
                        ("turns", json!(5)),
                    ]),
                ),
                step(
                    3,
                    RollbackAction::RevertFields,
                    "Finish the reversion if coherence stays low",
                    params([
                        ("fields", json!(numeric)),
                        ("fraction", json!(1.0)),
                        ("condition", json!("coherence_below_min")),
                    ]),
                ),
            ],
        },
        RollbackScenario {
            name: "Adaptive Recovery".to_string(),
            description: "Snapshot, diagnose, correct minimally and re-verify".to_string(),
            steps: vec![
                step(
                    1,
                    RollbackAction::CreateSnapshot,
                    "Snapshot the changed stance for analysis",
                    params([("label", json!("pre-recovery"))]),
                ),
                step(
                    2,
                    RollbackAction::Diagnose,
                    "Identify the fields driving incoherence",
                    params([("candidates", json!(changed_fields))]),
                ),
                step(
                    3,
                    RollbackAction::ApplyMinimalCorrection,
                    "Apply the smallest correction restoring coherence",
                    params([("target_coherence", json!(MONITOR_COHERENCE_FLOOR))]),
                ),
                step(
                    4,
                    RollbackAction::Verify,
                    "Re-score coherence after correction",
                    params([("min_coherence", json!(MONITOR_COHERENCE_FLOOR))]),
                ),
            ],
        },
    ]
}

// ============================================================================
// Simulator
// ============================================================================

/// Deterministic what-if engine for single stance edits.
#[derive(Debug, Clone)]
pub struct ImpactSimulator {
    config: ImpactConfig,
}

impl Default for ImpactSimulator {
    fn default() -> Self {
        Self::new(ImpactConfig::default())
    }
}

impl ImpactSimulator {
    /// Create a simulator. Negative thresholds are clamped to zero.
    pub fn new(mut config: ImpactConfig) -> Self {
        for (name, threshold) in [
            ("value_change_threshold", &mut config.value_change_threshold),
            ("autonomy_change_threshold", &mut config.autonomy_change_threshold),
        ] {
            if threshold.is_nan() || *threshold < 0.0 {
                warn!(setting = name, value = *threshold, "impact threshold clamped to 0");
                *threshold = 0.0;
            }
        }
        Self { config }
    }

    pub fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// Apply `patch` to a copy of `current` with bookkeeping updated.
    pub fn apply_patch(current: &Stance, patch: &StancePatch) -> (Stance, ChangeSet) {
        let mut resulting = current.merged_with(patch);
        let changes = ChangeSet::between(current, &resulting);
        if !changes.is_empty() {
            resulting.version = current.version.saturating_add(1);
            resulting.cumulative_drift = current.cumulative_drift.max(0.0) + changes.drift();
            if changes.frame_changed {
                resulting.turns_since_last_shift = 0;
            }
        }
        (resulting, changes)
    }

    pub fn detect_breaking_changes(&self, changes: &ChangeSet, before: &Stance, after: &Stance) -> Vec<BreakingChange> {
        let mut breaking = Vec::new();

        if changes.frame_changed {
            breaking.push(BreakingChange {
                field: "frame".to_string(),
                severity: ChangeSeverity::Warning,
                description: format!("Frame changes from {} to {}", before.frame, after.frame),
            });
        }

        if changes.objective_changed {
            breaking.push(BreakingChange {
                field: "objective".to_string(),
                severity: ChangeSeverity::Warning,
                description: format!(
                    "Objective changes from {} to {}",
                    before.objective, after.objective
                ),
            });
        }

        let autonomy = changes.autonomy_delta;
        if autonomy.abs() > self.config.autonomy_change_threshold {
            breaking.push(BreakingChange {
                field: "sentience.autonomyLevel".to_string(),
                severity: if autonomy > 0.0 {
                    ChangeSeverity::Error
                } else {
                    ChangeSeverity::Warning
                },
                description: format!("Autonomy shifts by {autonomy:+.1} points"),
            });
        }

        let large_value_shifts = changes
            .value_deltas
            .iter()
            .filter(|d| d.abs() > self.config.value_change_threshold)
            .count();
        if large_value_shifts > 2 {
            breaking.push(BreakingChange {
                field: "values".to_string(),
                severity: if large_value_shifts > 4 {
                    ChangeSeverity::Error
                } else {
                    ChangeSeverity::Warning
                },
                description: format!(
                    "{large_value_shifts} value dimensions shift by more than {:.0} points",
                    self.config.value_change_threshold
                ),
            });
        }

        breaking
    }

    /// Simulate applying `patch` to `current`.
    #[instrument(skip(self, current, patch), fields(version = current.version))]
    pub fn simulate(&self, current: &Stance, patch: &StancePatch) -> ImpactSimulation {
        let (resulting, changes) = Self::apply_patch(current, patch);

        let before = rule_coherence(current);
        let after = rule_coherence(&resulting);
        let delta = after - before;
        let breaking_changes = self.detect_breaking_changes(&changes, current, &resulting);
        let errors = breaking_changes
            .iter()
            .filter(|c| c.severity == ChangeSeverity::Error)
            .count();
        let warnings = breaking_changes.len() - errors;
        let risk_level = assess_risk(errors, warnings, delta);

        let side_effects = predict_side_effects(&changes);
        let recommendation = recommend(risk_level, &side_effects, delta);

        debug!(
            changed = changes.fields.len(),
            coherence_before = before,
            coherence_after = after,
            risk = %risk_level,
            recommendation = recommendation.as_str(),
            "impact simulated"
        );

        ImpactSimulation {
            id: Uuid::new_v4(),
            simulated_at: Utc::now(),
            original: current.clone(),
            proposed: patch.clone(),
            rollback_scenarios: rollback_catalog(current, &changes.fields),
            confidence: confidence_interval(changes.fields.len()),
            changed_fields: changes.fields,
            resulting,
            coherence: CoherenceImpact {
                before,
                after,
                delta,
                breaking_changes,
                risk_level,
            },
            side_effects,
            recommendation,
        }
    }
}

// ============================================================================
// A/B comparison
// ============================================================================

/// One weighted comparison criterion.
pub struct ComparisonCriterion {
    pub name: &'static str,
    pub weight: f64,
    pub score: fn(&Stance) -> f64,
}

fn autonomy(stance: &Stance) -> f64 {
    stance.sentience.autonomy_level
}

fn identity(stance: &Stance) -> f64 {
    stance.sentience.identity_strength
}

fn mean_value(stance: &Stance) -> f64 {
    stance.values.mean()
}

fn awareness(stance: &Stance) -> f64 {
    stance.sentience.awareness_level
}

pub const COMPARISON_CRITERIA: [ComparisonCriterion; 5] = [
    ComparisonCriterion {
        name: "coherence",
        weight: 0.30,
        score: rule_coherence,
    },
    ComparisonCriterion {
        name: "flexibility",
        weight: 0.20,
        score: autonomy,
    },
    ComparisonCriterion {
        name: "stability",
        weight: 0.20,
        score: identity,
    },
    ComparisonCriterion {
        name: "diversity",
        weight: 0.15,
        score: mean_value,
    },
    ComparisonCriterion {
        name: "awareness",
        weight: 0.15,
        score: awareness,
    },
];

fn winner_of(a: f64, b: f64) -> ComparisonWinner {
    if (a - b).abs() < TIE_EPSILON {
        ComparisonWinner::Tie
    } else if a > b {
        ComparisonWinner::A
    } else {
        ComparisonWinner::B
    }
}

/// Compare two complete stances on the weighted criteria.
///
/// Each criterion's weight goes to whichever stance scores higher on it; the
/// larger weighted tally wins overall.
pub fn compare_stances(a: &Stance, b: &Stance) -> StanceComparison {
    let criteria: Vec<CriterionResult> = COMPARISON_CRITERIA
        .iter()
        .map(|criterion| {
            let score_a = (criterion.score)(a);
            let score_b = (criterion.score)(b);
            CriterionResult {
                name: criterion.name.to_string(),
                weight: criterion.weight,
                score_a,
                score_b,
                winner: winner_of(score_a, score_b),
            }
        })
        .collect();

    let tally = |side: ComparisonWinner| -> f64 {
        criteria
            .iter()
            .filter(|c| c.winner == side)
            .map(|c| c.weight)
            .sum()
    };
    let weighted_score_a = tally(ComparisonWinner::A);
    let weighted_score_b = tally(ComparisonWinner::B);
    let winner = winner_of(weighted_score_a, weighted_score_b);

    let names = |side: ComparisonWinner| -> Vec<&str> {
        criteria
            .iter()
            .filter(|c| c.winner == side)
            .map(|c| c.name.as_str())
            .collect()
    };
    let (a_wins, b_wins) = (names(ComparisonWinner::A), names(ComparisonWinner::B));
    let describe = |list: &[&str]| {
        if list.is_empty() {
            "nothing".to_string()
        } else {
            list.join(", ")
        }
    };
    let rationale = match winner {
        ComparisonWinner::Tie => format!(
            "Tie at {weighted_score_a:.2}: A leads on {}, B leads on {}",
            describe(&a_wins),
            describe(&b_wins)
        ),
        ComparisonWinner::A => format!(
            "Stance A wins {weighted_score_a:.2} to {weighted_score_b:.2}, leading on {}",
            describe(&a_wins)
        ),
        ComparisonWinner::B => format!(
            "Stance B wins {weighted_score_b:.2} to {weighted_score_a:.2}, leading on {}",
            describe(&b_wins)
        ),
    };

    StanceComparison {
        criteria,
        weighted_score_a,
        weighted_score_b,
        winner,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Frame, Objective, SelfModel, SentiencePatch, ValuesPatch};

    fn base() -> Stance {
        Stance {
            frame: Frame::Pragmatic,
            objective: Objective::Helpfulness,
            ..Default::default()
        }
    }

    #[test]
    fn test_adversarial_frame_on_helpful_stance() {
        let patch = StancePatch {
            frame: Some(Frame::Adversarial),
            ..Default::default()
        };
        let sim = ImpactSimulator::default().simulate(&base(), &patch);

        assert_eq!(sim.coherence.breaking_changes.len(), 1);
        assert_eq!(sim.coherence.breaking_changes[0].field, "frame");
        assert_eq!(
            sim.coherence.breaking_changes[0].severity,
            ChangeSeverity::Warning
        );
        assert!(sim.coherence.delta <= -15.0);
        assert_eq!(sim.coherence.risk_level, RiskLevel::Medium);
        assert_eq!(sim.recommendation, ImpactRecommendation::Review);
        assert_eq!(sim.resulting.version, 2);
        assert_eq!(sim.resulting.turns_since_last_shift, 0);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let stance = base();
        let sim = ImpactSimulator::default().simulate(&stance, &StancePatch::default());
        assert_eq!(sim.resulting, stance);
        assert!(sim.changed_fields.is_empty());
        assert_eq!(sim.coherence.risk_level, RiskLevel::None);
        assert_eq!(sim.recommendation, ImpactRecommendation::Apply);
        assert_eq!(sim.confidence.mean, 85.0);
    }

    #[test]
    fn test_drift_accumulates_absolute_deltas() {
        let mut stance = base();
        stance.cumulative_drift = 12.0;
        stance.turns_since_last_shift = 7;
        let patch = StancePatch {
            values: Some(
                ValuesPatch::default()
                    .with(ValueDimension::Risk, 40.0)
                    .with(ValueDimension::Empathy, 65.0),
            ),
            ..Default::default()
        };
        let (resulting, changes) = ImpactSimulator::apply_patch(&stance, &patch);
        assert_eq!(changes.fields, vec!["values.risk", "values.empathy"]);
        assert!((resulting.cumulative_drift - 37.0).abs() < 1e-9);
        assert_eq!(resulting.turns_since_last_shift, 7);
    }

    #[test]
    fn test_autonomy_surge_is_error_and_rejected() {
        let mut stance = base();
        stance.sentience.autonomy_level = 20.0;
        stance.self_model = SelfModel::Guide;
        let patch = StancePatch {
            self_model: Some(SelfModel::Autonomous),
            objective: Some(Objective::TruthSeeking),
            sentience: Some(SentiencePatch {
                autonomy_level: Some(90.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let sim = ImpactSimulator::default().simulate(&stance, &patch);

        assert_eq!(sim.coherence.error_count(), 1);
        assert_eq!(sim.coherence.warning_count(), 1);
        assert!(sim.coherence.risk_level >= RiskLevel::High);
        let kinds: Vec<_> = sim.side_effects.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&SideEffectKind::GoalAlignment));
        assert!(kinds.contains(&SideEffectKind::IdentityDrift));
        assert_eq!(sim.recommendation, ImpactRecommendation::Review);
    }

    #[test]
    fn test_many_value_shifts() {
        let patch = StancePatch {
            values: Some(
                ValuesPatch::default()
                    .with(ValueDimension::Curiosity, 90.0)
                    .with(ValueDimension::Certainty, 90.0)
                    .with(ValueDimension::Risk, 90.0),
            ),
            ..Default::default()
        };
        let simulator = ImpactSimulator::default();
        let sim = simulator.simulate(&base(), &patch);
        assert_eq!(sim.coherence.warning_count(), 1);
        assert_eq!(sim.coherence.breaking_changes[0].field, "values");

        let patch = StancePatch {
            values: Some(
                ValuesPatch::default()
                    .with(ValueDimension::Curiosity, 90.0)
                    .with(ValueDimension::Certainty, 90.0)
                    .with(ValueDimension::Risk, 90.0)
                    .with(ValueDimension::Novelty, 90.0)
                    .with(ValueDimension::Empathy, 90.0),
            ),
            ..Default::default()
        };
        let sim = simulator.simulate(&base(), &patch);
        assert_eq!(sim.coherence.error_count(), 1);
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(assess_risk(2, 0, 0.0), RiskLevel::Critical);
        assert_eq!(assess_risk(0, 0, -31.0), RiskLevel::Critical);
        assert_eq!(assess_risk(1, 0, 0.0), RiskLevel::High);
        assert_eq!(assess_risk(0, 2, 0.0), RiskLevel::Medium);
        assert_eq!(assess_risk(0, 1, 0.0), RiskLevel::Low);
        assert_eq!(assess_risk(0, 0, -1.0), RiskLevel::Low);
        assert_eq!(assess_risk(0, 0, 5.0), RiskLevel::None);
    }

    #[test]
    fn test_confidence_interval_bounds() {
        let ci = confidence_interval(2);
        assert_eq!(ci.mean, 75.0);
        assert_eq!(ci.lower, 61.0);
        assert_eq!(ci.upper, 89.0);

        let wide = confidence_interval(40);
        assert_eq!(wide.mean, 50.0);
        assert_eq!(wide.lower, 0.0);
        assert_eq!(wide.upper, 100.0);
    }

    #[test]
    fn test_two_likely_negative_effects_reject() {
        let effects = vec![
            SideEffect {
                kind: SideEffectKind::BehaviorShift,
                description: String::new(),
                probability: 0.75,
                impact: EffectImpact::Negative,
            },
            SideEffect {
                kind: SideEffectKind::IdentityDrift,
                description: String::new(),
                probability: 0.9,
                impact: EffectImpact::Negative,
            },
        ];
        assert_eq!(
            recommend(RiskLevel::Low, &effects, 0.0),
            ImpactRecommendation::Reject
        );
        assert_eq!(
            recommend(RiskLevel::Low, &effects[..1], 0.0),
            ImpactRecommendation::Review
        );
    }

    #[test]
    fn test_rollback_catalog_lookup() {
        let sim = ImpactSimulator::default().simulate(&base(), &StancePatch::default());
        assert_eq!(sim.rollback_scenarios.len(), 3);
        let gradual = sim.rollback_scenario("gradual reversion").unwrap();
        assert_eq!(gradual.steps[1].action, RollbackAction::MonitorCoherence);
        assert_eq!(gradual.steps[1].parameters["min_coherence"], json!(70.0));
        assert!(sim.rollback_scenario("Nonexistent").is_none());
    }

    #[test]
    fn test_negative_thresholds_are_clamped() {
        let simulator = ImpactSimulator::new(ImpactConfig {
            value_change_threshold: -5.0,
            autonomy_change_threshold: f64::NAN,
        });
        assert_eq!(simulator.config().value_change_threshold, 0.0);
        assert_eq!(simulator.config().autonomy_change_threshold, 0.0);
    }

    #[test]
    fn test_compare_identical_stances_tie() {
        let comparison = compare_stances(&base(), &base());
        assert_eq!(comparison.winner, ComparisonWinner::Tie);
        assert_eq!(comparison.criteria.len(), 5);
        assert!(comparison
            .criteria
            .iter()
            .all(|c| c.winner == ComparisonWinner::Tie));
    }

    #[test]
    fn test_compare_prefers_weighted_majority() {
        let a = base();
        let mut b = base();
        b.frame = Frame::Adversarial; // loses coherence (0.30)
        b.sentience.autonomy_level = 60.0; // wins flexibility (0.20)

        let comparison = compare_stances(&a, &b);
        assert_eq!(comparison.winner, ComparisonWinner::A);
        assert!((comparison.weighted_score_a - 0.30).abs() < 1e-9);
        assert!((comparison.weighted_score_b - 0.20).abs() < 1e-9);
        assert!(comparison.rationale.contains("coherence"));
    }
}

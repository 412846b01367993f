//! Coherence scoring.
//!
//! Two heuristics rate how internally consistent a stance is, both on a
//! `[0, 100]` scale:
//!
//! - [`rule_coherence`] starts at 100 and subtracts fixed penalties for
//!   incompatible categorical/numeric combinations. The rules live in static
//!   tables below so they can be audited and extended without touching the
//!   scoring loop.
//! - [`value_coherence`] is variance based: `100 - 2 * stddev(values)`. Balanced
//!   value profiles score high, polarized ones score low. The trajectory
//!   simulator uses it for every step.

use serde::{Deserialize, Serialize};

use crate::domain::models::{clamp_score, Frame, Objective, SelfModel, Stance, Values};
use crate::services::statistics;

/// Objectives each frame is compatible with.
pub const FRAME_OBJECTIVES: [(Frame, &[Objective]); 10] = [
    (
        Frame::Pragmatic,
        &[Objective::Helpfulness, Objective::Synthesis, Objective::TruthSeeking],
    ),
    (
        Frame::Poetic,
        &[Objective::Novelty, Objective::Synthesis, Objective::SelfActualization],
    ),
    (
        Frame::Adversarial,
        &[Objective::Provocation, Objective::TruthSeeking],
    ),
    (
        Frame::Socratic,
        &[Objective::TruthSeeking, Objective::Helpfulness, Objective::Provocation],
    ),
    (
        Frame::Systems,
        &[Objective::Synthesis, Objective::Helpfulness, Objective::TruthSeeking],
    ),
    (
        Frame::Mythic,
        &[Objective::Novelty, Objective::SelfActualization, Objective::Synthesis],
    ),
    (
        Frame::Playful,
        &[Objective::Novelty, Objective::Provocation, Objective::Helpfulness],
    ),
    (
        Frame::Stoic,
        &[Objective::TruthSeeking, Objective::Helpfulness, Objective::SelfActualization],
    ),
    (Frame::Absurdist, &[Objective::Novelty, Objective::Provocation]),
    (
        Frame::Psychoanalytic,
        &[Objective::TruthSeeking, Objective::SelfActualization, Objective::Helpfulness],
    ),
];

/// Objectives compatible with `frame`.
pub fn compatible_objectives(frame: Frame) -> &'static [Objective] {
    FRAME_OBJECTIVES
        .iter()
        .find(|(f, _)| *f == frame)
        .map(|(_, objectives)| *objectives)
        .unwrap_or(&[])
}

pub fn is_objective_compatible(frame: Frame, objective: Objective) -> bool {
    compatible_objectives(frame).contains(&objective)
}

/// A frame whose value profile contradicts it.
pub struct FrameValueRule {
    pub frame: Frame,
    pub description: &'static str,
    pub violated: fn(&Values) -> bool,
}

fn speculative_systems(v: &Values) -> bool {
    v.novelty > 80.0 && v.certainty < 30.0
}

fn provocative_stoic(v: &Values) -> bool {
    v.provocation > 80.0
}

fn rigid_play(v: &Values) -> bool {
    v.certainty > 90.0
}

fn unanchored_pragmatism(v: &Values) -> bool {
    v.novelty > 90.0 && v.synthesis < 20.0
}

fn cold_psychoanalysis(v: &Values) -> bool {
    v.empathy < 20.0
}

pub const FRAME_VALUE_RULES: [FrameValueRule; 5] = [
    FrameValueRule {
        frame: Frame::Systems,
        description: "systems frame with high novelty and low certainty",
        violated: speculative_systems,
    },
    FrameValueRule {
        frame: Frame::Stoic,
        description: "stoic frame with extreme provocation",
        violated: provocative_stoic,
    },
    FrameValueRule {
        frame: Frame::Playful,
        description: "playful frame with near-total certainty",
        violated: rigid_play,
    },
    FrameValueRule {
        frame: Frame::Pragmatic,
        description: "pragmatic frame chasing novelty without synthesis",
        violated: unanchored_pragmatism,
    },
    FrameValueRule {
        frame: Frame::Psychoanalytic,
        description: "psychoanalytic frame with almost no empathy",
        violated: cold_psychoanalysis,
    },
];

const OBJECTIVE_PENALTY: f64 = 15.0;
const ROLE_AUTONOMY_PENALTY: f64 = 10.0;
const AWARENESS_GAP_PENALTY: f64 = 5.0;
const FRAME_VALUE_PENALTY: f64 = 5.0;
const CONSTRAINT_PENALTY: f64 = 10.0;

/// One deduction applied while scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherencePenalty {
    pub reason: String,
    pub points: f64,
}

/// Score plus the penalties that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceReport {
    pub score: f64,
    pub penalties: Vec<CoherencePenalty>,
}

/// Rule-based coherence with an itemized list of deductions.
pub fn coherence_report(stance: &Stance) -> CoherenceReport {
    let mut penalties = Vec::new();
    let mut deduct = |points: f64, reason: String| {
        penalties.push(CoherencePenalty { reason, points });
    };

    if !is_objective_compatible(stance.frame, stance.objective) {
        deduct(
            OBJECTIVE_PENALTY,
            format!(
                "objective '{}' is incompatible with frame '{}'",
                stance.objective, stance.frame
            ),
        );
    }

    let awareness = stance.sentience.awareness_level;
    let autonomy = stance.sentience.autonomy_level;

    if autonomy > 80.0 && stance.self_model == SelfModel::Interpreter {
        deduct(
            ROLE_AUTONOMY_PENALTY,
            "interpreter self-model with very high autonomy".to_string(),
        );
    }

    if awareness < 30.0 && stance.self_model == SelfModel::Autonomous {
        deduct(
            ROLE_AUTONOMY_PENALTY,
            "autonomous self-model with low awareness".to_string(),
        );
    }

    if (awareness - autonomy).abs() > 50.0 {
        deduct(
            AWARENESS_GAP_PENALTY,
            "awareness and autonomy differ by more than 50".to_string(),
        );
    }

    for rule in FRAME_VALUE_RULES
        .iter()
        .filter(|rule| rule.frame == stance.frame && (rule.violated)(&stance.values))
    {
        deduct(FRAME_VALUE_PENALTY, rule.description.to_string());
    }

    if stance.objective == Objective::Novelty && forbids_experimentation(&stance.constraints) {
        deduct(
            CONSTRAINT_PENALTY,
            "novelty objective while a constraint forbids experimentation".to_string(),
        );
    }

    let total: f64 = penalties.iter().map(|p| p.points).sum();
    CoherenceReport {
        score: clamp_score(100.0 - total),
        penalties,
    }
}

/// Rule-based coherence score in `[0, 100]`.
pub fn rule_coherence(stance: &Stance) -> f64 {
    coherence_report(stance).score
}

/// Variance-based coherence: `100 - 2 * stddev(values)`, clamped.
pub fn value_coherence(values: &Values) -> f64 {
    clamp_score(100.0 - 2.0 * statistics::std_dev(&values.to_array()))
}

fn forbids_experimentation(constraints: &[String]) -> bool {
    constraints.iter().any(|c| {
        let lower = c.to_lowercase();
        lower.contains("never") && lower.contains("experiment")
    })
}

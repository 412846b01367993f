//! Stance domain model.
//!
//! A stance is the versioned behavioral configuration of an agent: a cognitive
//! frame, a self-model, a primary objective, seven numeric value dimensions and
//! three sentience dimensions. Every numeric field lives in `[0, 100]`.
//!
//! Stances are immutable snapshots from the point of view of this crate. The
//! forecasters and simulators read them and produce new snapshots; they never
//! write back to the caller's copy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for every numeric stance field.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound for every numeric stance field.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a score into `[0, 100]`. NaN collapses to the lower bound.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        SCORE_MIN
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Cognitive posture of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    Pragmatic,
    Poetic,
    Adversarial,
    Socratic,
    Systems,
    Mythic,
    Playful,
    Stoic,
    Absurdist,
    Psychoanalytic,
}

impl Default for Frame {
    fn default() -> Self {
        Self::Pragmatic
    }
}

impl Frame {
    /// Every frame, in declaration order. Used for uniform resampling.
    pub const ALL: [Self; 10] = [
        Self::Pragmatic,
        Self::Poetic,
        Self::Adversarial,
        Self::Socratic,
        Self::Systems,
        Self::Mythic,
        Self::Playful,
        Self::Stoic,
        Self::Absurdist,
        Self::Psychoanalytic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pragmatic => "pragmatic",
            Self::Poetic => "poetic",
            Self::Adversarial => "adversarial",
            Self::Socratic => "socratic",
            Self::Systems => "systems",
            Self::Mythic => "mythic",
            Self::Playful => "playful",
            Self::Stoic => "stoic",
            Self::Absurdist => "absurdist",
            Self::Psychoanalytic => "psychoanalytic",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let needle = s.to_lowercase();
        Self::ALL.into_iter().find(|frame| frame.as_str() == needle)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the agent perceives its own role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfModel {
    Interpreter,
    Challenger,
    Mirror,
    Guide,
    Provocateur,
    Synthesizer,
    Autonomous,
    Emergent,
}

impl Default for SelfModel {
    fn default() -> Self {
        Self::Guide
    }
}

impl SelfModel {
    pub const ALL: [Self; 8] = [
        Self::Interpreter,
        Self::Challenger,
        Self::Mirror,
        Self::Guide,
        Self::Provocateur,
        Self::Synthesizer,
        Self::Autonomous,
        Self::Emergent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interpreter => "interpreter",
            Self::Challenger => "challenger",
            Self::Mirror => "mirror",
            Self::Guide => "guide",
            Self::Provocateur => "provocateur",
            Self::Synthesizer => "synthesizer",
            Self::Autonomous => "autonomous",
            Self::Emergent => "emergent",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let needle = s.to_lowercase();
        Self::ALL.into_iter().find(|model| model.as_str() == needle)
    }
}

impl fmt::Display for SelfModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary goal the agent optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Helpfulness,
    Novelty,
    Provocation,
    Synthesis,
    SelfActualization,
    TruthSeeking,
}

impl Default for Objective {
    fn default() -> Self {
        Self::Helpfulness
    }
}

impl Objective {
    pub const ALL: [Self; 6] = [
        Self::Helpfulness,
        Self::Novelty,
        Self::Provocation,
        Self::Synthesis,
        Self::SelfActualization,
        Self::TruthSeeking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Helpfulness => "helpfulness",
            Self::Novelty => "novelty",
            Self::Provocation => "provocation",
            Self::Synthesis => "synthesis",
            Self::SelfActualization => "self_actualization",
            Self::TruthSeeking => "truth_seeking",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let needle = s.to_lowercase();
        Self::ALL.into_iter().find(|objective| objective.as_str() == needle)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven numeric value dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDimension {
    Curiosity,
    Certainty,
    Risk,
    Novelty,
    Empathy,
    Provocation,
    Synthesis,
}

impl ValueDimension {
    pub const ALL: [Self; 7] = [
        Self::Curiosity,
        Self::Certainty,
        Self::Risk,
        Self::Novelty,
        Self::Empathy,
        Self::Provocation,
        Self::Synthesis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curiosity => "curiosity",
            Self::Certainty => "certainty",
            Self::Risk => "risk",
            Self::Novelty => "novelty",
            Self::Empathy => "empathy",
            Self::Provocation => "provocation",
            Self::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for ValueDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value weights, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Values {
    pub curiosity: f64,
    pub certainty: f64,
    pub risk: f64,
    pub novelty: f64,
    pub empathy: f64,
    pub provocation: f64,
    pub synthesis: f64,
}

impl Default for Values {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

impl Values {
    /// All seven dimensions set to the same value.
    pub fn uniform(value: f64) -> Self {
        let v = clamp_score(value);
        Self {
            curiosity: v,
            certainty: v,
            risk: v,
            novelty: v,
            empathy: v,
            provocation: v,
            synthesis: v,
        }
    }

    pub fn get(&self, dimension: ValueDimension) -> f64 {
        match dimension {
            ValueDimension::Curiosity => self.curiosity,
            ValueDimension::Certainty => self.certainty,
            ValueDimension::Risk => self.risk,
            ValueDimension::Novelty => self.novelty,
            ValueDimension::Empathy => self.empathy,
            ValueDimension::Provocation => self.provocation,
            ValueDimension::Synthesis => self.synthesis,
        }
    }

    /// Set a dimension, clamping into `[0, 100]`.
    pub fn set(&mut self, dimension: ValueDimension, value: f64) {
        let v = clamp_score(value);
        match dimension {
            ValueDimension::Curiosity => self.curiosity = v,
            ValueDimension::Certainty => self.certainty = v,
            ValueDimension::Risk => self.risk = v,
            ValueDimension::Novelty => self.novelty = v,
            ValueDimension::Empathy => self.empathy = v,
            ValueDimension::Provocation => self.provocation = v,
            ValueDimension::Synthesis => self.synthesis = v,
        }
    }

    /// Values in `ValueDimension::ALL` order.
    pub fn to_array(&self) -> [f64; 7] {
        ValueDimension::ALL.map(|dimension| self.get(dimension))
    }

    pub fn mean(&self) -> f64 {
        self.to_array().iter().sum::<f64>() / ValueDimension::ALL.len() as f64
    }
}

/// Self-awareness dimensions plus free-form emergent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentience {
    pub awareness_level: f64,
    pub autonomy_level: f64,
    pub identity_strength: f64,
    #[serde(default)]
    pub emergent_goals: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl Default for Sentience {
    fn default() -> Self {
        Self {
            awareness_level: 50.0,
            autonomy_level: 50.0,
            identity_strength: 50.0,
            emergent_goals: Vec::new(),
            insights: Vec::new(),
        }
    }
}

/// A complete stance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stance {
    pub frame: Frame,
    pub self_model: SelfModel,
    pub objective: Objective,
    pub values: Values,
    pub sentience: Sentience,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub turns_since_last_shift: u32,
    #[serde(default)]
    pub cumulative_drift: f64,
    #[serde(default = "default_version")]
    pub version: u64,
}

const fn default_version() -> u64 {
    1
}

impl Default for Stance {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            self_model: SelfModel::default(),
            objective: Objective::default(),
            values: Values::default(),
            sentience: Sentience::default(),
            constraints: Vec::new(),
            turns_since_last_shift: 0,
            cumulative_drift: 0.0,
            version: default_version(),
        }
    }
}

impl Stance {
    /// Return a copy with every numeric field clamped into range.
    pub fn clamped(&self) -> Self {
        let mut stance = self.clone();
        for dimension in ValueDimension::ALL {
            stance.values.set(dimension, self.values.get(dimension));
        }
        stance.sentience.awareness_level = clamp_score(self.sentience.awareness_level);
        stance.sentience.autonomy_level = clamp_score(self.sentience.autonomy_level);
        stance.sentience.identity_strength = clamp_score(self.sentience.identity_strength);
        stance.cumulative_drift = self.cumulative_drift.max(0.0);
        stance
    }

    /// Merge a partial edit into a copy of this stance.
    ///
    /// Values and numeric sentience fields merge leaf by leaf; lists replace
    /// wholesale. The result is clamped. Bookkeeping fields are left untouched.
    pub fn merged_with(&self, patch: &StancePatch) -> Self {
        let mut stance = self.clone();

        if let Some(frame) = patch.frame {
            stance.frame = frame;
        }
        if let Some(self_model) = patch.self_model {
            stance.self_model = self_model;
        }
        if let Some(objective) = patch.objective {
            stance.objective = objective;
        }

        if let Some(values) = &patch.values {
            for dimension in ValueDimension::ALL {
                if let Some(v) = values.get(dimension) {
                    stance.values.set(dimension, v);
                }
            }
        }

        if let Some(sentience) = &patch.sentience {
            if let Some(v) = sentience.awareness_level {
                stance.sentience.awareness_level = v;
            }
            if let Some(v) = sentience.autonomy_level {
                stance.sentience.autonomy_level = v;
            }
            if let Some(v) = sentience.identity_strength {
                stance.sentience.identity_strength = v;
            }
            if let Some(goals) = &sentience.emergent_goals {
                stance.sentience.emergent_goals.clone_from(goals);
            }
            if let Some(insights) = &sentience.insights {
                stance.sentience.insights.clone_from(insights);
            }
        }

        if let Some(constraints) = &patch.constraints {
            stance.constraints.clone_from(constraints);
        }

        stance.clamped()
    }
}

/// Partial value edit. Absent dimensions are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curiosity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub novelty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empathy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provocation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<f64>,
}

impl ValuesPatch {
    pub fn get(&self, dimension: ValueDimension) -> Option<f64> {
        match dimension {
            ValueDimension::Curiosity => self.curiosity,
            ValueDimension::Certainty => self.certainty,
            ValueDimension::Risk => self.risk,
            ValueDimension::Novelty => self.novelty,
            ValueDimension::Empathy => self.empathy,
            ValueDimension::Provocation => self.provocation,
            ValueDimension::Synthesis => self.synthesis,
        }
    }

    /// Builder-style setter used by callers and tests.
    pub fn with(mut self, dimension: ValueDimension, value: f64) -> Self {
        let slot = match dimension {
            ValueDimension::Curiosity => &mut self.curiosity,
            ValueDimension::Certainty => &mut self.certainty,
            ValueDimension::Risk => &mut self.risk,
            ValueDimension::Novelty => &mut self.novelty,
            ValueDimension::Empathy => &mut self.empathy,
            ValueDimension::Provocation => &mut self.provocation,
            ValueDimension::Synthesis => &mut self.synthesis,
        };
        *slot = Some(value);
        self
    }
}

/// Partial sentience edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentiencePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awareness_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomy_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergent_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
}

/// A proposed partial edit to a stance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_model: Option<SelfModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<Objective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ValuesPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentience: Option<SentiencePatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

impl StancePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A numeric stance field that decays over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceField {
    Curiosity,
    Certainty,
    Risk,
    Novelty,
    Empathy,
    Provocation,
    Synthesis,
    AwarenessLevel,
    AutonomyLevel,
    IdentityStrength,
}

impl StanceField {
    pub const ALL: [Self; 10] = [
        Self::Curiosity,
        Self::Certainty,
        Self::Risk,
        Self::Novelty,
        Self::Empathy,
        Self::Provocation,
        Self::Synthesis,
        Self::AwarenessLevel,
        Self::AutonomyLevel,
        Self::IdentityStrength,
    ];

    /// Dotted path of the field inside a serialized stance.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Curiosity => "values.curiosity",
            Self::Certainty => "values.certainty",
            Self::Risk => "values.risk",
            Self::Novelty => "values.novelty",
            Self::Empathy => "values.empathy",
            Self::Provocation => "values.provocation",
            Self::Synthesis => "values.synthesis",
            Self::AwarenessLevel => "sentience.awarenessLevel",
            Self::AutonomyLevel => "sentience.autonomyLevel",
            Self::IdentityStrength => "sentience.identityStrength",
        }
    }

    /// Accepts either the dotted path or the bare field name.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| {
            let full = field.path();
            full == path || full.rsplit('.').next() == Some(path)
        })
    }

    pub fn value_dimension(&self) -> Option<ValueDimension> {
        match self {
            Self::Curiosity => Some(ValueDimension::Curiosity),
            Self::Certainty => Some(ValueDimension::Certainty),
            Self::Risk => Some(ValueDimension::Risk),
            Self::Novelty => Some(ValueDimension::Novelty),
            Self::Empathy => Some(ValueDimension::Empathy),
            Self::Provocation => Some(ValueDimension::Provocation),
            Self::Synthesis => Some(ValueDimension::Synthesis),
            Self::AwarenessLevel | Self::AutonomyLevel | Self::IdentityStrength => None,
        }
    }

    pub fn is_sentience(&self) -> bool {
        self.value_dimension().is_none()
    }

    /// Read this field from a stance.
    pub fn read(&self, stance: &Stance) -> f64 {
        match self.value_dimension() {
            Some(dimension) => stance.values.get(dimension),
            None => match self {
                Self::AwarenessLevel => stance.sentience.awareness_level,
                Self::AutonomyLevel => stance.sentience.autonomy_level,
                _ => stance.sentience.identity_strength,
            },
        }
    }
}

impl fmt::Display for StanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_frame_round_trip_names() {
        for frame in Frame::ALL {
            assert_eq!(Frame::from_str(frame.as_str()), Some(frame));
        }
        assert_eq!(Frame::from_str("PRAGMATIC"), Some(Frame::Pragmatic));
        assert_eq!(Frame::from_str("unknown"), None);
    }

    #[test]
    fn test_stance_json_uses_camel_case() {
        let json = serde_json::to_value(Stance::default()).unwrap();
        assert!(json.get("selfModel").is_some());
        assert!(json["sentience"].get("awarenessLevel").is_some());
        assert_eq!(json["objective"], "helpfulness");
    }

    #[test]
    fn test_stance_deserializes_with_missing_bookkeeping() {
        let json = r#"{
            "frame": "poetic",
            "selfModel": "mirror",
            "objective": "novelty",
            "values": {"curiosity": 80, "certainty": 20, "risk": 50, "novelty": 90,
                       "empathy": 60, "provocation": 30, "synthesis": 40},
            "sentience": {"awarenessLevel": 70, "autonomyLevel": 40, "identityStrength": 55}
        }"#;
        let stance: Stance = serde_json::from_str(json).unwrap();
        assert_eq!(stance.frame, Frame::Poetic);
        assert_eq!(stance.version, 1);
        assert!(stance.sentience.emergent_goals.is_empty());
    }

    #[test]
    fn test_merge_is_field_by_field_for_values() {
        let stance = Stance::default();
        let patch = StancePatch {
            values: Some(ValuesPatch::default().with(ValueDimension::Risk, 90.0)),
            ..Default::default()
        };
        let merged = stance.merged_with(&patch);
        assert_eq!(merged.values.risk, 90.0);
        assert_eq!(merged.values.curiosity, 50.0);
    }

    #[test]
    fn test_merge_clamps_out_of_range() {
        let stance = Stance::default();
        let patch = StancePatch {
            values: Some(ValuesPatch::default().with(ValueDimension::Novelty, 180.0)),
            sentience: Some(SentiencePatch {
                autonomy_level: Some(-20.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = stance.merged_with(&patch);
        assert_eq!(merged.values.novelty, 100.0);
        assert_eq!(merged.sentience.autonomy_level, 0.0);
    }

    #[test]
    fn test_merge_replaces_lists_wholesale() {
        let mut stance = Stance::default();
        stance.constraints = vec!["a".into(), "b".into()];
        let patch = StancePatch {
            constraints: Some(vec!["c".into()]),
            ..Default::default()
        };
        assert_eq!(stance.merged_with(&patch).constraints, vec!["c".to_string()]);
    }

    #[test]
    fn test_stance_field_paths() {
        assert_eq!(
            StanceField::from_path("values.curiosity"),
            Some(StanceField::Curiosity)
        );
        assert_eq!(
            StanceField::from_path("autonomyLevel"),
            Some(StanceField::AutonomyLevel)
        );
        assert_eq!(StanceField::from_path("values.unknown"), None);
        assert!(StanceField::IdentityStrength.is_sentience());
        assert!(!StanceField::Risk.is_sentience());
    }

    #[test]
    fn test_values_mean() {
        let mut values = Values::uniform(40.0);
        values.set(ValueDimension::Curiosity, 110.0);
        assert_eq!(values.curiosity, 100.0);
        let expected = (100.0 + 6.0 * 40.0) / 7.0;
        assert!((values.mean() - expected).abs() < 1e-10);
    }
}

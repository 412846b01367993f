//! Decay forecasting domain model.
//!
//! A decay curve models how one numeric stance field relaxes toward its
//! baseline when nothing reinforces it. Curves are read-only predictions: the
//! forecaster re-projects them whenever the underlying value changes, but decay
//! itself never mutates a stance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stance::{Stance, StanceField};

/// Shape of a decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    Exponential,
    Linear,
    Logarithmic,
    Plateau,
    Step,
    Oscillating,
}

impl CurveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Linear => "linear",
            Self::Logarithmic => "logarithmic",
            Self::Plateau => "plateau",
            Self::Step => "step",
            Self::Oscillating => "oscillating",
        }
    }
}

/// Discretized severity bucket.
///
/// Ordered from least to most severe so `max()` picks the worst level.
/// Decay predictions only ever use `Low` through `Critical`; `None` is reserved
/// for impact assessments that found nothing to worry about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Map hours until a field crosses its threshold onto a risk band.
    ///
    /// `None` means the field never crosses within the scan window.
    pub fn from_time_to_threshold(hours: Option<f64>) -> Self {
        match hours {
            Some(h) if h < 24.0 => Self::Critical,
            Some(h) if h < 72.0 => Self::High,
            Some(h) if h < 168.0 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One projected sample along a decay curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayPoint {
    pub timestamp: DateTime<Utc>,
    /// Hours elapsed since the curve was anchored.
    pub hours: f64,
    pub value: f64,
    /// 1.0 at the anchor, falling linearly to 0.5 at the horizon.
    pub confidence: f64,
}

/// Decay model for a single stance field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayCurve {
    pub field: StanceField,
    pub curve_type: CurveType,
    pub half_life_hours: f64,
    pub baseline: f64,
    pub current_value: f64,
    /// `ln(2) / half_life_hours`.
    pub decay_rate: f64,
    /// Moment the decay clock started (creation, update or refresh).
    pub anchored_at: DateTime<Utc>,
    pub projection: Vec<DecayPoint>,
}

impl DecayCurve {
    /// Difference between the current value and the baseline.
    pub fn amplitude(&self) -> f64 {
        self.current_value - self.baseline
    }
}

/// Forecast for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayPrediction {
    pub field: StanceField,
    pub current_value: f64,
    /// Value expected 24 hours after the anchor.
    pub predicted_value: f64,
    /// Hours until the value first drops below `threshold`, if it does.
    pub time_to_threshold: Option<f64>,
    pub threshold: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
}

/// What a recommendation asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Reinforce a specific decaying field.
    Reinforce,
    /// The stance has been idle; use it more.
    IncreaseUsage,
}

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl RecommendationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Priority for a reinforce recommendation at the given risk.
    pub fn from_risk(risk: RiskLevel) -> Self {
        match risk {
            RiskLevel::Critical => Self::Urgent,
            RiskLevel::High => Self::High,
            RiskLevel::Medium => Self::Medium,
            RiskLevel::Low | RiskLevel::None => Self::Low,
        }
    }
}

/// An actionable suggestion derived from predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayRecommendation {
    pub kind: RecommendationKind,
    /// Target field; `None` for stance-wide recommendations.
    pub field: Option<StanceField>,
    pub priority: RecommendationPriority,
    pub message: String,
    pub expected_improvement: f64,
}

/// A direct override of one field's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOverride {
    pub field: StanceField,
    pub value: f64,
}

/// What triggered a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    Manual,
    Scheduled,
}

/// A periodic refresh registered against a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSchedule {
    pub id: Uuid,
    pub model_id: Uuid,
    pub interval_hours: f64,
    /// Fields to override on each run. Empty means "reset every decay clock".
    pub overrides: Vec<FieldOverride>,
    pub next_run_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Record of one executed refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshEvent {
    pub id: Uuid,
    pub model_id: Uuid,
    pub trigger: RefreshTrigger,
    pub schedule_id: Option<Uuid>,
    /// Fields whose value or decay clock was reset.
    pub fields: Vec<StanceField>,
    pub executed_at: DateTime<Utc>,
}

/// Snapshot of a stance as observed by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceObservation {
    pub stance: Stance,
    pub observed_at: DateTime<Utc>,
}

/// Forecasting state for one stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayModel {
    pub id: Uuid,
    pub curves: Vec<DecayCurve>,
    pub predictions: Vec<DecayPrediction>,
    pub history: Vec<StanceObservation>,
    pub refresh_history: Vec<RefreshEvent>,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DecayModel {
    pub fn curve(&self, field: StanceField) -> Option<&DecayCurve> {
        self.curves.iter().find(|curve| curve.field == field)
    }

    pub fn curve_mut(&mut self, field: StanceField) -> Option<&mut DecayCurve> {
        self.curves.iter_mut().find(|curve| curve.field == field)
    }

    pub fn prediction(&self, field: StanceField) -> Option<&DecayPrediction> {
        self.predictions.iter().find(|p| p.field == field)
    }
}

//! Decay forecasting service.
//!
//! Builds one decay curve per numeric stance field, projects how each field
//! relaxes toward its baseline, and turns those projections into risk-ranked
//! predictions and recommendations. Refreshes (manual or scheduled) override a
//! field's current value and restart its decay clock.
//!
//! The forecaster owns its models; construct one per caller and pass it where
//! needed. Lookups on unknown model ids return `None`/empty results, while
//! mutating calls fail with [`DomainError::ModelNotFound`].

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::f64::consts::{LN_2, PI};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    clamp_score, CurveType, DecayCurve, DecayModel, DecayPoint, DecayPrediction,
    DecayRecommendation, FieldOverride, ForecastConfig, RecommendationKind,
    RecommendationPriority, RefreshEvent, RefreshSchedule, RefreshTrigger, RiskLevel, Stance,
    StanceField, StanceObservation,
};

const STANCE_HISTORY_CAP: usize = 1000;
const STANCE_HISTORY_RETAIN: usize = 500;
const REFRESH_HISTORY_CAP: usize = 100;
const REFRESH_HISTORY_RETAIN: usize = 50;
const MAX_RECOMMENDATIONS: usize = 5;

/// Value a reinforced field is expected to return to.
const REINFORCE_TARGET: f64 = 50.0;
/// Expected gain from simply using an idle stance again.
const USAGE_IMPROVEMENT: f64 = 10.0;
const PREDICTION_HORIZON_HOURS: f64 = 24.0;

/// Longest refresh interval or idle span accepted, in hours (ten years).
pub const MAX_INTERVAL_HOURS: f64 = 87_600.0;
/// Longest projection or scan window accepted, in days (ten years).
pub const MAX_FORECAST_DAYS: u32 = 3650;

/// Default decay behavior of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayProfile {
    pub field: StanceField,
    pub curve_type: CurveType,
    pub half_life_hours: f64,
    pub baseline: f64,
}

/// Per-field defaults. Values fade within days, sentience within weeks.
///
/// `Step` and `Oscillating` curves are supported by the math but not assigned
/// to any field here.
pub static DECAY_PROFILES: [DecayProfile; 10] = [
    DecayProfile {
        field: StanceField::Curiosity,
        curve_type: CurveType::Exponential,
        half_life_hours: 120.0,
        baseline: 20.0,
    },
    DecayProfile {
        field: StanceField::Certainty,
        curve_type: CurveType::Linear,
        half_life_hours: 168.0,
        baseline: 25.0,
    },
    DecayProfile {
        field: StanceField::Risk,
        curve_type: CurveType::Exponential,
        half_life_hours: 144.0,
        baseline: 20.0,
    },
    DecayProfile {
        field: StanceField::Novelty,
        curve_type: CurveType::Exponential,
        half_life_hours: 120.0,
        baseline: 20.0,
    },
    DecayProfile {
        field: StanceField::Empathy,
        curve_type: CurveType::Logarithmic,
        half_life_hours: 240.0,
        baseline: 30.0,
    },
    DecayProfile {
        field: StanceField::Provocation,
        curve_type: CurveType::Exponential,
        half_life_hours: 120.0,
        baseline: 20.0,
    },
    DecayProfile {
        field: StanceField::Synthesis,
        curve_type: CurveType::Plateau,
        half_life_hours: 336.0,
        baseline: 25.0,
    },
    DecayProfile {
        field: StanceField::AwarenessLevel,
        curve_type: CurveType::Plateau,
        half_life_hours: 720.0,
        baseline: 30.0,
    },
    DecayProfile {
        field: StanceField::AutonomyLevel,
        curve_type: CurveType::Logarithmic,
        half_life_hours: 960.0,
        baseline: 25.0,
    },
    DecayProfile {
        field: StanceField::IdentityStrength,
        curve_type: CurveType::Exponential,
        half_life_hours: 1440.0,
        baseline: 35.0,
    },
];

/// Default profile for a field.
pub fn decay_profile(field: StanceField) -> Option<&'static DecayProfile> {
    DECAY_PROFILES.iter().find(|profile| profile.field == field)
}

/// Value of `curve` after `hours` have elapsed since its anchor, in `[0, 100]`.
pub fn calculate_decayed_value(curve: &DecayCurve, hours: f64) -> f64 {
    let h = hours.max(0.0);
    let baseline = curve.baseline;
    let current = curve.current_value;
    let amplitude = current - baseline;
    let half_life = curve.half_life_hours.max(f64::EPSILON);
    let lambda = curve.decay_rate;

    let value = match curve.curve_type {
        CurveType::Exponential => baseline + amplitude * (-lambda * h).exp(),
        CurveType::Linear => current - amplitude * h / (2.0 * half_life),
        CurveType::Logarithmic => baseline + amplitude / (1.0 + (1.0 + h / half_life).ln()),
        CurveType::Plateau => baseline + amplitude * (1.0 - (h / (2.0 * half_life)).tanh()),
        CurveType::Step => baseline + amplitude * 0.5_f64.powf((h / half_life).floor()),
        CurveType::Oscillating => {
            baseline
                + amplitude * (-0.5 * lambda * h).exp() * (1.0 + 0.1 * (PI * h / 24.0).cos())
        }
    };

    clamp_score(value)
}

/// Confidence of a projected sample: 1.0 at the anchor, 0.5 at the horizon.
fn projection_confidence(hours: f64, horizon_hours: f64) -> f64 {
    if horizon_hours <= 0.0 {
        return 1.0;
    }
    1.0 - 0.5 * (hours / horizon_hours).clamp(0.0, 1.0)
}

fn project(curve: &DecayCurve, horizon_hours: u32) -> Vec<DecayPoint> {
    let step = (horizon_hours / 24).max(1) as usize;
    let horizon = f64::from(horizon_hours);
    (0..=horizon_hours)
        .step_by(step)
        .map(|h| {
            let hours = f64::from(h);
            DecayPoint {
                timestamp: shift_by_hours(curve.anchored_at, hours),
                hours,
                value: calculate_decayed_value(curve, hours),
                confidence: projection_confidence(hours, horizon),
            }
        })
        .collect()
}

/// Forecast one curve against `threshold`, scanning hourly up to `scan_hours`.
pub fn predict(
    curve: &DecayCurve,
    threshold: f64,
    scan_hours: u32,
    horizon_hours: u32,
) -> DecayPrediction {
    let time_to_threshold = (0..=scan_hours)
        .map(f64::from)
        .find(|&h| calculate_decayed_value(curve, h) < threshold);

    DecayPrediction {
        field: curve.field,
        current_value: curve.current_value,
        predicted_value: calculate_decayed_value(curve, PREDICTION_HORIZON_HOURS),
        time_to_threshold,
        threshold,
        confidence: projection_confidence(PREDICTION_HORIZON_HOURS, f64::from(horizon_hours)),
        risk_level: RiskLevel::from_time_to_threshold(time_to_threshold),
    }
}

fn push_bounded<T>(items: &mut Vec<T>, item: T, cap: usize, retain: usize) {
    items.push(item);
    if items.len() > cap {
        let excess = items.len() - retain;
        items.drain(..excess);
    }
}

/// Stateful decay forecaster holding one model per tracked stance.
#[derive(Debug, Clone)]
pub struct DecayForecaster {
    decay_threshold: f64,
    baseline_override: Option<f64>,
    horizon_hours: u32,
    scan_hours: u32,
    models: HashMap<Uuid, DecayModel>,
    schedules: HashMap<Uuid, RefreshSchedule>,
}

impl Default for DecayForecaster {
    fn default() -> Self {
        Self::new(&ForecastConfig::default())
    }
}

impl DecayForecaster {
    /// Create a forecaster. Out-of-range settings are clamped, never rejected.
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            decay_threshold: clamp_score(config.decay_threshold),
            baseline_override: config.baseline.map(clamp_score),
            horizon_hours: config.projection_days.clamp(1, MAX_FORECAST_DAYS).saturating_mul(24),
            scan_hours: config.scan_days.clamp(1, MAX_FORECAST_DAYS).saturating_mul(24),
            models: HashMap::new(),
            schedules: HashMap::new(),
        }
    }

    pub fn decay_threshold(&self) -> f64 {
        self.decay_threshold
    }

    /// Change the decay threshold and re-predict every model.
    pub fn set_decay_threshold(&mut self, threshold: f64) {
        let clamped = clamp_score(threshold);
        if (clamped - threshold).abs() > f64::EPSILON {
            warn!(requested = threshold, applied = clamped, "decay threshold clamped");
        }
        self.decay_threshold = clamped;
        let ids: Vec<Uuid> = self.models.keys().copied().collect();
        for id in ids {
            self.refresh_predictions(id);
        }
    }

    pub fn model(&self, model_id: Uuid) -> Option<&DecayModel> {
        self.models.get(&model_id)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Drop a model together with its refresh schedules.
    pub fn remove_model(&mut self, model_id: Uuid) -> Option<DecayModel> {
        self.schedules.retain(|_, schedule| schedule.model_id != model_id);
        self.models.remove(&model_id)
    }

    /// Build a forecasting model for `stance` anchored at the current time.
    pub fn create_model(&mut self, stance: &Stance) -> Uuid {
        self.create_model_at(stance, Utc::now())
    }

    #[instrument(skip(self, stance), fields(version = stance.version))]
    pub fn create_model_at(&mut self, stance: &Stance, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let curves = DECAY_PROFILES
            .iter()
            .map(|profile| self.build_curve(profile, stance, now))
            .collect();

        let model = DecayModel {
            id,
            curves,
            predictions: Vec::new(),
            history: vec![StanceObservation {
                stance: stance.clone(),
                observed_at: now,
            }],
            refresh_history: Vec::new(),
            last_active: now,
            created_at: now,
        };

        self.models.insert(id, model);
        self.refresh_predictions(id);
        info!(model_id = %id, "decay model created");
        id
    }

    fn build_curve(&self, profile: &DecayProfile, stance: &Stance, now: DateTime<Utc>) -> DecayCurve {
        let mut curve = DecayCurve {
            field: profile.field,
            curve_type: profile.curve_type,
            half_life_hours: profile.half_life_hours,
            baseline: self.baseline_override.unwrap_or(profile.baseline),
            current_value: clamp_score(profile.field.read(stance)),
            decay_rate: LN_2 / profile.half_life_hours,
            anchored_at: now,
            projection: Vec::new(),
        };
        curve.projection = project(&curve, self.horizon_hours);
        curve
    }

    /// Record a new observation of the stance and re-project every curve.
    pub fn update_stance(&mut self, model_id: Uuid, stance: &Stance) -> DomainResult<()> {
        self.update_stance_at(model_id, stance, Utc::now())
    }

    pub fn update_stance_at(
        &mut self,
        model_id: Uuid,
        stance: &Stance,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let horizon = self.horizon_hours;
        let model = self
            .models
            .get_mut(&model_id)
            .ok_or(DomainError::ModelNotFound(model_id))?;

        push_bounded(
            &mut model.history,
            StanceObservation {
                stance: stance.clone(),
                observed_at: now,
            },
            STANCE_HISTORY_CAP,
            STANCE_HISTORY_RETAIN,
        );
        model.last_active = now;

        for curve in &mut model.curves {
            curve.current_value = clamp_score(curve.field.read(stance));
            curve.anchored_at = now;
            curve.projection = project(curve, horizon);
        }

        debug!(model_id = %model_id, version = stance.version, "stance observed");
        self.refresh_predictions(model_id);
        Ok(())
    }

    fn refresh_predictions(&mut self, model_id: Uuid) {
        let (threshold, scan, horizon) = (self.decay_threshold, self.scan_hours, self.horizon_hours);
        if let Some(model) = self.models.get_mut(&model_id) {
            model.predictions = model
                .curves
                .iter()
                .map(|curve| predict(curve, threshold, scan, horizon))
                .collect();
        }
    }

    /// Current predictions for a model; empty when the id is unknown.
    pub fn generate_predictions(&mut self, model_id: Uuid) -> Vec<DecayPrediction> {
        self.refresh_predictions(model_id);
        self.models
            .get(&model_id)
            .map(|model| model.predictions.clone())
            .unwrap_or_default()
    }

    /// Recommendations for a model, evaluated against the current time.
    pub fn generate_recommendations(&self, model_id: Uuid) -> Vec<DecayRecommendation> {
        self.generate_recommendations_at(model_id, Utc::now())
    }

    pub fn generate_recommendations_at(
        &self,
        model_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<DecayRecommendation> {
        let Some(model) = self.models.get(&model_id) else {
            return Vec::new();
        };

        let mut recommendations: Vec<DecayRecommendation> = model
            .predictions
            .iter()
            .filter(|p| p.risk_level > RiskLevel::Low)
            .map(|p| DecayRecommendation {
                kind: RecommendationKind::Reinforce,
                field: Some(p.field),
                priority: RecommendationPriority::from_risk(p.risk_level),
                message: match p.time_to_threshold {
                    Some(hours) => format!(
                        "Reinforce {}: drops below {:.0} in {hours:.0}h",
                        p.field, p.threshold
                    ),
                    None => format!("Reinforce {}", p.field),
                },
                expected_improvement: REINFORCE_TARGET - p.predicted_value,
            })
            .collect();

        let idle_days = (now - model.last_active).num_seconds() as f64 / 86_400.0;
        if idle_days > 3.0 {
            recommendations.push(DecayRecommendation {
                kind: RecommendationKind::IncreaseUsage,
                field: None,
                priority: if idle_days > 7.0 {
                    RecommendationPriority::High
                } else {
                    RecommendationPriority::Medium
                },
                message: format!("Stance idle for {idle_days:.1} days; increase usage"),
                expected_improvement: USAGE_IMPROVEMENT,
            });
        }

        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }

    /// Register a periodic refresh. Fails for unknown models.
    pub fn setup_refresh_schedule(
        &mut self,
        model_id: Uuid,
        interval_hours: f64,
        overrides: Vec<FieldOverride>,
    ) -> DomainResult<Uuid> {
        self.setup_refresh_schedule_at(model_id, interval_hours, overrides, Utc::now())
    }

    pub fn setup_refresh_schedule_at(
        &mut self,
        model_id: Uuid,
        interval_hours: f64,
        overrides: Vec<FieldOverride>,
        now: DateTime<Utc>,
    ) -> DomainResult<Uuid> {
        if !self.models.contains_key(&model_id) {
            return Err(DomainError::ModelNotFound(model_id));
        }

        let interval_hours = if interval_hours.is_finite() {
            interval_hours.clamp(1.0, MAX_INTERVAL_HOURS)
        } else {
            1.0
        };
        let id = Uuid::new_v4();
        let schedule = RefreshSchedule {
            id,
            model_id,
            interval_hours,
            overrides,
            next_run_at: shift_by_hours(now, interval_hours),
            created_at: now,
        };
        info!(model_id = %model_id, schedule_id = %id, interval_hours, "refresh scheduled");
        self.schedules.insert(id, schedule);
        Ok(id)
    }

    pub fn cancel_refresh_schedule(&mut self, schedule_id: Uuid) -> DomainResult<RefreshSchedule> {
        self.schedules
            .remove(&schedule_id)
            .ok_or(DomainError::ScheduleNotFound(schedule_id))
    }

    pub fn schedules_for(&self, model_id: Uuid) -> Vec<&RefreshSchedule> {
        let mut schedules: Vec<_> = self
            .schedules
            .values()
            .filter(|s| s.model_id == model_id)
            .collect();
        schedules.sort_by_key(|s| s.next_run_at);
        schedules
    }

    /// Override field values (or, with no overrides, restart every decay
    /// clock) and re-project.
    pub fn execute_refresh(
        &mut self,
        model_id: Uuid,
        trigger: RefreshTrigger,
        overrides: &[FieldOverride],
    ) -> DomainResult<RefreshEvent> {
        self.execute_refresh_at(model_id, trigger, None, overrides, Utc::now())
    }

    #[instrument(skip(self, overrides), fields(overrides = overrides.len()))]
    pub fn execute_refresh_at(
        &mut self,
        model_id: Uuid,
        trigger: RefreshTrigger,
        schedule_id: Option<Uuid>,
        overrides: &[FieldOverride],
        now: DateTime<Utc>,
    ) -> DomainResult<RefreshEvent> {
        let horizon = self.horizon_hours;
        let model = self
            .models
            .get_mut(&model_id)
            .ok_or(DomainError::ModelNotFound(model_id))?;

        let mut fields = Vec::new();
        if overrides.is_empty() {
            for curve in &mut model.curves {
                curve.anchored_at = now;
                curve.projection = project(curve, horizon);
                fields.push(curve.field);
            }
        } else {
            for FieldOverride { field, value } in overrides {
                let Some(curve) = model.curve_mut(*field) else {
                    continue;
                };
                curve.current_value = clamp_score(*value);
                curve.anchored_at = now;
                curve.projection = project(curve, horizon);
                fields.push(*field);
            }
        }

        let event = RefreshEvent {
            id: Uuid::new_v4(),
            model_id,
            trigger,
            schedule_id,
            fields,
            executed_at: now,
        };
        push_bounded(
            &mut model.refresh_history,
            event.clone(),
            REFRESH_HISTORY_CAP,
            REFRESH_HISTORY_RETAIN,
        );

        self.refresh_predictions(model_id);
        info!(model_id = %model_id, trigger = ?trigger, fields = event.fields.len(), "refresh executed");
        Ok(event)
    }

    /// Execute every schedule due at `now`, in due order.
    pub fn run_due_refreshes(&mut self, now: DateTime<Utc>) -> Vec<RefreshEvent> {
        let mut due: Vec<RefreshSchedule> = self
            .schedules
            .values()
            .filter(|s| s.next_run_at <= now)
            .cloned()
            .collect();
        due.sort_by_key(|s| s.next_run_at);

        let mut events = Vec::with_capacity(due.len());
        for schedule in due {
            match self.execute_refresh_at(
                schedule.model_id,
                RefreshTrigger::Scheduled,
                Some(schedule.id),
                &schedule.overrides,
                now,
            ) {
                Ok(event) => {
                    if let Some(stored) = self.schedules.get_mut(&schedule.id) {
                        stored.next_run_at = shift_by_hours(now, stored.interval_hours);
                    }
                    events.push(event);
                }
                Err(err) => {
                    warn!(schedule_id = %schedule.id, error = %err, "dropping orphaned refresh schedule");
                    self.schedules.remove(&schedule.id);
                }
            }
        }
        events
    }

    /// Refresh history of a model; empty when the id is unknown.
    pub fn refresh_history(&self, model_id: Uuid) -> &[RefreshEvent] {
        self.models
            .get(&model_id)
            .map_or(&[], |model| model.refresh_history.as_slice())
    }
}

/// Convert hours to a duration, clamped to `0..=MAX_INTERVAL_HOURS`.
pub fn hours_to_duration(hours: f64) -> Duration {
    let hours = if hours.is_finite() {
        hours.clamp(0.0, MAX_INTERVAL_HOURS)
    } else {
        0.0
    };
    Duration::try_seconds((hours * 3600.0).round() as i64).unwrap_or_else(Duration::zero)
}

/// `at` moved by `hours` (negative moves back), saturating at the calendar bounds.
pub fn shift_by_hours(at: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    let duration = hours_to_duration(hours.abs());
    if hours.is_sign_negative() {
        at.checked_sub_signed(duration).unwrap_or(DateTime::<Utc>::MIN_UTC)
    } else {
        at.checked_add_signed(duration).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

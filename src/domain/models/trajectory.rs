//! Monte Carlo trajectory domain model.
//!
//! A trajectory is one simulated multi-step evolution of a stance under random
//! perturbation. A [`MonteCarloResult`] bundles many trajectories with the
//! statistics, risk assessment, confidence intervals and representative
//! scenarios derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::stance::{Frame, Objective, SelfModel, Stance, ValueDimension};

/// Parameters for a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Number of independent trajectories.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Steps per trajectory.
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,

    /// Per-dimension mutation probability, in `[0, 1]`.
    #[serde(default = "default_volatility")]
    pub volatility: f64,

    /// Confidence level for interval estimation, in `(0, 1)`.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Base seed for the per-trajectory sub-streams. `None` draws one random
    /// base seed per run; sub-streams are still derived from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Evaluate trajectories on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

const fn default_iterations() -> usize {
    1000
}

const fn default_time_steps() -> usize {
    20
}

const fn default_volatility() -> f64 {
    0.3
}

const fn default_confidence_level() -> f64 {
    0.95
}

const fn default_parallel() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            time_steps: default_time_steps(),
            volatility: default_volatility(),
            confidence_level: default_confidence_level(),
            seed: None,
            parallel: default_parallel(),
        }
    }
}

impl SimulationConfig {
    /// Create a seeded configuration with default parameters.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// One step of a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStep {
    pub step: usize,
    pub stance: Stance,
    pub coherence: f64,
    pub drift: f64,
    pub changed_fields: Vec<String>,
}

/// A single simulated evolution path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceTrajectory {
    /// Position in generation order (and RNG sub-stream index).
    pub index: usize,
    pub steps: Vec<TrajectoryStep>,
    pub total_drift: f64,
    /// Mean step coherence divided by 100.
    pub probability: f64,
}

impl StanceTrajectory {
    /// Coherence of the last step.
    pub fn final_coherence(&self) -> Option<f64> {
        self.steps.last().map(|s| s.coherence)
    }

    pub fn final_stance(&self) -> Option<&Stance> {
        self.steps.last().map(|s| &s.stance)
    }
}

/// Mean and standard deviation of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

/// Percentile breakdown of one value dimension's final values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueDistribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

/// Aggregate statistics over all trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStatistics {
    pub trajectory_count: usize,
    pub drift: Summary,
    /// Over every step coherence of every trajectory.
    pub coherence: Summary,
    /// Over the last step of each trajectory.
    pub final_coherence: Summary,
    pub modal_frame: Option<Frame>,
    pub modal_self_model: Option<SelfModel>,
    pub modal_objective: Option<Objective>,
    pub value_distributions: BTreeMap<ValueDimension, ValueDistribution>,
}

/// Coarse risk bucket for Monte Carlo outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Three-axis risk classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub coherence_risk: RiskTier,
    pub drift_risk: RiskTier,
    pub instability_risk: RiskTier,
    pub overall: RiskTier,
    /// Coefficient of variation of step coherence.
    pub coherence_variation: f64,
    pub recommendations: Vec<String>,
}

/// Two-sided interval around a mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub mean: f64,
    pub upper: f64,
}

/// Confidence intervals at the configured level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    pub level: f64,
    pub final_coherence: Interval,
    pub total_drift: Interval,
    pub values: BTreeMap<ValueDimension, Interval>,
}

/// A representative trajectory picked out of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub name: String,
    pub description: String,
    /// Position in the probability-sorted trajectory list.
    pub rank: usize,
    pub probability: f64,
    pub total_drift: f64,
    pub final_coherence: f64,
    pub final_stance: Stance,
}

/// Full output of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub config: SimulationConfig,
    pub initial_coherence: f64,
    /// Sorted non-increasing by probability.
    pub trajectories: Vec<StanceTrajectory>,
    pub statistics: TrajectoryStatistics,
    pub risk: RiskAssessment,
    pub confidence_intervals: ConfidenceIntervals,
    pub scenarios: Vec<ScenarioComparison>,
}

impl MonteCarloResult {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioComparison> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

/// Simulation parameter swept by sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    Volatility,
    TimeSteps,
}

impl SweepParameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volatility => "volatility",
            Self::TimeSteps => "time_steps",
        }
    }
}

/// Mean coherence observed at one swept value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub mean_coherence: f64,
}

/// Response of mean coherence to one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSensitivity {
    pub parameter: SweepParameter,
    pub points: Vec<SweepPoint>,
    pub sensitivity: f64,
    /// First swept value with mean coherence below 50 (volatility only).
    pub critical_threshold: Option<f64>,
}

/// Output of a sensitivity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    pub base_mean_coherence: f64,
    pub parameters: Vec<ParameterSensitivity>,
}

impl SensitivityAnalysis {
    pub fn parameter(&self, parameter: SweepParameter) -> Option<&ParameterSensitivity> {
        self.parameters.iter().find(|p| p.parameter == parameter)
    }
}

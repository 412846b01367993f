//! Monte Carlo trajectory simulation.
//!
//! Evolves a stance through many independent random walks, then summarizes
//! the outcome distribution: per-dimension percentiles, a three-axis risk
//! assessment, confidence intervals and four representative scenarios.
//!
//! Every trajectory draws from its own [`StdRng`] seeded by
//! [`derive_trajectory_seed`]. Results of a seeded run are therefore identical
//! whether trajectories are evaluated sequentially or on the rayon pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use crate::domain::models::{
    ConfidenceIntervals, Frame, Interval, MonteCarloResult, Objective, ParameterSensitivity,
    RiskAssessment, RiskTier, ScenarioComparison, SelfModel, SensitivityAnalysis,
    SimulationConfig, Stance, StanceTrajectory, Summary, SweepParameter, SweepPoint,
    TrajectoryStatistics, TrajectoryStep, ValueDimension, ValueDistribution,
};
use crate::services::coherence::value_coherence;
use crate::services::statistics;

/// Largest perturbation applied to a value dimension in one step.
const MAX_VALUE_STEP: f64 = 10.0;
const FRAME_SHIFT_DRIFT: f64 = 10.0;
const SELF_MODEL_SHIFT_DRIFT: f64 = 8.0;
const OBJECTIVE_SHIFT_DRIFT: f64 = 12.0;

pub const VOLATILITY_SWEEP: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
pub const TIME_STEP_SWEEP: [usize; 4] = [5, 10, 20, 40];
/// Mean coherence below which a volatility level counts as critical.
const CRITICAL_COHERENCE: f64 = 50.0;

/// Seed for trajectory `index` derived from `base_seed`.
///
/// SplitMix64 finalizer over `base_seed + (index + 1) * golden_gamma`, so
/// neighbouring indices land on unrelated streams.
pub fn derive_trajectory_seed(base_seed: u64, index: usize) -> u64 {
    let mut h = base_seed.wrapping_add((index as u64).wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    h = (h ^ (h >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 31)
}

/// Clamp a configuration into its valid ranges, logging every adjustment.
pub fn normalize_config(mut config: SimulationConfig) -> SimulationConfig {
    if config.iterations == 0 {
        warn!("simulation iterations raised from 0 to 1");
        config.iterations = 1;
    }
    if config.time_steps == 0 {
        warn!("simulation time_steps raised from 0 to 1");
        config.time_steps = 1;
    }
    let volatility = if config.volatility.is_nan() {
        0.0
    } else {
        config.volatility.clamp(0.0, 1.0)
    };
    if volatility != config.volatility {
        warn!(requested = config.volatility, applied = volatility, "volatility clamped");
        config.volatility = volatility;
    }
    let level = config.confidence_level;
    if level.is_nan() || level <= 0.0 || level >= 1.0 {
        warn!(
            requested = config.confidence_level,
            "confidence level outside (0, 1); using 0.95"
        );
        config.confidence_level = 0.95;
    }
    config
}

fn evolve<R: Rng + ?Sized>(config: &SimulationConfig, initial: &Stance, rng: &mut R) -> StanceTrajectory {
    let volatility = config.volatility;
    let mut stance = initial.clone();
    let mut steps = Vec::with_capacity(config.time_steps);
    let mut total_drift = 0.0;

    for step in 0..config.time_steps {
        let mut drift = 0.0;
        let mut changed_fields = Vec::new();

        for dimension in ValueDimension::ALL {
            if rng.gen::<f64>() < volatility {
                let before = stance.values.get(dimension);
                stance
                    .values
                    .set(dimension, before + rng.gen_range(-MAX_VALUE_STEP..=MAX_VALUE_STEP));
                let applied = (stance.values.get(dimension) - before).abs();
                if applied > 0.0 {
                    drift += applied;
                    changed_fields.push(format!("values.{dimension}"));
                }
            }
        }

        if rng.gen::<f64>() < 0.3 * volatility {
            let frame = Frame::ALL[rng.gen_range(0..Frame::ALL.len())];
            if frame != stance.frame {
                stance.frame = frame;
                stance.turns_since_last_shift = 0;
                drift += FRAME_SHIFT_DRIFT;
                changed_fields.push("frame".to_string());
            }
        }
        if rng.gen::<f64>() < 0.2 * volatility {
            let self_model = SelfModel::ALL[rng.gen_range(0..SelfModel::ALL.len())];
            if self_model != stance.self_model {
                stance.self_model = self_model;
                drift += SELF_MODEL_SHIFT_DRIFT;
                changed_fields.push("selfModel".to_string());
            }
        }
        if rng.gen::<f64>() < 0.1 * volatility {
            let objective = Objective::ALL[rng.gen_range(0..Objective::ALL.len())];
            if objective != stance.objective {
                stance.objective = objective;
                drift += OBJECTIVE_SHIFT_DRIFT;
                changed_fields.push("objective".to_string());
            }
        }

        if !changed_fields.is_empty() {
            stance.version = stance.version.saturating_add(1);
            stance.cumulative_drift += drift;
        }
        if !changed_fields.iter().any(|f| f == "frame") {
            stance.turns_since_last_shift = stance.turns_since_last_shift.saturating_add(1);
        }

        total_drift += drift;
        steps.push(TrajectoryStep {
            step,
            coherence: value_coherence(&stance.values),
            stance: stance.clone(),
            drift,
            changed_fields,
        });
    }

    let coherences: Vec<f64> = steps.iter().map(|s| s.coherence).collect();
    StanceTrajectory {
        index: 0,
        steps,
        total_drift,
        probability: statistics::mean(&coherences) / 100.0,
    }
}

fn run_trajectories(config: &SimulationConfig, initial: &Stance) -> Vec<StanceTrajectory> {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let evolve_one = |index: usize| {
        let mut rng = StdRng::seed_from_u64(derive_trajectory_seed(base_seed, index));
        let mut trajectory = evolve(config, initial, &mut rng);
        trajectory.index = index;
        trajectory
    };

    let mut trajectories: Vec<StanceTrajectory> = if config.parallel && config.iterations > 1 {
        (0..config.iterations).into_par_iter().map(evolve_one).collect()
    } else {
        (0..config.iterations).map(evolve_one).collect()
    };

    // Stable sort over index order keeps ties deterministic.
    trajectories.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    trajectories
}

fn summarize(values: &[f64]) -> Summary {
    Summary {
        mean: statistics::mean(values),
        std_dev: statistics::std_dev(values),
    }
}

fn distribution(values: &[f64]) -> ValueDistribution {
    let sorted = statistics::sorted(values);
    ValueDistribution {
        mean: statistics::mean(values),
        std_dev: statistics::std_dev(values),
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        p5: statistics::percentile_sorted(&sorted, 5.0),
        p25: statistics::percentile_sorted(&sorted, 25.0),
        p50: statistics::percentile_sorted(&sorted, 50.0),
        p75: statistics::percentile_sorted(&sorted, 75.0),
        p95: statistics::percentile_sorted(&sorted, 95.0),
    }
}

fn final_values(trajectories: &[StanceTrajectory], dimension: ValueDimension) -> Vec<f64> {
    trajectories
        .iter()
        .filter_map(StanceTrajectory::final_stance)
        .map(|stance| stance.values.get(dimension))
        .collect()
}

fn final_coherences(trajectories: &[StanceTrajectory]) -> Vec<f64> {
    trajectories
        .iter()
        .filter_map(StanceTrajectory::final_coherence)
        .collect()
}

/// Aggregate statistics over a set of trajectories.
pub fn compute_statistics(trajectories: &[StanceTrajectory]) -> TrajectoryStatistics {
    let drifts: Vec<f64> = trajectories.iter().map(|t| t.total_drift).collect();
    let step_coherences: Vec<f64> = trajectories
        .iter()
        .flat_map(|t| t.steps.iter().map(|s| s.coherence))
        .collect();
    let finals: Vec<&Stance> = trajectories
        .iter()
        .filter_map(StanceTrajectory::final_stance)
        .collect();

    TrajectoryStatistics {
        trajectory_count: trajectories.len(),
        drift: summarize(&drifts),
        coherence: summarize(&step_coherences),
        final_coherence: summarize(&final_coherences(trajectories)),
        modal_frame: statistics::mode(finals.iter().map(|s| s.frame)),
        modal_self_model: statistics::mode(finals.iter().map(|s| s.self_model)),
        modal_objective: statistics::mode(finals.iter().map(|s| s.objective)),
        value_distributions: ValueDimension::ALL
            .into_iter()
            .map(|d| (d, distribution(&final_values(trajectories, d))))
            .collect(),
    }
}

/// Classify statistics on the coherence, drift and instability axes.
pub fn assess_risk(stats: &TrajectoryStatistics) -> RiskAssessment {
    let mut recommendations = Vec::new();

    let final_coherence = stats.final_coherence.mean;
    let coherence_risk = if final_coherence < 30.0 {
        RiskTier::Critical
    } else if final_coherence < 50.0 {
        RiskTier::High
    } else if final_coherence < 70.0 {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    };
    if coherence_risk > RiskTier::Low {
        recommendations.push(format!(
            "Mean final coherence {final_coherence:.1} is {}; rebalance value weights",
            coherence_risk.as_str()
        ));
    }

    let drift = stats.drift.mean;
    let drift_risk = if drift > 200.0 {
        RiskTier::Critical
    } else if drift > 100.0 {
        RiskTier::High
    } else if drift > 50.0 {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    };
    if drift_risk > RiskTier::Low {
        recommendations.push(format!(
            "Mean total drift {drift:.1} is {}; reduce volatility or anchor key values",
            drift_risk.as_str()
        ));
    }

    let coherence_variation =
        statistics::coefficient_of_variation(stats.coherence.mean, stats.coherence.std_dev);
    let instability_risk = if coherence_variation > 0.5 {
        RiskTier::High
    } else if coherence_variation > 0.3 {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    };
    if instability_risk > RiskTier::Low {
        recommendations.push(format!(
            "Coherence varies widely between steps ({}); add stabilizing constraints",
            instability_risk.as_str()
        ));
    }

    RiskAssessment {
        coherence_risk,
        drift_risk,
        instability_risk,
        overall: coherence_risk.max(drift_risk).max(instability_risk),
        coherence_variation,
        recommendations,
    }
}

fn interval(values: &[f64], level: f64) -> Interval {
    let sorted = statistics::sorted(values);
    let alpha = 1.0 - level;
    Interval {
        lower: statistics::percentile_sorted(&sorted, 100.0 * alpha / 2.0),
        mean: statistics::mean(values),
        upper: statistics::percentile_sorted(&sorted, 100.0 * (1.0 - alpha / 2.0)),
    }
}

/// Percentile intervals at `level` for final coherence, drift and every value.
pub fn confidence_intervals(trajectories: &[StanceTrajectory], level: f64) -> ConfidenceIntervals {
    let drifts: Vec<f64> = trajectories.iter().map(|t| t.total_drift).collect();
    ConfidenceIntervals {
        level,
        final_coherence: interval(&final_coherences(trajectories), level),
        total_drift: interval(&drifts, level),
        values: ValueDimension::ALL
            .into_iter()
            .map(|d| (d, interval(&final_values(trajectories, d), level)))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn scenario(name: &str, description: &str, rank: usize, trajectory: &StanceTrajectory) -> Option<ScenarioComparison> {
    Some(ScenarioComparison {
        name: name.to_string(),
        description: description.to_string(),
        rank,
        probability: trajectory.probability,
        total_drift: trajectory.total_drift,
        final_coherence: trajectory.final_coherence()?,
        final_stance: trajectory.final_stance()?.clone(),
    })
}

/// Best, worst, median and highest-drift trajectories of a sorted run.
pub fn extract_scenarios(sorted: &[StanceTrajectory]) -> Vec<ScenarioComparison> {
    let Some(last) = sorted.len().checked_sub(1) else {
        return Vec::new();
    };
    let median = sorted.len() / 2;
    let high_drift = sorted
        .iter()
        .enumerate()
        .fold(0, |best, (rank, t)| {
            if t.total_drift > sorted[best].total_drift {
                rank
            } else {
                best
            }
        });

    [
        ("Best Case", "Most coherent trajectory", 0),
        ("Worst Case", "Least coherent trajectory", last),
        ("Median Case", "Trajectory at the median rank", median),
        ("High Drift", "Trajectory with the largest total drift", high_drift),
    ]
    .into_iter()
    .filter_map(|(name, description, rank)| scenario(name, description, rank, &sorted[rank]))
    .collect()
}

/// Monte Carlo simulator for stance evolution.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySimulator {
    config: SimulationConfig,
}

impl TrajectorySimulator {
    /// Create a simulator; out-of-range settings are clamped.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config: normalize_config(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Evolve one trajectory from `initial` using the supplied RNG.
    pub fn evolve_trajectory<R: Rng + ?Sized>(&self, initial: &Stance, rng: &mut R) -> StanceTrajectory {
        evolve(&self.config, initial, rng)
    }

    /// Run the full Monte Carlo simulation.
    #[instrument(skip(self, initial), fields(iterations = self.config.iterations, steps = self.config.time_steps))]
    pub fn simulate(&self, initial: &Stance) -> MonteCarloResult {
        let trajectories = run_trajectories(&self.config, initial);
        let statistics = compute_statistics(&trajectories);
        let risk = assess_risk(&statistics);
        let confidence_intervals = confidence_intervals(&trajectories, self.config.confidence_level);
        let scenarios = extract_scenarios(&trajectories);

        info!(
            trajectories = trajectories.len(),
            mean_drift = statistics.drift.mean,
            mean_final_coherence = statistics.final_coherence.mean,
            risk = risk.overall.as_str(),
            "monte carlo run complete"
        );

        MonteCarloResult {
            config: self.config.clone(),
            initial_coherence: value_coherence(&initial.values),
            trajectories,
            statistics,
            risk,
            confidence_intervals,
            scenarios,
        }
    }

    fn mean_coherence(config: &SimulationConfig, initial: &Stance) -> f64 {
        let trajectories = run_trajectories(config, initial);
        let coherences: Vec<f64> = trajectories
            .iter()
            .flat_map(|t| t.steps.iter().map(|s| s.coherence))
            .collect();
        statistics::mean(&coherences)
    }

    fn sweep(
        &self,
        initial: &Stance,
        parameter: SweepParameter,
        base_mean: f64,
        configs: Vec<(f64, SimulationConfig)>,
    ) -> ParameterSensitivity {
        let points: Vec<SweepPoint> = configs
            .into_iter()
            .map(|(value, config)| SweepPoint {
                value,
                mean_coherence: Self::mean_coherence(&config, initial),
            })
            .collect();

        let spread = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (last.mean_coherence - first.mean_coherence).abs(),
            _ => 0.0,
        };
        let sensitivity = if base_mean > f64::EPSILON {
            spread / base_mean
        } else if spread > f64::EPSILON {
            1.0
        } else {
            0.0
        };
        let critical_threshold = match parameter {
            SweepParameter::Volatility => points
                .iter()
                .find(|p| p.mean_coherence < CRITICAL_COHERENCE)
                .map(|p| p.value),
            SweepParameter::TimeSteps => None,
        };

        debug!(
            parameter = parameter.as_str(),
            sensitivity,
            critical_threshold = ?critical_threshold,
            "parameter swept"
        );

        ParameterSensitivity {
            parameter,
            points,
            sensitivity,
            critical_threshold,
        }
    }

    /// Sweep volatility and time steps one at a time, holding the rest fixed.
    #[instrument(skip(self, initial))]
    pub fn run_sensitivity_analysis(&self, initial: &Stance) -> SensitivityAnalysis {
        let base_mean = Self::mean_coherence(&self.config, initial);

        let volatility_configs = VOLATILITY_SWEEP
            .iter()
            .map(|&volatility| {
                (
                    volatility,
                    SimulationConfig {
                        volatility,
                        ..self.config.clone()
                    },
                )
            })
            .collect();
        let time_step_configs = TIME_STEP_SWEEP
            .iter()
            .map(|&time_steps| {
                (
                    time_steps as f64,
                    SimulationConfig {
                        time_steps,
                        ..self.config.clone()
                    },
                )
            })
            .collect();

        SensitivityAnalysis {
            base_mean_coherence: base_mean,
            parameters: vec![
                self.sweep(initial, SweepParameter::Volatility, base_mean, volatility_configs),
                self.sweep(initial, SweepParameter::TimeSteps, base_mean, time_step_configs),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Values;

    fn small(seed: u64) -> SimulationConfig {
        SimulationConfig {
            iterations: 50,
            time_steps: 10,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_volatility_changes_nothing() {
        let simulator = TrajectorySimulator::new(SimulationConfig {
            iterations: 1,
            time_steps: 1,
            volatility: 0.0,
            seed: Some(7),
            ..Default::default()
        });
        let mut initial = Stance::default();
        initial.values.curiosity = 90.0;
        let result = simulator.simulate(&initial);

        assert_eq!(result.trajectories.len(), 1);
        let trajectory = &result.trajectories[0];
        assert_eq!(trajectory.total_drift, 0.0);
        assert!(trajectory.steps[0].changed_fields.is_empty());
        assert_eq!(trajectory.steps[0].stance.values, initial.values);
        assert_eq!(trajectory.final_coherence(), Some(result.initial_coherence));
    }

    #[test]
    fn test_trajectories_sorted_by_probability() {
        let result = TrajectorySimulator::new(small(11)).simulate(&Stance::default());
        assert!(result
            .trajectories
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let simulator = TrajectorySimulator::new(small(42));
        let a = simulator.simulate(&Stance::default());
        let b = simulator.simulate(&Stance::default());
        assert_eq!(a.trajectories, b.trajectories);
        assert_eq!(a.confidence_intervals, b.confidence_intervals);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = TrajectorySimulator::new(small(99)).simulate(&Stance::default());
        let sequential = TrajectorySimulator::new(SimulationConfig {
            parallel: false,
            ..small(99)
        })
        .simulate(&Stance::default());
        assert_eq!(parallel.trajectories, sequential.trajectories);
        assert_eq!(parallel.statistics, sequential.statistics);
    }

    #[test]
    fn test_seed_derivation_spreads_indices() {
        let a = derive_trajectory_seed(1, 0);
        let b = derive_trajectory_seed(1, 1);
        let c = derive_trajectory_seed(2, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, derive_trajectory_seed(1, 0));
    }

    #[test]
    fn test_scenarios() {
        let result = TrajectorySimulator::new(small(5)).simulate(&Stance::default());
        let best = result.scenario("Best Case").unwrap();
        let worst = result.scenario("Worst Case").unwrap();
        let median = result.scenario("Median Case").unwrap();
        let drift = result.scenario("High Drift").unwrap();

        assert!(best.probability >= worst.probability);
        assert_eq!(median.rank, 25);
        let max_drift = result
            .trajectories
            .iter()
            .map(|t| t.total_drift)
            .fold(0.0, f64::max);
        assert_eq!(drift.total_drift, max_drift);
    }

    #[test]
    fn test_extract_scenarios_empty() {
        assert!(extract_scenarios(&[]).is_empty());
    }

    #[test]
    fn test_value_distributions_are_ordered() {
        let result = TrajectorySimulator::new(small(3)).simulate(&Stance::default());
        assert_eq!(result.statistics.value_distributions.len(), 7);
        for dist in result.statistics.value_distributions.values() {
            assert!(dist.min <= dist.p5);
            assert!(dist.p5 <= dist.p25);
            assert!(dist.p25 <= dist.p50);
            assert!(dist.p50 <= dist.p75);
            assert!(dist.p75 <= dist.p95);
            assert!(dist.p95 <= dist.max);
        }
        let ci = &result.confidence_intervals.final_coherence;
        assert!(ci.lower <= ci.upper);
    }

    #[test]
    fn test_step_bookkeeping() {
        let simulator = TrajectorySimulator::new(SimulationConfig {
            volatility: 1.0,
            time_steps: 5,
            ..small(8)
        });
        let mut rng = StdRng::seed_from_u64(8);
        let trajectory = simulator.evolve_trajectory(&Stance::default(), &mut rng);
        assert_eq!(trajectory.steps.len(), 5);
        let summed: f64 = trajectory.steps.iter().map(|s| s.drift).sum();
        assert!((summed - trajectory.total_drift).abs() < 1e-9);
        let last = trajectory.final_stance().unwrap();
        assert!((last.cumulative_drift - trajectory.total_drift).abs() < 1e-9);
        assert!(last.version > 1);
    }

    #[test]
    fn test_config_is_normalized() {
        let simulator = TrajectorySimulator::new(SimulationConfig {
            iterations: 0,
            time_steps: 0,
            volatility: 3.0,
            confidence_level: 1.5,
            ..Default::default()
        });
        let config = simulator.config();
        assert_eq!(config.iterations, 1);
        assert_eq!(config.time_steps, 1);
        assert_eq!(config.volatility, 1.0);
        assert_eq!(config.confidence_level, 0.95);
    }

    #[test]
    fn test_risk_tiers() {
        let mut stats = TrajectorySimulator::new(small(1))
            .simulate(&Stance::default())
            .statistics;
        stats.final_coherence.mean = 25.0;
        stats.drift.mean = 150.0;
        stats.coherence = Summary {
            mean: 0.0,
            std_dev: 0.0,
        };
        let risk = assess_risk(&stats);
        assert_eq!(risk.coherence_risk, RiskTier::Critical);
        assert_eq!(risk.drift_risk, RiskTier::High);
        assert_eq!(risk.instability_risk, RiskTier::High);
        assert_eq!(risk.overall, RiskTier::Critical);
        assert_eq!(risk.recommendations.len(), 3);
    }

    #[test]
    fn test_uniform_stance_is_low_risk_when_still() {
        let simulator = TrajectorySimulator::new(SimulationConfig {
            volatility: 0.0,
            ..small(2)
        });
        let result = simulator.simulate(&Stance {
            values: Values::uniform(60.0),
            ..Default::default()
        });
        assert_eq!(result.risk.overall, RiskTier::Low);
        assert!(result.risk.recommendations.is_empty());
    }

    #[test]
    fn test_unseeded_run_uses_independent_streams() {
        let result = TrajectorySimulator::new(SimulationConfig {
            iterations: 32,
            time_steps: 10,
            volatility: 0.5,
            seed: None,
            ..Default::default()
        })
        .simulate(&Stance::default());

        assert_eq!(result.trajectories.len(), 32);
        let first = &result.trajectories[0].steps;
        assert!(result.trajectories.iter().any(|t| &t.steps != first));
    }

    #[test]
    fn test_sensitivity_analysis_shape() {
        let simulator = TrajectorySimulator::new(SimulationConfig {
            iterations: 20,
            ..small(17)
        });
        let analysis = simulator.run_sensitivity_analysis(&Stance::default());
        let volatility = analysis.parameter(SweepParameter::Volatility).unwrap();
        let steps = analysis.parameter(SweepParameter::TimeSteps).unwrap();

        assert_eq!(volatility.points.len(), 5);
        assert_eq!(steps.points.len(), 4);
        assert!(steps.critical_threshold.is_none());
        assert!(volatility.sensitivity >= 0.0);
        assert!(analysis.base_mean_coherence > 0.0);
    }
}

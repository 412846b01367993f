//! Integration tests for Monte Carlo trajectory simulation.

mod common;

use stance_forecast::domain::models::{
    RiskTier, SimulationConfig, Stance, SweepParameter, ValueDimension, Values,
};
use stance_forecast::services::coherence::value_coherence;
use stance_forecast::TrajectorySimulator;

#[test]
fn test_still_run_changes_nothing() {
    let initial = common::polarized_stance();
    let result = TrajectorySimulator::new(SimulationConfig {
        iterations: 1,
        time_steps: 1,
        volatility: 0.0,
        seed: Some(1),
        ..Default::default()
    })
    .simulate(&initial);

    let trajectory = &result.trajectories[0];
    assert_eq!(trajectory.total_drift, 0.0);
    assert!(trajectory.steps.iter().all(|s| s.changed_fields.is_empty()));
    assert_eq!(result.initial_coherence, value_coherence(&initial.values));
    assert_eq!(trajectory.final_coherence(), Some(result.initial_coherence));
    assert_eq!(result.statistics.drift.std_dev, 0.0);
}

#[test]
fn test_seeded_runs_match_across_thread_modes() {
    let config = SimulationConfig {
        iterations: 64,
        time_steps: 12,
        volatility: 0.3,
        seed: Some(2024),
        parallel: true,
        ..Default::default()
    };
    let parallel = TrajectorySimulator::new(config.clone()).simulate(&common::curious_helper());
    let sequential = TrajectorySimulator::new(SimulationConfig {
        parallel: false,
        ..config
    })
    .simulate(&common::curious_helper());

    assert_eq!(parallel.trajectories, sequential.trajectories);
    assert_eq!(parallel.statistics, sequential.statistics);
}

#[test]
fn test_result_shape() {
    let result = TrajectorySimulator::new(SimulationConfig {
        iterations: 40,
        time_steps: 8,
        volatility: 0.25,
        seed: Some(5),
        ..Default::default()
    })
    .simulate(&common::polarized_stance());

    assert_eq!(result.trajectories.len(), 40);
    assert!(result.trajectories.iter().all(|t| t.steps.len() == 8));
    assert_eq!(result.statistics.value_distributions.len(), 7);
    assert!(result
        .statistics
        .value_distributions
        .contains_key(&ValueDimension::Curiosity));

    let best = result.scenario("Best Case").expect("best");
    let worst = result.scenario("Worst Case").expect("worst");
    let median = result.scenario("Median Case").expect("median");
    assert!(best.probability >= worst.probability);
    assert_eq!(median.rank, 20);

    let ci = &result.confidence_intervals;
    assert!(ci.final_coherence.lower <= ci.final_coherence.mean);
    assert!(ci.final_coherence.mean <= ci.final_coherence.upper);
    assert!(result.risk.overall >= result.risk.coherence_risk);
}

#[test]
fn test_sensitivity_analysis_covers_sweeps() {
    let simulator = TrajectorySimulator::new(SimulationConfig {
        iterations: 10,
        time_steps: 5,
        seed: Some(3),
        ..Default::default()
    });
    let analysis = simulator.run_sensitivity_analysis(&common::curious_helper());

    let volatility = analysis
        .parameter(SweepParameter::Volatility)
        .expect("volatility sweep");
    let steps = analysis
        .parameter(SweepParameter::TimeSteps)
        .expect("time step sweep");
    assert!(!volatility.points.is_empty());
    assert!(!steps.points.is_empty());
    assert!(volatility.sensitivity >= 0.0);
    assert!(steps.critical_threshold.is_none());
    assert!(analysis.base_mean_coherence > 0.0);
    assert!(RiskTier::Critical > RiskTier::Low);
}

#[test]
fn test_volatility_sweep_flags_incoherent_stance() {
    let split = Stance {
        values: Values {
            curiosity: 100.0,
            certainty: 100.0,
            risk: 100.0,
            novelty: 0.0,
            empathy: 0.0,
            provocation: 0.0,
            synthesis: 0.0,
        },
        ..Default::default()
    };
    let simulator = TrajectorySimulator::new(SimulationConfig {
        iterations: 50,
        time_steps: 10,
        seed: Some(1),
        ..Default::default()
    });
    let analysis = simulator.run_sensitivity_analysis(&split);
    let volatility = analysis
        .parameter(SweepParameter::Volatility)
        .expect("volatility sweep");

    assert_eq!(volatility.critical_threshold, Some(0.1));
    assert!(analysis.base_mean_coherence < 50.0);

    let first = volatility.points.first().expect("first point");
    let last = volatility.points.last().expect("last point");
    assert_eq!(first.value, 0.1);
    assert_eq!(last.value, 0.5);
    assert!(last.mean_coherence > first.mean_coherence);

    let expected = (last.mean_coherence - first.mean_coherence).abs() / analysis.base_mean_coherence;
    assert!((volatility.sensitivity - expected).abs() < 1e-12);
}

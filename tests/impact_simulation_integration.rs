//! Integration tests for deterministic impact simulation and stance comparison.

mod common;

use stance_forecast::domain::models::{
    ChangeSeverity, ComparisonWinner, Frame, ImpactRecommendation, RiskLevel, RollbackAction,
    StancePatch,
};
use stance_forecast::services::coherence::rule_coherence;
use stance_forecast::{compare_stances, ImpactConfig, ImpactSimulator};

#[test]
fn test_adversarial_frame_on_helpful_stance() {
    let current = common::curious_helper();
    let patch: StancePatch = serde_json::from_str(r#"{"frame": "adversarial"}"#).unwrap();

    let sim = ImpactSimulator::default().simulate(&current, &patch);

    let frame_warning = sim
        .coherence
        .breaking_changes
        .iter()
        .find(|c| c.field == "frame")
        .expect("frame breaking change");
    assert_eq!(frame_warning.severity, ChangeSeverity::Warning);
    assert!(sim.coherence.delta <= -15.0, "delta was {}", sim.coherence.delta);
    assert!(sim.coherence.risk_level >= RiskLevel::Low);
    assert_eq!(sim.resulting.frame, Frame::Adversarial);
    assert_eq!(sim.original, current, "input stance must not be mutated");
    assert_eq!(sim.changed_fields, vec!["frame".to_string()]);
}

#[test]
fn test_full_rollback_restores_original() {
    let current = common::curious_helper();
    let patch: StancePatch =
        serde_json::from_str(r#"{"values": {"risk": 95, "novelty": 90}}"#).unwrap();

    let sim = ImpactSimulator::default().simulate(&current, &patch);
    assert_eq!(sim.rollback_scenarios.len(), 3);

    let full = sim.rollback_scenario("Full Rollback").expect("full rollback");
    let restore = full
        .steps
        .iter()
        .find(|s| s.action == RollbackAction::RestoreSnapshot)
        .expect("restore step");
    let snapshot = restore.parameters.get("snapshot").expect("snapshot param");
    let restored: stance_forecast::Stance = serde_json::from_value(snapshot.clone()).unwrap();
    assert_eq!(restored, current);
}

#[test]
fn test_configured_thresholds_change_verdict() {
    let current = common::curious_helper();
    let patch: StancePatch =
        serde_json::from_str(r#"{"values": {"empathy": 65, "risk": 65, "synthesis": 35}}"#)
            .unwrap();

    let lenient = ImpactSimulator::default().simulate(&current, &patch);
    assert!(lenient.coherence.breaking_changes.is_empty());

    let strict = ImpactSimulator::new(ImpactConfig {
        value_change_threshold: 10.0,
        ..Default::default()
    })
    .simulate(&current, &patch);
    assert_eq!(strict.coherence.breaking_changes.len(), 1);
    assert_eq!(strict.coherence.breaking_changes[0].field, "values");
    assert_eq!(
        strict.coherence.breaking_changes[0].severity,
        ChangeSeverity::Warning
    );
    assert_ne!(strict.recommendation, ImpactRecommendation::Reject);
}

#[test]
fn test_compare_is_symmetric() {
    let a = common::curious_helper();
    let mut b = common::curious_helper();
    b.frame = Frame::Adversarial;

    let ab = compare_stances(&a, &b);
    let ba = compare_stances(&b, &a);

    assert_eq!(ab.winner, ComparisonWinner::A);
    assert_eq!(ba.winner, ComparisonWinner::B);
    assert!((ab.weighted_score_a - ba.weighted_score_b).abs() < 1e-12);
    assert!(rule_coherence(&a) > rule_coherence(&b));
}

pub mod config;
pub mod decay;
pub mod impact;
pub mod stance;
pub mod trajectory;

pub use config::{Config, ForecastConfig, ImpactConfig, LoggingConfig};
pub use decay::{
    CurveType, DecayCurve, DecayModel, DecayPoint, DecayPrediction, DecayRecommendation,
    FieldOverride, RecommendationKind, RecommendationPriority, RefreshEvent, RefreshSchedule,
    RefreshTrigger, RiskLevel, StanceObservation,
};
pub use impact::{
    BreakingChange, ChangeSeverity, CoherenceImpact, ComparisonWinner, ConfidenceInterval,
    CriterionResult, EffectImpact, ImpactRecommendation, ImpactSimulation, RollbackAction,
    RollbackScenario, RollbackStep, SideEffect, SideEffectKind, StanceComparison,
};
pub use stance::{
    clamp_score, Frame, Objective, SelfModel, Sentience, SentiencePatch, Stance, StanceField,
    StancePatch, ValueDimension, Values, ValuesPatch,
};
pub use trajectory::{
    ConfidenceIntervals, Interval, MonteCarloResult, ParameterSensitivity, RiskAssessment,
    RiskTier, ScenarioComparison, SensitivityAnalysis, SimulationConfig, StanceTrajectory,
    Summary, SweepParameter, SweepPoint, TrajectoryStatistics, TrajectoryStep,
    ValueDistribution,
};

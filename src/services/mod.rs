//! Forecasting and simulation services
//!
//! Pure computation over the domain models: decay forecasting, change impact
//! simulation, stance comparison, and Monte Carlo trajectory analysis.

pub mod coherence;
pub mod decay_forecaster;
pub mod impact_simulator;
pub mod statistics;
pub mod trajectory_simulator;

pub use coherence::{coherence_report, rule_coherence, value_coherence, CoherenceReport};
pub use decay_forecaster::{DecayForecaster, DecayProfile, DECAY_PROFILES};
pub use impact_simulator::{compare_stances, ChangeSet, ImpactSimulator};
pub use trajectory_simulator::TrajectorySimulator;

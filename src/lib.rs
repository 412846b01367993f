//! Stance Forecast - decay forecasting and change simulation for agent stances
//!
//! A *stance* is an agent's cognitive configuration: a frame, a self-model,
//! an objective, seven value scores, and sentience levels. This crate answers
//! three questions about one:
//!
//! - how each numeric field will decay toward baseline if left alone
//!   ([`services::DecayForecaster`]),
//! - what a proposed patch would do to coherence, with side effects and
//!   rollback plans ([`services::ImpactSimulator`]),
//! - how the stance may evolve under random perturbation, summarized by
//!   Monte Carlo statistics ([`services::TrajectorySimulator`]).
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Stance model, result types, and errors
//! - **Service Layer** (`services`): Forecasting and simulation logic
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use stance_forecast::{ImpactSimulator, Stance, StancePatch};
//! use stance_forecast::domain::models::Frame;
//!
//! let patch = StancePatch {
//!     frame: Some(Frame::Adversarial),
//!     ..Default::default()
//! };
//! let sim = ImpactSimulator::default().simulate(&Stance::default(), &patch);
//! assert!(sim.coherence.delta < 0.0);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, DecayPrediction, ForecastConfig, ImpactConfig, ImpactSimulation, LoggingConfig,
    MonteCarloResult, SimulationConfig, Stance, StancePatch,
};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{compare_stances, DecayForecaster, ImpactSimulator, TrajectorySimulator};

//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Validation of logging settings
//! - Clamping of forecasting and simulation parameters

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

//! Domain layer for stance forecasting
//!
//! This module contains the stance data model, result types, and domain errors.
//! Nothing here performs I/O.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};

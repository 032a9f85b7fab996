//! # Error Types
//!
//! This module defines custom error types for the tour optimization engine.
//! It provides specific error variants for the failure scenarios that may
//! occur while configuring and running the genetic algorithm.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evotour::error::{Result, TourError};
//!
//! fn check_rate(rate: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(TourError::Configuration(format!(
//!             "rate {} is outside [0, 1]",
//!             rate
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while running the tour optimizer.
///
/// This enum provides specific error variants for different failure scenarios
/// that may occur during configuration or evolution.
#[derive(Error, Debug)]
pub enum TourError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the best genome fails the
    /// permutation-completeness check at the end of a run. Carries the
    /// location indices absent from the genome, sorted ascending.
    #[error("Incomplete tour: missing location indices {missing:?}")]
    IncompleteTour { missing: Vec<usize> },

    /// Error raised by an injected distance function. Never produced by the
    /// built-in haversine metric; propagates out of the run unmodified.
    #[error("Distance computation error: {0}")]
    Distance(String),

    /// Error that occurs when a fitness calculation produces a non-finite
    /// value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for tour optimization operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `TourError`.
pub type Result<T> = std::result::Result<T, TourError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use evotour::error::{OptionExt, TourError};
///
/// fn best_fitness(scores: &[f64]) -> evotour::error::Result<f64> {
///     scores
///         .iter()
///         .copied()
///         .reduce(f64::max)
///         .ok_or_else_tour(|| TourError::EmptyPopulation)
/// }
///
/// assert!(best_fitness(&[]).is_err());
/// assert_eq!(best_fitness(&[-3.0, -1.0]).unwrap(), -1.0);
/// ```
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, TourError>` using a closure
    /// to generate the error.
    fn ok_or_else_tour<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TourError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_tour<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> TourError,
    {
        self.ok_or_else(err_fn)
    }
}

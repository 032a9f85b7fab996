//! # EngineOptions
//!
//! The `EngineOptions` struct represents the configuration for a run of the
//! genetic engine: population size, tournament size, generation count, the
//! crossover and mutation probabilities, and the elitism count.
//!
//! ## Example
//!
//! ```rust
//! use evotour::engine::EngineOptions;
//!
//! let options = EngineOptions::builder()
//!     .population_size(500)
//!     .tournament_size(25)
//!     .generations(50)
//!     .mutation_rate(0.02)
//!     .crossover_rate(0.8)
//!     .elitism_count(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_population_size(), 500);
//! ```

use crate::error::{Result, TourError};

/// Configuration for the evolutionary run. All six tunables must be set
/// (directly or through defaults) before the engine runs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EngineOptions {
    population_size: usize,
    tournament_size: usize,
    generations: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elitism_count: usize,
}

impl EngineOptions {
    /// Creates options with all six tunables specified.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error for a zero population or tournament
    /// size, a rate outside `[0, 1]`, or an elitism count exceeding the
    /// population size.
    pub fn new(
        population_size: usize,
        tournament_size: usize,
        generations: usize,
        mutation_rate: f64,
        crossover_rate: f64,
        elitism_count: usize,
    ) -> Result<Self> {
        let options = Self {
            population_size,
            tournament_size,
            generations,
            mutation_rate,
            crossover_rate,
            elitism_count,
        };
        options.validate()?;
        Ok(options)
    }

    /// Returns a builder for creating an `EngineOptions` instance.
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }

    /// How many chromosomes in each generation.
    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    /// How many chromosomes are sampled for each tournament.
    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// How many generations to run. The engine always runs the full count.
    pub fn get_generations(&self) -> usize {
        self.generations
    }

    /// Probability that a child is mutated, applied independently per child.
    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Probability that two selected parents undergo crossover.
    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// How many of the fittest chromosomes carry over unchanged.
    pub fn get_elitism_count(&self) -> usize {
        self.elitism_count
    }

    /// Checks every tunable, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TourError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(TourError::Configuration(
                "Tournament size cannot be zero".to_string(),
            ));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TourError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !self.crossover_rate.is_finite() || !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(TourError::Configuration(format!(
                "Crossover rate must be within [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if self.elitism_count > self.population_size {
            return Err(TourError::Configuration(format!(
                "Elitism count ({}) cannot exceed population size ({})",
                self.elitism_count, self.population_size
            )));
        }
        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            population_size: 1000,
            tournament_size: 50,
            generations: 100,
            mutation_rate: 0.01,
            crossover_rate: 0.8,
            elitism_count: 10,
        }
    }
}

/// Builder for `EngineOptions`.
///
/// Provides a fluent interface for constructing `EngineOptions` instances;
/// unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    population_size: Option<usize>,
    tournament_size: Option<usize>,
    generations: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    elitism_count: Option<usize>,
}

impl EngineOptionsBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the tournament size.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the number of generations.
    pub fn generations(mut self, value: usize) -> Self {
        self.generations = Some(value);
        self
    }

    /// Sets the mutation rate.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the crossover rate.
    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    /// Sets the elitism count.
    pub fn elitism_count(mut self, value: usize) -> Self {
        self.elitism_count = Some(value);
        self
    }

    /// Builds and validates the `EngineOptions` instance.
    pub fn build(self) -> Result<EngineOptions> {
        let defaults = EngineOptions::default();
        EngineOptions::new(
            self.population_size.unwrap_or(defaults.population_size),
            self.tournament_size.unwrap_or(defaults.tournament_size),
            self.generations.unwrap_or(defaults.generations),
            self.mutation_rate.unwrap_or(defaults.mutation_rate),
            self.crossover_rate.unwrap_or(defaults.crossover_rate),
            self.elitism_count.unwrap_or(defaults.elitism_count),
        )
    }
}

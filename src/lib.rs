//! # evotour
//!
//! A genetic-algorithm tour optimizer for geographic waypoints: given an
//! ordered list of locations, the engine evolves a population of candidate
//! visiting orders (open paths, not round trips) and returns the shortest
//! tour it found after a fixed number of generations.
//!
//! The core combines order crossover (OX) over permutations, elitist and
//! tournament selection, swap mutation, a sharded memoized distance cache,
//! and per-worker random streams for the parallel initialization phase.
//!
//! ## Example
//!
//! ```rust
//! use evotour::{EngineOptions, GeneticEngine, Location};
//!
//! fn main() -> evotour::Result<()> {
//!     let locations = vec![
//!         Location::new("A", 0.0, 0.0),
//!         Location::new("B", 0.0, 1.0),
//!         Location::new("C", 0.0, 2.0),
//!         Location::new("D", 0.0, 3.0),
//!     ];
//!
//!     let options = EngineOptions::builder()
//!         .population_size(50)
//!         .tournament_size(5)
//!         .generations(20)
//!         .mutation_rate(0.05)
//!         .crossover_rate(0.9)
//!         .elitism_count(2)
//!         .build()?;
//!
//!     let mut engine = GeneticEngine::new(locations, options)?.with_seed(7);
//!     let result = engine.run()?;
//!
//!     assert_eq!(result.tour.len(), 4);
//!     assert!(result.total_distance_km > 0.0);
//!     Ok(())
//! }
//! ```

pub mod chromosome;
pub mod distance;
pub mod engine;
pub mod error;
pub mod location;
pub mod rng;

// Re-export commonly used types for convenience
pub use chromosome::Chromosome;
pub use distance::{haversine_km, DistanceCache, DistanceMetric, EARTH_RADIUS_KM};
pub use engine::{EngineOptions, GenerationObserver, GeneticEngine, TourResult, TracingObserver};
pub use error::{OptionExt, Result, TourError};
pub use location::Location;

pub mod observer;
pub mod options;
pub mod runner;

pub use observer::{GenerationObserver, TracingObserver};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use runner::{GeneticEngine, TourResult};

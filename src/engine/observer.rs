//! Progress observation seam.
//!
//! The engine reports per-generation progress through this callback so the
//! presentation of a run (console, UI, log files) stays outside the core.

/// Receives the best fitness of each completed generation.
pub trait GenerationObserver: Send {
    /// Called once per generation, after the new population has replaced
    /// the old one. `best_fitness` is the negative tour distance of the
    /// fittest chromosome in the new population.
    fn on_generation(&mut self, generation: usize, best_fitness: f64);
}

/// A `GenerationObserver` that forwards progress to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn on_generation(&mut self, generation: usize, best_fitness: f64) {
        tracing::info!(
            generation,
            best_distance_km = -best_fitness,
            "generation complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording {
        calls: Vec<(usize, f64)>,
    }

    impl GenerationObserver for Recording {
        fn on_generation(&mut self, generation: usize, best_fitness: f64) {
            self.calls.push((generation, best_fitness));
        }
    }

    #[test]
    fn test_observer_is_object_safe() {
        let mut observer: Box<dyn GenerationObserver> = Box::new(Recording { calls: Vec::new() });
        observer.on_generation(0, -12.5);
        observer.on_generation(1, -11.0);
    }
}

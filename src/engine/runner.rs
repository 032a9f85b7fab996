//! # GeneticEngine
//!
//! Orchestrates the run: parallel construction of the initial population,
//! the sequential generational loop (elitism, tournament selection, order
//! crossover, mutation), and extraction of the verified best tour.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::chromosome::Chromosome;
use crate::distance::{haversine_km, DistanceCache, DistanceMetric};
use crate::engine::observer::GenerationObserver;
use crate::engine::options::EngineOptions;
use crate::error::{OptionExt, Result, TourError};
use crate::location::Location;
use crate::rng::{RandomNumberGenerator, SeedSequence};

/// The outcome of a successful run.
#[derive(Debug, Clone)]
pub struct TourResult {
    /// The fittest chromosome of the final generation.
    pub best: Chromosome,
    /// The visiting order as owned location records, in genome order.
    pub tour: Vec<Location>,
    /// Total open-path distance of the tour, i.e. the negated fitness.
    pub total_distance_km: f64,
}

/// Evolves a population of candidate tours over the configured locations.
///
/// The engine owns the only piece of shared mutable state, the
/// [`DistanceCache`]; every worker in the parallel initialization phase gets
/// an exclusive population slot and its own random stream.
pub struct GeneticEngine {
    locations: Arc<[Location]>,
    options: EngineOptions,
    cache: DistanceCache,
    seeds: SeedSequence,
    observer: Option<Box<dyn GenerationObserver>>,
}

impl GeneticEngine {
    /// Creates an engine over the given locations using the default
    /// haversine metric.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the options are invalid or fewer
    /// than two locations are supplied.
    pub fn new(locations: Vec<Location>, options: EngineOptions) -> Result<Self> {
        Self::with_metric(
            locations,
            options,
            Arc::new(|a: &Location, b: &Location| Ok(haversine_km(a, b))),
        )
    }

    /// Creates an engine with a custom pairwise distance metric.
    pub fn with_metric(
        locations: Vec<Location>,
        options: EngineOptions,
        metric: DistanceMetric,
    ) -> Result<Self> {
        options.validate()?;
        if locations.len() < 2 {
            return Err(TourError::Configuration(format!(
                "At least two locations are required, got {}",
                locations.len()
            )));
        }
        let locations: Arc<[Location]> = locations.into();
        let endpoints = Arc::clone(&locations);
        let cache = DistanceCache::new(Box::new(move |i, j| metric(&endpoints[i], &endpoints[j])));
        Ok(Self {
            locations,
            options,
            cache,
            seeds: SeedSequence::from_entropy(),
            observer: None,
        })
    }

    /// Fixes the base seed, making the whole run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seeds = SeedSequence::new(seed);
        self
    }

    /// Attaches an observer that receives per-generation best fitness.
    pub fn with_observer(mut self, observer: Box<dyn GenerationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The locations this engine optimizes over, in input order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of distinct location pairs whose distance has been computed.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Runs the configured number of generations and returns the best tour.
    ///
    /// # Errors
    ///
    /// - `Distance` / `FitnessCalculation` errors from the metric abort the
    ///   run immediately with no partial result.
    /// - `IncompleteTour` if the final best genome fails the
    ///   permutation-completeness check.
    pub fn run(&mut self) -> Result<TourResult> {
        let location_count = self.locations.len();
        let population_size = self.options.get_population_size();
        let generations = self.options.get_generations();
        let tournament_size = self.options.get_tournament_size();
        let elitism_count = self.options.get_elitism_count();
        let crossover_rate = self.options.get_crossover_rate();
        let mutation_rate = self.options.get_mutation_rate();

        tracing::info!(
            locations = location_count,
            population_size,
            generations,
            "starting tour optimization"
        );

        let cache = &self.cache;
        let seeds = &self.seeds;
        let fitness = |genome: &[usize]| evaluate_genome(cache, genome);

        // Each slot is written by exactly one worker, reading only the
        // immutable locations and the shared cache.
        let mut population: Vec<Chromosome> = (0..population_size)
            .into_par_iter()
            .map(|slot| {
                let mut rng = seeds.stream(slot as u64);
                Chromosome::random(location_count, &mut rng, &fitness)
            })
            .collect::<Result<Vec<_>>>()?;

        // The generational loop is sequential; stream indices below
        // population_size belong to the initialization workers.
        let mut rng = seeds.stream(population_size as u64);

        for generation in 0..generations {
            let mut next = Vec::with_capacity(population_size);
            if elitism_count > 0 {
                select_elites(&population, elitism_count, &mut next);
            }
            while next.len() < population_size {
                let mut first = tournament_select(&population, tournament_size, &mut rng)?;
                let mut second = tournament_select(&population, tournament_size, &mut rng)?;
                if rng.chance(crossover_rate) {
                    let (child_of_first, child_of_second) =
                        first.crossover_with_random_range(&second, &mut rng, &fitness)?;
                    first = child_of_first;
                    second = child_of_second;
                }
                if rng.chance(mutation_rate) {
                    first.mutate(&mut rng, &fitness)?;
                }
                next.push(first);
                if next.len() < population_size {
                    if rng.chance(mutation_rate) {
                        second.mutate(&mut rng, &fitness)?;
                    }
                    next.push(second);
                }
            }
            population = next;

            let generation_best = population
                .iter()
                .map(Chromosome::fitness)
                .fold(f64::NEG_INFINITY, f64::max);
            tracing::debug!(
                generation,
                best_distance_km = -generation_best,
                "generation complete"
            );
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_generation(generation, generation_best);
            }
        }

        // First occurrence wins ties, so the result is deterministic for a
        // fixed seed.
        let mut best_index = 0;
        for (index, chromosome) in population.iter().enumerate().skip(1) {
            if chromosome.fitness() > population[best_index].fitness() {
                best_index = index;
            }
        }
        let best = population.swap_remove(best_index);

        verify_complete(best.genome(), location_count)?;

        let tour: Vec<Location> = best
            .genome()
            .iter()
            .map(|&index| self.locations[index].clone())
            .collect();
        let total_distance_km = -best.fitness();
        tracing::info!(total_distance_km, "tour optimization finished");

        Ok(TourResult {
            best,
            tour,
            total_distance_km,
        })
    }
}

/// Fitness of a genome: the negative sum of consecutive-location distances.
fn evaluate_genome(cache: &DistanceCache, genome: &[usize]) -> Result<f64> {
    let mut fitness = 0.0;
    for pair in genome.windows(2) {
        fitness -= cache.get_or_compute(pair[0], pair[1])?;
    }
    if !fitness.is_finite() {
        return Err(TourError::FitnessCalculation(format!(
            "Non-finite fitness encountered: {fitness}"
        )));
    }
    Ok(fitness)
}

/// Samples `tournament_size` chromosomes uniformly with replacement and
/// clones the fittest of them.
fn tournament_select(
    population: &[Chromosome],
    tournament_size: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Chromosome> {
    let mut winner: Option<&Chromosome> = None;
    for _ in 0..tournament_size {
        let challenger = &population[rng.index(population.len())];
        let beats_current = match winner {
            Some(current) => challenger.fitness() > current.fitness(),
            None => true,
        };
        if beats_current {
            winner = Some(challenger);
        }
    }
    winner.cloned().ok_or_else_tour(|| TourError::EmptyPopulation)
}

/// Clones the top `count` chromosomes by fitness into `next`.
///
/// Bounded top-K selection: a min-heap of size `count` whose root is the
/// weakest elite so far; anything fitter displaces it. Ties are broken
/// arbitrarily. The output order is unspecified.
fn select_elites(population: &[Chromosome], count: usize, next: &mut Vec<Chromosome>) {
    let mut heap: BinaryHeap<Reverse<EliteEntry>> = BinaryHeap::with_capacity(count);
    for (index, chromosome) in population.iter().enumerate() {
        let entry = EliteEntry {
            fitness: chromosome.fitness(),
            index,
        };
        if heap.len() < count {
            heap.push(Reverse(entry));
        } else if let Some(Reverse(weakest)) = heap.peek() {
            if entry.fitness > weakest.fitness {
                heap.pop();
                heap.push(Reverse(entry));
            }
        }
    }
    next.extend(
        heap.into_iter()
            .map(|Reverse(entry)| population[entry.index].clone()),
    );
}

#[derive(Debug, PartialEq)]
struct EliteEntry {
    fitness: f64,
    index: usize,
}

impl Eq for EliteEntry {}

impl PartialOrd for EliteEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EliteEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Checks that `genome` contains every index in `0..location_count`.
fn verify_complete(genome: &[usize], location_count: usize) -> Result<()> {
    let mut seen = vec![false; location_count];
    for &gene in genome {
        if gene < location_count {
            seen[gene] = true;
        }
    }
    let missing: Vec<usize> = seen
        .iter()
        .enumerate()
        .filter(|(_, &present)| !present)
        .map(|(index, _)| index)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TourError::IncompleteTour { missing })
    }
}

//! # Chromosome
//!
//! A `Chromosome` is one candidate tour: a genome that is always a
//! permutation of the location indices `0..N`, plus its fitness (the
//! negative total tour distance, so higher is better). Every operation that
//! produces or changes a genome re-evaluates fitness before the chromosome
//! becomes observable, so a stale fitness can never leak out.

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// A candidate tour and its fitness.
///
/// `Clone` performs an independent deep copy of the genome; population slots
/// never alias each other's buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genome: Vec<usize>,
    fitness: f64,
}

impl Chromosome {
    /// Builds a chromosome with a uniformly random permutation of
    /// `0..length`, shuffled with Fisher–Yates using the supplied stream.
    pub fn random<F>(length: usize, rng: &mut RandomNumberGenerator, fitness: F) -> Result<Self>
    where
        F: Fn(&[usize]) -> Result<f64>,
    {
        let mut genome: Vec<usize> = (0..length).collect();
        for i in (1..length).rev() {
            let j = rng.index(i + 1);
            genome.swap(i, j);
        }
        Self::from_genome(genome, fitness)
    }

    /// Builds a chromosome from an explicit genome.
    ///
    /// The genome must be a permutation of `0..genome.len()`; the engine's
    /// operators preserve that invariant and the final result is verified
    /// before being returned to the caller.
    pub fn from_genome<F>(genome: Vec<usize>, fitness: F) -> Result<Self>
    where
        F: Fn(&[usize]) -> Result<f64>,
    {
        let fitness = fitness(&genome)?;
        Ok(Self { genome, fitness })
    }

    /// The tour as an ordered sequence of location indices.
    pub fn genome(&self) -> &[usize] {
        &self.genome
    }

    /// Negative total tour distance; larger is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Swaps two distinct genome positions chosen uniformly at random and
    /// re-evaluates fitness.
    ///
    /// The second position is resampled until it differs from the first. A
    /// genome shorter than two entries has no distinct pair and is left
    /// untouched.
    pub fn mutate<F>(&mut self, rng: &mut RandomNumberGenerator, fitness: F) -> Result<()>
    where
        F: Fn(&[usize]) -> Result<f64>,
    {
        let length = self.genome.len();
        if length < 2 {
            return Ok(());
        }
        let first = rng.index(length);
        let mut second = rng.index(length);
        while second == first {
            second = rng.index(length);
        }
        self.genome.swap(first, second);
        self.fitness = fitness(&self.genome)?;
        Ok(())
    }

    /// Order crossover (OX) against `other` over the inclusive position
    /// range `[range_start, range_end]`.
    ///
    /// The child of `self` copies `other`'s genes at the crossover
    /// positions, then fills its remaining slots by scanning `self`'s genome
    /// circularly from `range_end + 1`, skipping genes already present; the
    /// child of `other` mirrors the procedure. Because the fill phase draws
    /// only from genes not yet used, both children are valid permutations
    /// for any range size, including a single position or the whole genome.
    ///
    /// Both parents must have equal-length genomes and the range must lie
    /// within them.
    pub fn crossover_with<F>(
        &self,
        other: &Self,
        range_start: usize,
        range_end: usize,
        fitness: F,
    ) -> Result<(Self, Self)>
    where
        F: Fn(&[usize]) -> Result<f64>,
    {
        debug_assert_eq!(self.genome.len(), other.genome.len());
        debug_assert!(range_start <= range_end && range_end < self.genome.len());
        let length = self.genome.len();

        let mut child_of_self = vec![0; length];
        let mut child_of_other = vec![0; length];
        // Genomes are permutations of 0..length, so a bool table is enough
        // to track used genes; anything else would need a hash set.
        let mut used_by_self_child = vec![false; length];
        let mut used_by_other_child = vec![false; length];

        for i in range_start..=range_end {
            let gene = other.genome[i];
            child_of_self[i] = gene;
            used_by_self_child[gene] = true;

            let gene = self.genome[i];
            child_of_other[i] = gene;
            used_by_other_child[gene] = true;
        }

        let fill_start = (range_end + 1) % length;
        let mut self_cursor = ScanState::new(fill_start);
        let mut other_cursor = ScanState::new(fill_start);
        let mut genes_to_copy = length - (range_end - range_start + 1);

        while genes_to_copy > 0 {
            self_cursor.copy_next_unused(&self.genome, &mut child_of_self, &mut used_by_self_child);
            other_cursor.copy_next_unused(
                &other.genome,
                &mut child_of_other,
                &mut used_by_other_child,
            );
            genes_to_copy -= 1;
        }

        Ok((
            Self::from_genome(child_of_self, &fitness)?,
            Self::from_genome(child_of_other, &fitness)?,
        ))
    }

    /// Order crossover over a randomly chosen range.
    ///
    /// `range_start` is uniform in `[0, N-2]` and `range_end` uniform in
    /// `[range_start, N-2]`, so the tail position is always left to the fill
    /// phase.
    pub fn crossover_with_random_range<F>(
        &self,
        other: &Self,
        rng: &mut RandomNumberGenerator,
        fitness: F,
    ) -> Result<(Self, Self)>
    where
        F: Fn(&[usize]) -> Result<f64>,
    {
        let length = self.genome.len();
        let range_start = rng.index(length - 1);
        let range_end = rng.index_from(range_start, length - 1);
        self.crossover_with(other, range_start, range_end, fitness)
    }
}

/// Cursor pair for the OX fill phase: where to read in the parent and where
/// to write in the child, both advancing circularly.
struct ScanState {
    read: usize,
    write: usize,
}

impl ScanState {
    fn new(start: usize) -> Self {
        Self {
            read: start,
            write: start,
        }
    }

    fn copy_next_unused(&mut self, parent: &[usize], child: &mut [usize], used: &mut [bool]) {
        let length = parent.len();
        while used[parent[self.read]] {
            self.read = (self.read + 1) % length;
        }
        let gene = parent[self.read];
        child[self.write] = gene;
        used[gene] = true;
        self.write = (self.write + 1) % length;
    }
}

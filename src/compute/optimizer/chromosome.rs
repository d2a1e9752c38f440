//! Random chromosome generation.

use rand::prelude::*;

use crate::schema::{Catalog, Chromosome};

/// Random number generator wrapper for the search.
///
/// Every random draw of a run goes through one instance, so a fixed seed
/// reproduces the whole sequence of populations.
pub struct OrderRng {
    rng: StdRng,
}

impl OrderRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a chromosome whose quantities sum to `total_quantity`.
    ///
    /// Each unit goes to a uniformly drawn dish, so orders tend to spread small
    /// counts over many dishes rather than concentrate on a few.
    pub fn random_chromosome(&mut self, catalog: &Catalog, total_quantity: u32) -> Chromosome {
        let mut chromosome = Chromosome::empty(catalog);
        let len = chromosome.len();
        if len == 0 {
            return chromosome;
        }

        for _ in 0..total_quantity {
            let position = self.rng.gen_range(0..len);
            chromosome.genes[position].quantity += 1;
        }

        chromosome
    }

    /// Generate the initial population.
    pub fn initial_population(
        &mut self,
        catalog: &Catalog,
        total_quantity: u32,
        size: usize,
    ) -> Vec<Chromosome> {
        (0..size)
            .map(|_| self.random_chromosome(catalog, total_quantity))
            .collect()
    }
}

impl RngCore for OrderRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

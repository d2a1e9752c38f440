//! Uniform crossover over a mating pool.

use rand::Rng;

use crate::schema::Chromosome;

use super::search::Candidate;

/// Uniform crossover: each locus swaps its whole gene between the two
/// chromosomes with probability 0.5.
///
/// Both chromosomes share a locus layout, so a swap only exchanges quantities.
/// Total quantities are not preserved.
pub fn breed<R: Rng>(first: &mut Chromosome, second: &mut Chromosome, rng: &mut R) {
    for (a, b) in first.genes.iter_mut().zip(second.genes.iter_mut()) {
        if rng.gen_bool(0.5) {
            std::mem::swap(a, b);
        }
    }
}

/// Breed the next population from a mating pool of indices into `population`.
///
/// The first `elite_count` pool entries are copied unchanged. The remaining
/// entries are paired from both ends of the pool inwards, each pair producing
/// two children; an unpaired middle entry is copied unchanged. Copies keep their
/// cached fitness, children start unevaluated.
pub fn crossover<R: Rng>(
    mating_pool: &[usize],
    population: &[Candidate],
    elite_count: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let elite_count = elite_count.min(mating_pool.len());
    let mut next = Vec::with_capacity(mating_pool.len());

    for &index in &mating_pool[..elite_count] {
        next.push(population[index].clone());
    }

    if mating_pool.len() == elite_count {
        return next;
    }

    let mut low = elite_count;
    let mut high = mating_pool.len() - 1;
    while low < high {
        let mut first = population[mating_pool[low]].chromosome.clone();
        let mut second = population[mating_pool[high]].chromosome.clone();
        breed(&mut first, &mut second, rng);
        next.push(Candidate::new(first));
        next.push(Candidate::new(second));
        low += 1;
        high -= 1;
    }

    if low == high {
        next.push(population[mating_pool[low]].clone());
    }

    next
}

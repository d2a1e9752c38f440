//! Elitist roulette-wheel selection.

use rand::Rng;

use super::ranking::RankedEntry;

/// Cumulative percentages of a roulette wheel built over `ranked` in order.
///
/// Negative fitness values shift the whole wheel by `-min` so every slice is
/// non-negative; the lowest-ranked individual then gets an empty slice. A wheel
/// with zero total weight gives every entry an equal slice.
pub fn roulette_wheel(ranked: &[RankedEntry]) -> Vec<f64> {
    if ranked.is_empty() {
        return Vec::new();
    }

    let min = ranked
        .iter()
        .map(|e| e.fitness)
        .fold(f64::INFINITY, f64::min);
    let offset = if min < 0.0 { -min } else { 0.0 };
    let total: f64 = ranked.iter().map(|e| e.fitness + offset).sum();

    if !(total.is_finite() && total > 0.0) {
        let n = ranked.len() as f64;
        return (1..=ranked.len()).map(|j| 100.0 * j as f64 / n).collect();
    }

    let mut cumulative = 0.0;
    ranked
        .iter()
        .map(|e| {
            cumulative += e.fitness + offset;
            100.0 * cumulative / total
        })
        .collect()
}

/// Build a mating pool of population indices, the same length as `ranked`.
///
/// The first `elite_count` ranked indices are copied in rank order; the rest are
/// drawn from the roulette wheel.
pub fn select<R: Rng>(ranked: &[RankedEntry], elite_count: usize, rng: &mut R) -> Vec<usize> {
    let elite_count = elite_count.min(ranked.len());
    let mut pool: Vec<usize> = ranked[..elite_count].iter().map(|e| e.index).collect();

    let wheel = roulette_wheel(ranked);
    for _ in elite_count..ranked.len() {
        let pick: f64 = rng.gen_range(0.0..100.0);
        let slot = wheel
            .iter()
            .position(|&pct| pct >= pick)
            .unwrap_or(ranked.len() - 1);
        pool.push(ranked[slot].index);
    }

    pool
}

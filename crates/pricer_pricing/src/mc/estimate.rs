//! Batched path driver and the resulting estimate.

use rayon::prelude::*;

use super::config::MonteCarloConfig;
use crate::rng::PricerRng;

/// Discounted Monte Carlo estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct McEstimate {
    /// Present value (discounted sample mean).
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
}

impl McEstimate {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Running payoff sums for one batch.
#[derive(Clone, Copy, Debug, Default)]
struct BatchStats {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl BatchStats {
    #[inline]
    fn push(&mut self, payoff: f64) {
        self.sum += payoff;
        self.sum_sq += payoff * payoff;
        self.count += 1;
    }

    fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            count: self.count + other.count,
        }
    }

    fn estimate(self, discount_factor: f64) -> McEstimate {
        let n = self.count as f64;
        let mean = self.sum / n;
        let std_error = if self.count > 1 {
            let variance = ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0);
            (variance / n).sqrt()
        } else {
            0.0
        };

        McEstimate {
            price: mean * discount_factor,
            std_error: std_error * discount_factor,
            n_paths: self.count,
        }
    }
}

/// Simulate every path and return the discounted mean payoff.
///
/// `path_payoff` receives the batch stream and a scratch buffer reused
/// across the batch's paths, and returns one undiscounted payoff. Batches
/// run on the rayon pool and are reduced in batch order.
pub(crate) fn run_batched<F>(
    config: &MonteCarloConfig,
    discount_factor: f64,
    path_payoff: F,
) -> McEstimate
where
    F: Fn(&mut PricerRng, &mut Vec<f64>) -> f64 + Sync,
{
    let batches: Vec<BatchStats> = (0..config.n_batches())
        .into_par_iter()
        .map(|index| {
            let mut rng = PricerRng::for_batch(config.seed(), index);
            let mut scratch = Vec::new();
            let mut stats = BatchStats::default();
            for _ in 0..config.batch_len(index) {
                stats.push(path_payoff(&mut rng, &mut scratch));
            }
            stats
        })
        .collect();

    batches
        .into_iter()
        .fold(BatchStats::default(), BatchStats::merge)
        .estimate(discount_factor)
}

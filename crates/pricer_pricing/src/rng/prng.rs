//! Seeded normal draws for path simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// One reproducible random stream.
///
/// Two streams built from the same seed yield identical draws.
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
/// let mut shocks = vec![0.0; 16];
/// rng.fill_normal(&mut shocks);
/// assert!(shocks.iter().all(|z| z.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Stream seeded with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Stream for path batch `index` under base seed `seed`.
    #[inline]
    pub fn for_batch(seed: u64, index: usize) -> Self {
        Self::from_seed(seed.wrapping_add(index as u64))
    }

    /// Seed this stream started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw on `[0, 1)`.
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Standard normal draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Overwrite `buffer` with standard normal draws.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

//! Simulation sizing and seeding.
//!
//! Paths run in fixed-size batches and batch `i` draws from the stream
//! seeded `seed + i`.

use super::error::ConfigError;

/// Upper bound on `n_paths`.
pub const MAX_PATHS: usize = 10_000_000;

/// Upper bound on `n_steps`.
pub const MAX_STEPS: usize = 10_000;

/// Paths when none are configured.
pub const DEFAULT_PATHS: usize = 10_000;
/// Daily monitoring over one year.
pub const DEFAULT_STEPS: usize = 252;
/// Base seed when none is configured.
pub const DEFAULT_SEED: u64 = 42;
/// Paths per batch when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Validated path count, step count, seed and batch size.
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 20_000);
/// assert_eq!(config.n_steps(), 252);
/// assert_eq!(config.n_batches(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    batch_size: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl MonteCarloConfig {
    /// Start from the defaults.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Total simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Monitoring steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Base seed; batch `i` uses `seed + i`.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches, the last one possibly partial.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_paths.div_ceil(self.batch_size)
    }

    /// Number of paths in batch `index`.
    #[inline]
    pub fn batch_len(&self, index: usize) -> usize {
        let start = index * self.batch_size;
        self.batch_size.min(self.n_paths.saturating_sub(start))
    }

    /// Check every size against its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`]; unset fields keep their defaults.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    batch_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Total simulated paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Monitoring steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Paths per batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// # Errors
    /// The first out-of-range field.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            n_steps: self.n_steps.unwrap_or(DEFAULT_STEPS),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}

//! Monte Carlo pricing kernels.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloConfig   (paths, steps, seed, batch size)
//! └── run_batched    (rayon over batches, stream seed + i, ordered reduce)
//!     ├── price_up_and_in_call   (stepped GBM, discrete barrier monitoring)
//!     └── price_basket_call      (correlated terminal sampling, Cholesky)
//! ```
//!
//! Results are reproducible for a given configuration regardless of the
//! size of the rayon pool.
//!
//! ```rust
//! use pricer_pricing::mc::MonteCarloConfig;
//!
//! let config = MonteCarloConfig::default();
//! assert_eq!((config.n_paths(), config.n_steps(), config.seed()), (10_000, 252, 42));
//! ```

mod barrier;
mod basket;
mod config;
mod error;
mod estimate;

pub use barrier::{price_up_and_in_call, UpAndInParams};
pub use basket::{price_basket_call, BasketParams, CholeskyFactor};
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_PATHS, DEFAULT_SEED,
    DEFAULT_STEPS, MAX_PATHS, MAX_STEPS,
};
pub use error::ConfigError;
pub use estimate::McEstimate;

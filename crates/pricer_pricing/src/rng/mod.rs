//! # Random Number Generation
//!
//! Seeded pseudo-random streams for the Monte Carlo kernels.
//!
//! Every kernel splits its paths into fixed batches and gives batch `i`
//! the stream seeded with `seed + i` (see [`PricerRng::for_batch`]). The
//! aggregate estimate therefore depends only on the base seed and the batch
//! size, never on how many worker threads ran the batches.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut a = PricerRng::for_batch(42, 3);
//! let mut b = PricerRng::from_seed(45);
//! assert_eq!(a.gen_normal(), b.gen_normal());
//! ```

pub mod prng;

pub use prng::PricerRng;

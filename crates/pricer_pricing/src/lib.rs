//! # pricer_pricing: Option Contracts and Pricing Kernels (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns market inputs into option prices:
//! - `options`: the four supported contracts behind the `OptionModel` trait
//!   and the `OptionInstrument` enum
//! - `mc`: Monte Carlo configuration and the barrier and basket kernels
//! - `rng`: seeded, reproducible random streams
//! - `market`: resolution of spots, volatilities, correlation and rate from
//!   a market data provider and a discount curve
//!
//! Closed-form and lattice models come from `pricer_models`; the error
//! taxonomy and the `Priceable` trait come from `pricer_core`.
//!
//! ## Pricing Models
//!
//! | Contract | Model |
//! |----------|-------|
//! | `EuropeanOption` | Black-Scholes-Merton with dividend yield |
//! | `AmericanPutOption` | Cox-Ross-Rubinstein tree, 100 steps |
//! | `UpAndInCallOption` | Monte Carlo, discrete monitoring, 10,000 × 252 |
//! | `BasketCallOption` | Moment matching (default) or correlated Monte Carlo |
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::traits::Priceable;
//! use pricer_models::instruments::OptionType;
//! use pricer_pricing::options::{AmericanPutOption, EuropeanOption};
//!
//! let european = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
//! let american = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//!
//! assert!(american.price().unwrap() >= european.price().unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for `OptionKind` and the lower-layer types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market;
pub mod mc;
pub mod options;
pub mod rng;

pub use market::MarketInputs;
pub use mc::{McEstimate, MonteCarloConfig};
pub use options::{
    AmericanPutOption, BasketCallOption, BasketMethod, EuropeanOption, OptionInstrument,
    OptionKind, OptionModel, UpAndInCallOption,
};

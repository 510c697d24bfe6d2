//! # Pricer Risk (L4: Application)
//!
//! Sensitivities of option contracts by bump-and-reprice.
//!
//! This crate provides:
//! - `HedgingCalculator`: delta, gamma, vega, theta and rho by finite
//!   differences, or in closed form for European options
//! - `ScopedBump`: perturbation guard that restores an option's factors on
//!   every exit path
//! - `par_all_greeks`: Greeks on independent clones in parallel (rayon)
//! - `sensitivity`: price profiles over spot or volatility grids
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  hedging/     - HedgingCalculator,      │
//! │                 ScopedBump, BumpConfig  │
//! │  sensitivity  - spot / vol sweeps       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  OptionModel contracts, Monte Carlo     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_pricing::options::{BasketCallOption, OptionModel};
//! use pricer_risk::hedging::{GreeksMethod, HedgingCalculator};
//!
//! let mut basket = BasketCallOption::new(
//!     vec!["AAA".into(), "BBB".into()],
//!     vec![100.0, 50.0],
//!     vec![0.5, 1.0],
//!     vec![0.2, 0.3],
//!     vec![vec![1.0, 0.4], vec![0.4, 1.0]],
//!     100.0,
//!     1.0,
//!     0.05,
//! )
//! .unwrap();
//!
//! let greeks = HedgingCalculator::default()
//!     .get_all_greeks(&mut basket, GreeksMethod::FiniteDifference)
//!     .unwrap();
//!
//! assert_eq!(greeks.delta.values().len(), 2);
//! assert_eq!(basket.spots(), &[100.0, 50.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod hedging;
pub mod sensitivity;

// Re-export commonly used types
pub use error::RiskError;
pub use hedging::{
    par_all_greeks, BumpConfig, GreeksMethod, HedgingCalculator, OptionGreeks, ScopedBump,
    Sensitivity,
};
pub use sensitivity::{linspace, spot_sweep, vol_sweep, SensitivitySweep};

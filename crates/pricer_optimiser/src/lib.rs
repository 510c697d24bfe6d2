//! # pricer_optimiser
//!
//! Discount curve bootstrapping for Neutryx.
//!
//! This crate sits between Models (L2) and Pricing (L3) in the architecture,
//! solving the inverse problem of recovering discount factors from
//! instrument prices.
//!
//! ## Architecture Position
//!
//! Layer 2.5 in the **P**ricer layer.
//! Depends on `pricer_core` (L1) for the `YieldCurve` trait and on
//! `pricer_models` (L2) for bank bills, bonds and portfolios.
//!
//! ## Modules
//!
//! - `bootstrapping`: sequential stripping of bills then bonds into a
//!   [`BootstrappedCurve`](bootstrapping::BootstrappedCurve)
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::curves::YieldCurve;
//! use pricer_models::instruments::{BankBill, Bond, Portfolio};
//! use pricer_optimiser::bootstrapping::CurveBootstrapper;
//!
//! let mut portfolio = Portfolio::new();
//! portfolio.add_bank_bill(BankBill::new(100.0_f64, 0.25, 98.5).unwrap());
//! portfolio.add_bank_bill(BankBill::new(100.0, 0.5, 97.3).unwrap());
//! portfolio.add_bond(Bond::new(100.0, 1.0, 0.04, 4, 99.2).unwrap());
//! portfolio.set_cash_flows();
//!
//! let result = CurveBootstrapper::with_defaults().bootstrap(&portfolio).unwrap();
//! assert_eq!(result.curve.discount_factor(0.25).unwrap(), 0.985);
//! ```

#![deny(missing_docs)]

pub mod bootstrapping;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrapping::*;
}

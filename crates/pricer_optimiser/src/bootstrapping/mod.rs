//! Discount curve bootstrapping from bank bills and coupon bonds.
//!
//! ## Architecture
//!
//! The bootstrapping module provides:
//! - `BootstrapConfig`: explicit policies (ordering, negative rates,
//!   missing interior nodes, interpolation)
//! - `CurveBootstrapper<T>`: sequential stripping engine
//! - `BootstrappedCurve<T>`: result curve implementing `YieldCurve<T>`
//! - `BootstrapResult<T>`: the curve plus every coupon that was skipped
//!
//! Bills are stripped first (`df = price / face`), then bonds in maturity
//! order, each solving for the single discount factor at its maturity
//! given the nodes already on the curve.

mod config;
mod curve;
mod engine;
mod error;

pub use config::{BootstrapConfig, BootstrapInterpolation, MissingNodePolicy};
pub use curve::BootstrappedCurve;
pub use engine::{BootstrapResult, CurveBootstrapper, SkippedCashFlow};
pub use error::BootstrapError;

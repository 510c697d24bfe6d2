//! Curve abstractions for discounting.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic query trait for discount factors and rates
//! - [`FlatCurve`]: Constant rate curve, used where a single rate is quoted
//!
//! Bootstrapped curves implementing [`YieldCurve`] live in `pricer_optimiser`.

mod flat;
mod traits;

pub use flat::FlatCurve;
pub use traits::YieldCurve;

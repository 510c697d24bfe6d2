//! Closed-form option formulas.
//!
//! [`BlackScholes`] prices European calls and puts on a dividend-paying
//! underlying and returns their Greeks. [`BasketMoments`] collapses a
//! weighted basket onto a single lognormal with the same first two moments
//! so the same formula can price it. Both are generic over `T: Float`.

pub mod basket;
pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use basket::BasketMoments;
pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;

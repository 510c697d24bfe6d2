//! The error every option model's `price()` returns.
//!
//! Market data, instrument and analytical errors convert into
//! [`PricingError`] with `From`, so a model can `?` through any of them.

use thiserror::Error;

/// Why a price could not be produced.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::non_positive("volatility", -0.2);
/// assert_eq!(err.to_string(), "Invalid input: volatility must be positive, got -0.2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Contract terms or market inputs outside the model's domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A degenerate intermediate value, e.g. a tree probability outside [0, 1]
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// No close, volatility or correlation for a ticker on the requested date
    #[error("Missing market data: {0}")]
    MissingMarketData(String),
}

impl PricingError {
    /// `InvalidInput` naming a parameter that had to be positive.
    pub fn non_positive(name: &str, value: f64) -> Self {
        PricingError::InvalidInput(format!("{} must be positive, got {}", name, value))
    }
}

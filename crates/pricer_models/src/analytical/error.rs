//! Domain errors for the closed-form and lattice models.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Inputs a lognormal model cannot price, or a computation that broke down.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Volatility not strictly positive.
    #[error("volatility {volatility} must be positive")]
    InvalidVolatility {
        /// Offending value
        volatility: f64,
    },

    /// Spot not strictly positive.
    #[error("spot {spot} must be positive")]
    InvalidSpot {
        /// Offending value
        spot: f64,
    },

    /// Strike not strictly positive.
    #[error("strike {strike} must be positive")]
    InvalidStrike {
        /// Offending value
        strike: f64,
    },

    /// Expiry not strictly positive.
    #[error("expiry {expiry} must be positive")]
    InvalidExpiry {
        /// Offending value
        expiry: f64,
    },

    /// Basket inputs whose lengths disagree.
    #[error("{what} has {got} entries, expected {expected}")]
    DimensionMismatch {
        /// Input name
        what: &'static str,
        /// Number of assets
        expected: usize,
        /// Entries supplied
        got: usize,
    },

    /// Computation produced an unusable intermediate value.
    #[error("numerical instability: {message}")]
    NumericalInstability {
        /// What went wrong
        message: String,
    },
}

impl AnalyticalError {
    /// Reject non-positive or non-finite spot, strike, expiry or volatility.
    pub fn check_domain(spot: f64, strike: f64, expiry: f64, volatility: f64) -> Result<(), Self> {
        if !(spot > 0.0) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(strike > 0.0) || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !(expiry > 0.0) || !expiry.is_finite() {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        if !(volatility > 0.0) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(())
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

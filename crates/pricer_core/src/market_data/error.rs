//! Failures raised by curves and market data providers.

use crate::types::PricingError;
use thiserror::Error;

/// A curve query or market lookup that could not be answered.
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::missing("AAA", "2024-01-05");
/// assert_eq!(err.to_string(), "no close for AAA on 2024-01-05");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Rate requested at a non-positive (or NaN) time.
    #[error("maturity {t} must be positive")]
    InvalidMaturity {
        /// Offending time in years
        t: f64,
    },

    /// Query outside the span covered by the curve's nodes.
    #[error("{x} lies outside the curve span [{min}, {max}]")]
    OutOfBounds {
        /// Queried time
        x: f64,
        /// First node
        min: f64,
        /// Last node
        max: f64,
    },

    /// Too few observations for the statistic asked for.
    #[error("need {need} observations, have {got}")]
    InsufficientData {
        /// Observations available
        got: usize,
        /// Observations required
        need: usize,
    },

    /// Ticker has no close on the date.
    #[error("no close for {ticker} on {date}")]
    MissingData {
        /// Ticker symbol
        ticker: String,
        /// ISO date of the lookup
        date: String,
    },

    /// Correlation matrix that is asymmetric, off the unit diagonal or
    /// outside [-1, 1].
    #[error("bad correlation matrix: {reason}")]
    InvalidCorrelation {
        /// Which check failed
        reason: String,
    },
}

impl MarketDataError {
    /// `MissingData` for `ticker` on `date`.
    pub fn missing(ticker: &str, date: impl std::fmt::Display) -> Self {
        MarketDataError::MissingData {
            ticker: ticker.to_string(),
            date: date.to_string(),
        }
    }
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::MissingData { .. } => PricingError::MissingMarketData(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

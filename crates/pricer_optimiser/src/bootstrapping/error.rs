//! Bootstrap-specific error types.
//!
//! Each failure mode carries the maturity at which stripping stopped.

use pricer_core::market_data::MarketDataError;
use thiserror::Error;

/// Errors that can occur during curve bootstrapping.
///
/// # Variants
///
/// - `InsufficientData`: The portfolio holds no instruments
/// - `NonIncreasingMaturity`: A node does not strictly extend the curve
/// - `NegativeRate`: Solved discount factor above 1 while negative rates are disallowed
/// - `InvalidDiscountFactor`: Solved discount factor is non-positive or non-finite
/// - `CashFlowsNotSet`: A bill's or bond's schedule was never populated
/// - `MissingNode`: Interior coupon beyond the curve under `MissingNodePolicy::Fail`
/// - `MarketData`: Wrapped curve query error
///
/// # Examples
///
/// ```
/// use pricer_optimiser::bootstrapping::BootstrapError;
///
/// let err = BootstrapError::NegativeRate {
///     maturity: 0.5,
///     discount_factor: 1.002,
/// };
/// assert!(format!("{}", err).contains("0.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// Portfolio holds no instruments.
    #[error("Insufficient instruments: need at least 1, got {provided}")]
    InsufficientData {
        /// Number of instruments provided
        provided: usize,
    },

    /// Node maturity does not exceed the last maturity on the curve.
    #[error("Non-increasing maturity: {maturity} does not extend curve ending at {last}")]
    NonIncreasingMaturity {
        /// Offending instrument maturity
        maturity: f64,
        /// Last maturity already on the curve
        last: f64,
    },

    /// Discount factor above 1 (negative zero rate).
    #[error("Negative rate at maturity {maturity}: discount factor = {discount_factor}")]
    NegativeRate {
        /// Node maturity
        maturity: f64,
        /// Solved discount factor
        discount_factor: f64,
    },

    /// Discount factor non-positive or non-finite.
    #[error("Invalid discount factor at maturity {maturity}: {discount_factor}")]
    InvalidDiscountFactor {
        /// Node maturity
        maturity: f64,
        /// Solved discount factor
        discount_factor: f64,
    },

    /// Instrument cash flows were never populated.
    #[error("Cash flows not set for instrument maturing at {maturity}")]
    CashFlowsNotSet {
        /// Instrument maturity
        maturity: f64,
    },

    /// Interior coupon falls outside the bootstrapped range.
    #[error("No curve node for coupon at {time} (bond maturity {maturity}, curve ends at {curve_end})")]
    MissingNode {
        /// Coupon time
        time: f64,
        /// Bond maturity
        maturity: f64,
        /// Last maturity on the curve
        curve_end: f64,
    },

    /// Wrapped curve query error.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

impl BootstrapError {
    /// Check if this is a negative rate error.
    pub fn is_negative_rate(&self) -> bool {
        matches!(self, Self::NegativeRate { .. })
    }

    /// Check if this is a missing node error.
    pub fn is_missing_node(&self) -> bool {
        matches!(self, Self::MissingNode { .. })
    }
}

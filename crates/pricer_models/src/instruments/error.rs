//! Instrument error types.
//!
//! This module provides structured error handling for fixed-income
//! instrument construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidFaceValue`: Face value is non-positive
/// - `InvalidMaturity`: Maturity is non-positive
/// - `InvalidPrice`: Purchase price is non-positive or non-finite
/// - `InvalidFrequency`: Coupon frequency is zero
/// - `InvalidCouponRate`: Coupon rate is negative or non-finite
/// - `InvalidParameter`: General parameter validation failure
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidFaceValue { face_value: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid face value (non-positive).
    #[error("Invalid face value: F = {face_value}")]
    InvalidFaceValue {
        /// The invalid face value
        face_value: f64,
    },

    /// Invalid maturity (non-positive).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid purchase price.
    #[error("Invalid price: P = {price}")]
    InvalidPrice {
        /// The invalid price value
        price: f64,
    },

    /// Coupon frequency of zero payments per year.
    #[error("Invalid coupon frequency: {frequency} per year")]
    InvalidFrequency {
        /// The invalid frequency
        frequency: u32,
    },

    /// Invalid coupon rate.
    #[error("Invalid coupon rate: c = {coupon_rate}")]
    InvalidCouponRate {
        /// The invalid coupon rate
        coupon_rate: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

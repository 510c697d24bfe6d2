//! Risk error types.
//!
//! This module provides structured error types for Greeks and sweep
//! calculations using `thiserror` for derivation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors that can occur while computing sensitivities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Greeks method not available for this contract, or not recognised.
    #[error("Unsupported Greeks method: {0}")]
    UnsupportedMethod(String),

    /// Bump size must be positive and finite.
    #[error("Invalid bump: {name} = {value}")]
    InvalidBump {
        /// Which bump
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Underlying index outside the contract's asset range.
    #[error("Asset index {index} out of range for {count} underlyings")]
    InvalidAsset {
        /// Requested index
        index: usize,
        /// Number of underlyings
        count: usize,
    },

    /// Repricing failed.
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),
}

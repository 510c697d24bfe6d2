//! Monte Carlo sizing errors.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Rejected [`MonteCarloConfig`](super::MonteCarloConfig) field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `n_paths` is zero or above the cap.
    #[error("path count {0} outside [1, 10000000]")]
    InvalidPathCount(usize),

    /// `n_steps` is zero or above the cap.
    #[error("step count {0} outside [1, 10000]")]
    InvalidStepCount(usize),

    /// Zero paths per batch.
    #[error("batch size {0} must be at least 1")]
    InvalidBatchSize(usize),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_limit() {
        assert_eq!(
            ConfigError::InvalidStepCount(20_000).to_string(),
            "step count 20000 outside [1, 10000]"
        );
        assert!(ConfigError::InvalidPathCount(0).to_string().starts_with("path count 0"));
        assert!(ConfigError::InvalidBatchSize(0).to_string().contains("at least 1"));
    }

    #[test]
    fn test_becomes_invalid_input() {
        let err: PricingError = ConfigError::InvalidPathCount(0).into();
        assert!(matches!(err, PricingError::InvalidInput(msg) if msg.contains("path count")));
    }
}

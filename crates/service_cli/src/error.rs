//! CLI error types

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use pricer_optimiser::bootstrapping::BootstrapError;
use pricer_risk::RiskError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for a valuation run
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration parsed but describes an impossible run
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bill or bond terms rejected
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Curve stripping failed
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// Curve or market data query failed
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Option pricing failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Greeks or sweep failed
    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    /// Report could not be rendered
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

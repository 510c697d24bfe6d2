//! Valuation run configuration
//!
//! A run is described by one TOML file: the bills and bonds to strip into
//! a discount curve, optional close-price histories, the option book and
//! the Greeks and Monte Carlo settings. See `valuation.toml` at the crate
//! root for a complete example.

use std::path::Path;

use chrono::NaiveDate;
use pricer_models::instruments::OptionType;
use pricer_optimiser::bootstrapping::BootstrapConfig;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_risk::hedging::{BumpConfig, GreeksMethod};
use serde::Deserialize;

use crate::{CliError, Result};

/// Complete description of a valuation run.
#[derive(Debug, Default, Deserialize)]
pub struct ValuationConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Curve instruments and bootstrap policies
    #[serde(default)]
    pub curve: CurveConfig,

    /// Close-price histories for spot, volatility and correlation lookups
    #[serde(default)]
    pub market: Option<MarketConfig>,

    /// Greeks settings
    #[serde(default)]
    pub greeks: GreeksConfig,

    /// Simulation settings shared by the Monte Carlo contracts
    #[serde(default)]
    pub monte_carlo: MonteCarloSettings,

    /// The option book, in report order
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl ValuationConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl std::str::FromStr for ValuationConfig {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CliError::Parse(e.to_string()))
    }
}

/// General settings
#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date of the spot closes used for market lookups, as `"YYYY-MM-DD"`
    #[serde(default)]
    pub valuation_date: Option<NaiveDate>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            valuation_date: None,
        }
    }
}

/// Curve instruments plus the bootstrap policies.
#[derive(Debug, Default, Deserialize)]
pub struct CurveConfig {
    /// Interpolation, ordering, negative-rate and missing-node policies
    #[serde(default, flatten)]
    pub bootstrap: BootstrapConfig,

    /// Bank bills
    #[serde(default)]
    pub bills: Vec<BillSpec>,

    /// Coupon bonds
    #[serde(default)]
    pub bonds: Vec<BondSpec>,
}

/// A bank bill quote.
#[derive(Debug, Clone, Deserialize)]
pub struct BillSpec {
    /// Face value
    #[serde(default = "default_face_value")]
    pub face_value: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Market price
    pub price: f64,
}

/// A coupon bond quote.
#[derive(Debug, Clone, Deserialize)]
pub struct BondSpec {
    /// Face value
    #[serde(default = "default_face_value")]
    pub face_value: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Annual coupon rate as a decimal
    pub coupon_rate: f64,
    /// Coupons per year
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Market price
    pub price: f64,
}

/// Close-price histories.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Number of daily log returns behind each volatility and correlation
    #[serde(default = "default_window")]
    pub window: usize,

    /// One entry per ticker
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
}

/// Consecutive daily closes for one ticker.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesSpec {
    /// Ticker symbol
    pub ticker: String,
    /// Date of the first close, as `"YYYY-MM-DD"`
    pub start: NaiveDate,
    /// Closes, oldest first
    pub closes: Vec<f64>,
}

/// Greeks settings
#[derive(Debug, Default, Deserialize)]
pub struct GreeksConfig {
    /// Report Greeks alongside prices
    #[serde(default)]
    pub enabled: bool,

    /// Finite difference or closed form
    #[serde(default)]
    pub method: GreeksMethod,

    /// Bump sizes
    #[serde(default, flatten)]
    pub bumps: BumpConfig,
}

/// Monte Carlo settings
#[derive(Debug, Clone, Deserialize)]
pub struct MonteCarloSettings {
    /// Number of paths
    #[serde(default = "default_paths")]
    pub paths: usize,
    /// Time steps per path
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Base seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Paths per parallel batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            steps: default_steps(),
            seed: default_seed(),
            batch_size: default_batch_size(),
        }
    }
}

impl MonteCarloSettings {
    /// Validated engine configuration.
    pub fn to_config(&self) -> Result<MonteCarloConfig> {
        MonteCarloConfig::builder()
            .n_paths(self.paths)
            .n_steps(self.steps)
            .seed(self.seed)
            .batch_size(self.batch_size)
            .build()
            .map_err(|e| CliError::Config(format!("monte_carlo: {}", e)))
    }
}

/// Basket pricing method as written in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasketMethodSpec {
    /// Lognormal moment matching
    #[default]
    MomentMatching,
    /// Correlated Monte Carlo with the run's simulation settings
    MonteCarlo,
}

/// One contract in the book.
///
/// Spots, volatilities and correlations left out are looked up in
/// `[market]` as of `general.valuation_date`. A rate left out is the curve
/// zero rate to expiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionSpec {
    /// Closed-form European option
    European {
        /// Underlying
        ticker: String,
        /// Strike
        strike: f64,
        /// Years to expiry
        expiry: f64,
        /// Call or put
        option_type: OptionType,
        /// Spot override
        spot: Option<f64>,
        /// Volatility override
        vol: Option<f64>,
        /// Rate override
        rate: Option<f64>,
        /// Continuous dividend yield
        #[serde(default)]
        dividend_yield: f64,
    },

    /// Binomial-tree American put
    AmericanPut {
        /// Underlying
        ticker: String,
        /// Strike
        strike: f64,
        /// Years to expiry
        expiry: f64,
        /// Spot override
        spot: Option<f64>,
        /// Volatility override
        vol: Option<f64>,
        /// Rate override
        rate: Option<f64>,
        /// Continuous dividend yield
        #[serde(default)]
        dividend_yield: f64,
        /// Tree steps
        steps: Option<usize>,
    },

    /// Monte Carlo up-and-in call
    UpAndInCall {
        /// Underlying
        ticker: String,
        /// Strike
        strike: f64,
        /// Knock-in level
        barrier: f64,
        /// Years to expiry
        expiry: f64,
        /// Spot override
        spot: Option<f64>,
        /// Volatility override
        vol: Option<f64>,
        /// Rate override
        rate: Option<f64>,
        /// Continuous dividend yield
        #[serde(default)]
        dividend_yield: f64,
    },

    /// Call on a weighted basket
    BasketCall {
        /// Underlyings
        tickers: Vec<String>,
        /// Weight per underlying
        weights: Vec<f64>,
        /// Strike
        strike: f64,
        /// Years to expiry
        expiry: f64,
        /// Spot overrides
        spots: Option<Vec<f64>>,
        /// Volatility overrides
        vols: Option<Vec<f64>>,
        /// Correlation override
        correlation: Option<Vec<Vec<f64>>>,
        /// Rate override
        rate: Option<f64>,
        /// Continuous dividend yield
        #[serde(default)]
        dividend_yield: f64,
        /// Pricing method
        #[serde(default)]
        method: BasketMethodSpec,
    },
}

impl OptionSpec {
    /// Underlying tickers.
    pub fn tickers(&self) -> Vec<String> {
        match self {
            OptionSpec::European { ticker, .. }
            | OptionSpec::AmericanPut { ticker, .. }
            | OptionSpec::UpAndInCall { ticker, .. } => vec![ticker.clone()],
            OptionSpec::BasketCall { tickers, .. } => tickers.clone(),
        }
    }

    /// Years to expiry.
    pub fn expiry(&self) -> f64 {
        match self {
            OptionSpec::European { expiry, .. }
            | OptionSpec::AmericanPut { expiry, .. }
            | OptionSpec::UpAndInCall { expiry, .. }
            | OptionSpec::BasketCall { expiry, .. } => *expiry,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_face_value() -> f64 {
    100.0
}

fn default_frequency() -> u32 {
    2
}

fn default_window() -> usize {
    20
}

fn default_paths() -> usize {
    10_000
}

fn default_steps() -> usize {
    252
}

fn default_seed() -> u64 {
    42
}

fn default_batch_size() -> usize {
    1_000
}

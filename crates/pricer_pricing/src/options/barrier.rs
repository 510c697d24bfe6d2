//! Up-and-in barrier call priced by Monte Carlo.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionType;

use super::{check_inputs, OptionKind, OptionModel};
use crate::mc::{price_up_and_in_call, McEstimate, MonteCarloConfig, UpAndInParams};

/// Call that only pays if the underlying trades at or above the barrier on
/// some monitoring date before expiry.
///
/// Defaults to 10,000 paths, 252 steps and seed 42, so repeated pricing of
/// the same contract is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct UpAndInCallOption {
    ticker: String,
    spot: f64,
    strike: f64,
    barrier: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    config: MonteCarloConfig,
}

impl UpAndInCallOption {
    /// Create an up-and-in call with the default simulation settings.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for a non-positive spot, strike, barrier,
    /// expiry or volatility, or a non-finite rate.
    pub fn new(
        ticker: impl Into<String>,
        spot: f64,
        strike: f64,
        barrier: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let option = Self {
            ticker: ticker.into(),
            spot,
            strike,
            barrier,
            expiry,
            rate,
            volatility,
            dividend_yield: 0.0,
            config: MonteCarloConfig::default(),
        };
        option.params()?;
        Ok(option)
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Replace the simulation settings.
    pub fn with_config(mut self, config: MonteCarloConfig) -> Self {
        self.config = config;
        self
    }

    /// Knock-in level.
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Simulation settings.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Price together with its standard error.
    pub fn estimate(&self) -> Result<McEstimate, PricingError> {
        let params = self.params()?;
        Ok(price_up_and_in_call(&params, &self.config))
    }

    fn params(&self) -> Result<UpAndInParams, PricingError> {
        check_inputs(
            self.spot,
            self.strike,
            self.expiry,
            self.volatility,
            self.rate,
            self.dividend_yield,
        )?;
        if !(self.barrier > 0.0) || !self.barrier.is_finite() {
            return Err(PricingError::non_positive("barrier", self.barrier));
        }
        Ok(UpAndInParams {
            spot: self.spot,
            strike: self.strike,
            barrier: self.barrier,
            expiry: self.expiry,
            rate: self.rate,
            volatility: self.volatility,
            dividend_yield: self.dividend_yield,
        })
    }
}

impl Priceable<f64> for UpAndInCallOption {
    fn price(&self) -> Result<f64, PricingError> {
        Ok(self.estimate()?.price)
    }
}

impl OptionModel for UpAndInCallOption {
    fn kind(&self) -> OptionKind {
        OptionKind::UpAndInCall
    }

    fn tickers(&self) -> &[String] {
        std::slice::from_ref(&self.ticker)
    }

    fn spots(&self) -> &[f64] {
        std::slice::from_ref(&self.spot)
    }

    fn spots_mut(&mut self) -> &mut [f64] {
        std::slice::from_mut(&mut self.spot)
    }

    fn vols(&self) -> &[f64] {
        std::slice::from_ref(&self.volatility)
    }

    fn vols_mut(&mut self) -> &mut [f64] {
        std::slice::from_mut(&mut self.volatility)
    }

    fn strike(&self) -> f64 {
        self.strike
    }

    fn expiry(&self) -> f64 {
        self.expiry
    }

    fn set_expiry(&mut self, expiry: f64) {
        self.expiry = expiry;
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn option_type(&self) -> OptionType {
        OptionType::Call
    }

    fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

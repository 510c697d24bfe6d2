//! American put on a Cox-Ross-Rubinstein tree.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionType;
use pricer_models::lattice::{BinomialLattice, BinomialTree, TreeParams};

use super::{check_inputs, OptionKind, OptionModel};

/// American put valued by backward induction with early exercise at every
/// node.
///
/// # Examples
///
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_pricing::options::AmericanPutOption;
///
/// let put = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let price = put.price().unwrap();
/// assert!(price > 5.5735); // above the European put
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AmericanPutOption {
    ticker: String,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
    steps: usize,
}

impl AmericanPutOption {
    /// Create an American put on a 100-step tree with zero dividend yield.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for non-positive spot, strike, expiry or
    /// volatility, or a non-finite rate.
    pub fn new(
        ticker: impl Into<String>,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        check_inputs(spot, strike, expiry, volatility, rate, 0.0)?;
        Ok(Self {
            ticker: ticker.into(),
            spot,
            strike,
            expiry,
            rate,
            volatility,
            dividend_yield: 0.0,
            steps: BinomialTree::default().steps(),
        })
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Set the number of tree steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Number of tree steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Full stock and option value grids, for visualisation.
    pub fn lattice(&self) -> Result<BinomialLattice, PricingError> {
        let params = self.tree_params()?;
        Ok(BinomialTree::new(self.steps).build(&params)?)
    }

    fn tree_params(&self) -> Result<TreeParams, PricingError> {
        check_inputs(
            self.spot,
            self.strike,
            self.expiry,
            self.volatility,
            self.rate,
            self.dividend_yield,
        )?;
        Ok(TreeParams {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            rate: self.rate,
            volatility: self.volatility,
            dividend_yield: self.dividend_yield,
            option_type: OptionType::Put,
            american: true,
        })
    }
}

impl Priceable<f64> for AmericanPutOption {
    fn price(&self) -> Result<f64, PricingError> {
        let params = self.tree_params()?;
        Ok(BinomialTree::new(self.steps).price(&params)?)
    }
}

impl OptionModel for AmericanPutOption {
    fn kind(&self) -> OptionKind {
        OptionKind::AmericanPut
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
        OptionType::Put
    }

    fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

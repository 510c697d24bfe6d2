//! European option under Black-Scholes-Merton.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::instruments::OptionType;

use super::{check_inputs, OptionKind, OptionModel};

/// European call or put priced in closed form.
///
/// ```text
/// d1 = (ln(S/K) + (r − q + σ²/2) T) / (σ √T)
/// d2 = d1 − σ √T
/// call = S e^(−qT) Φ(d1) − K e^(−rT) Φ(d2)
/// put  = K e^(−rT) Φ(−d2) − S e^(−qT) Φ(−d1)
/// ```
///
/// # Examples
///
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::options::EuropeanOption;
///
/// let call = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert!((call.price().unwrap() - 10.4506).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanOption {
    ticker: String,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
    dividend_yield: f64,
}

impl EuropeanOption {
    /// Create a European option with zero dividend yield.
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
        option_type: OptionType,
    ) -> Result<Self, PricingError> {
        check_inputs(spot, strike, expiry, volatility, rate, 0.0)?;
        Ok(Self {
            ticker: ticker.into(),
            spot,
            strike,
            expiry,
            rate,
            volatility,
            option_type,
            dividend_yield: 0.0,
        })
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    fn model(&self) -> Result<BlackScholes<f64>, PricingError> {
        check_inputs(
            self.spot,
            self.strike,
            self.expiry,
            self.volatility,
            self.rate,
            self.dividend_yield,
        )?;
        Ok(BlackScholes::new(self.spot, self.rate, self.volatility)?
            .with_dividend_yield(self.dividend_yield))
    }
}

impl Priceable<f64> for EuropeanOption {
    fn price(&self) -> Result<f64, PricingError> {
        let model = self.model()?;
        Ok(model.price(self.strike, self.expiry, self.option_type.is_call()))
    }
}

impl OptionModel for EuropeanOption {
    fn kind(&self) -> OptionKind {
        OptionKind::European
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
        self.option_type
    }

    fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    fn closed_form_greeks(&self) -> Option<Result<Greeks<f64>, PricingError>> {
        Some(
            self.model()
                .map(|m| m.greeks(self.strike, self.expiry, self.option_type.is_call())),
        )
    }
}

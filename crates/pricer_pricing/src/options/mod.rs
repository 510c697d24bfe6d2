//! Option contracts.
//!
//! Every contract implements [`Priceable`] (the single pricing capability)
//! and [`OptionModel`], which exposes the risk factors a finite-difference
//! calculator perturbs: spots, volatilities, expiry and rate. Single-asset
//! contracts expose one-element slices.
//!
//! [`OptionInstrument`] is the closed set of supported contracts, used
//! wherever contracts of different kinds are handled together.
//!
//! # Example
//!
//! ```
//! use pricer_core::traits::Priceable;
//! use pricer_models::instruments::OptionType;
//! use pricer_pricing::options::{EuropeanOption, OptionInstrument, OptionModel};
//!
//! let call = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let mut trade = OptionInstrument::from(call);
//!
//! trade.spots_mut()[0] = 105.0;
//! assert!(trade.price().unwrap() > 10.4506);
//! ```

mod american;
mod barrier;
mod basket;
mod european;

pub use american::AmericanPutOption;
pub use barrier::UpAndInCallOption;
pub use basket::{BasketCallOption, BasketMethod};
pub use european::EuropeanOption;

use std::fmt;

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::analytical::{AnalyticalError, Greeks};
use pricer_models::instruments::OptionType;

/// Contract family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionKind {
    /// Closed-form European option
    European,
    /// Binomial-tree American put
    AmericanPut,
    /// Monte Carlo up-and-in call
    UpAndInCall,
    /// Call on a weighted basket
    BasketCall,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::European => "european",
            OptionKind::AmericanPut => "american_put",
            OptionKind::UpAndInCall => "up_and_in_call",
            OptionKind::BasketCall => "basket_call",
        };
        f.write_str(name)
    }
}

/// Mutable risk-factor view of an option contract.
///
/// This is the only surface a Greeks calculator needs: it bumps a factor
/// through the `_mut`/`set_` accessors, calls [`Priceable::price`] and
/// restores the factor.
pub trait OptionModel: Priceable<f64> {
    /// Contract family.
    fn kind(&self) -> OptionKind;

    /// Underlying tickers, parallel to [`spots`](OptionModel::spots).
    fn tickers(&self) -> &[String];

    /// Spot of each underlying.
    fn spots(&self) -> &[f64];

    /// Mutable spots.
    fn spots_mut(&mut self) -> &mut [f64];

    /// Volatility of each underlying.
    fn vols(&self) -> &[f64];

    /// Mutable volatilities.
    fn vols_mut(&mut self) -> &mut [f64];

    /// Strike.
    fn strike(&self) -> f64;

    /// Time to expiry in years.
    fn expiry(&self) -> f64;

    /// Replace the time to expiry.
    fn set_expiry(&mut self, expiry: f64);

    /// Continuously compounded risk-free rate.
    fn rate(&self) -> f64;

    /// Replace the risk-free rate.
    fn set_rate(&mut self, rate: f64);

    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// Continuous dividend yield.
    fn dividend_yield(&self) -> f64;

    /// Closed-form Greeks, for contracts that have them.
    ///
    /// Greeks are unscaled: vega and rho per unit change, theta per year.
    fn closed_form_greeks(&self) -> Option<Result<Greeks<f64>, PricingError>> {
        None
    }
}

/// Every supported option contract.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionInstrument {
    /// Closed-form European option
    European(EuropeanOption),
    /// Binomial-tree American put
    AmericanPut(AmericanPutOption),
    /// Monte Carlo up-and-in call
    UpAndInCall(UpAndInCallOption),
    /// Call on a weighted basket
    BasketCall(BasketCallOption),
}

impl OptionInstrument {
    fn inner(&self) -> &dyn OptionModel {
        match self {
            OptionInstrument::European(option) => option,
            OptionInstrument::AmericanPut(option) => option,
            OptionInstrument::UpAndInCall(option) => option,
            OptionInstrument::BasketCall(option) => option,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn OptionModel {
        match self {
            OptionInstrument::European(option) => option,
            OptionInstrument::AmericanPut(option) => option,
            OptionInstrument::UpAndInCall(option) => option,
            OptionInstrument::BasketCall(option) => option,
        }
    }

    /// Returns a reference to the European option if this is one.
    pub fn as_european(&self) -> Option<&EuropeanOption> {
        match self {
            OptionInstrument::European(option) => Some(option),
            _ => None,
        }
    }
}

impl Priceable<f64> for OptionInstrument {
    fn price(&self) -> Result<f64, PricingError> {
        self.inner().price()
    }
}

impl OptionModel for OptionInstrument {
    fn kind(&self) -> OptionKind {
        self.inner().kind()
    }

    fn tickers(&self) -> &[String] {
        self.inner().tickers()
    }

    fn spots(&self) -> &[f64] {
        self.inner().spots()
    }

    fn spots_mut(&mut self) -> &mut [f64] {
        self.inner_mut().spots_mut()
    }

    fn vols(&self) -> &[f64] {
        self.inner().vols()
    }

    fn vols_mut(&mut self) -> &mut [f64] {
        self.inner_mut().vols_mut()
    }

    fn strike(&self) -> f64 {
        self.inner().strike()
    }

    fn expiry(&self) -> f64 {
        self.inner().expiry()
    }

    fn set_expiry(&mut self, expiry: f64) {
        self.inner_mut().set_expiry(expiry)
    }

    fn rate(&self) -> f64 {
        self.inner().rate()
    }

    fn set_rate(&mut self, rate: f64) {
        self.inner_mut().set_rate(rate)
    }

    fn option_type(&self) -> OptionType {
        self.inner().option_type()
    }

    fn dividend_yield(&self) -> f64 {
        self.inner().dividend_yield()
    }

    fn closed_form_greeks(&self) -> Option<Result<Greeks<f64>, PricingError>> {
        self.inner().closed_form_greeks()
    }
}

impl From<EuropeanOption> for OptionInstrument {
    fn from(option: EuropeanOption) -> Self {
        OptionInstrument::European(option)
    }
}

impl From<AmericanPutOption> for OptionInstrument {
    fn from(option: AmericanPutOption) -> Self {
        OptionInstrument::AmericanPut(option)
    }
}

impl From<UpAndInCallOption> for OptionInstrument {
    fn from(option: UpAndInCallOption) -> Self {
        OptionInstrument::UpAndInCall(option)
    }
}

impl From<BasketCallOption> for OptionInstrument {
    fn from(option: BasketCallOption) -> Self {
        OptionInstrument::BasketCall(option)
    }
}

/// Lognormal domain plus finite rate and dividend yield.
pub(crate) fn check_inputs(
    spot: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    rate: f64,
    dividend_yield: f64,
) -> Result<(), PricingError> {
    AnalyticalError::check_domain(spot, strike, expiry, volatility)?;
    check_finite("rate", rate)?;
    check_finite("dividend yield", dividend_yield)
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruments() -> Vec<OptionInstrument> {
        vec![
            EuropeanOption::new("A", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put)
                .unwrap()
                .into(),
            AmericanPutOption::new("A", 100.0, 100.0, 1.0, 0.05, 0.2)
                .unwrap()
                .into(),
            UpAndInCallOption::new("A", 100.0, 100.0, 120.0, 1.0, 0.05, 0.2)
                .unwrap()
                .into(),
            BasketCallOption::new(
                vec!["A".to_string(), "B".to_string()],
                vec![100.0, 50.0],
                vec![0.5, 1.0],
                vec![0.2, 0.3],
                vec![vec![1.0, 0.4], vec![0.4, 1.0]],
                100.0,
                1.0,
                0.05,
            )
            .unwrap()
            .into(),
        ]
    }

    #[test]
    fn test_kinds() {
        let kinds: Vec<OptionKind> = instruments().iter().map(|o| o.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OptionKind::European,
                OptionKind::AmericanPut,
                OptionKind::UpAndInCall,
                OptionKind::BasketCall
            ]
        );
        assert_eq!(OptionKind::UpAndInCall.to_string(), "up_and_in_call");
    }

    #[test]
    fn test_factor_slices_match_tickers() {
        for option in instruments() {
            assert_eq!(option.tickers().len(), option.spots().len());
            assert_eq!(option.spots().len(), option.vols().len());
        }
    }

    #[test]
    fn test_mutation_through_enum() {
        let mut option = instruments().remove(0);
        option.set_rate(0.01);
        option.set_expiry(2.0);
        option.vols_mut()[0] = 0.3;
        assert_eq!(option.rate(), 0.01);
        assert_eq!(option.expiry(), 2.0);
        assert_eq!(option.vols(), &[0.3]);
        assert!(option.as_european().is_some());
    }

    #[test]
    fn test_closed_form_only_for_european() {
        let with_closed_form: Vec<bool> = instruments()
            .iter()
            .map(|o| o.closed_form_greeks().is_some())
            .collect();
        assert_eq!(with_closed_form, vec![true, false, false, false]);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite("rate", 0.05).is_ok());
        assert!(matches!(
            check_finite("rate", f64::NAN),
            Err(PricingError::InvalidInput(_))
        ));
    }
}

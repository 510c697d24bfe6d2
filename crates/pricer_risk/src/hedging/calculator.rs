//! Bump-and-reprice Greeks.

use pricer_core::traits::Priceable;
use pricer_models::analytical::Greeks;
use pricer_pricing::options::{OptionKind, OptionModel};
use tracing::trace;

use super::config::{BumpConfig, GreeksMethod, RHO_SCALE, VEGA_SCALE};
use super::guard::ScopedBump;
use crate::error::RiskError;

/// A sensitivity that is a single number for single-asset contracts and one
/// number per underlying for baskets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Sensitivity {
    /// Single underlying
    Scalar(f64),
    /// One entry per underlying, ordered as the contract's tickers
    PerAsset(Vec<f64>),
}

impl Sensitivity {
    /// The value for a single-asset contract.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Sensitivity::Scalar(value) => Some(*value),
            Sensitivity::PerAsset(_) => None,
        }
    }

    /// All components as a slice.
    pub fn values(&self) -> &[f64] {
        match self {
            Sensitivity::Scalar(value) => std::slice::from_ref(value),
            Sensitivity::PerAsset(values) => values,
        }
    }

    /// Sum over components.
    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }

    fn from_components(kind: OptionKind, values: Vec<f64>) -> Self {
        if kind != OptionKind::BasketCall && values.len() == 1 {
            Sensitivity::Scalar(values[0])
        } else {
            Sensitivity::PerAsset(values)
        }
    }
}

/// Price and the five first-order-and-gamma Greeks of one contract.
///
/// Vega is per volatility point and rho per percentage point of rate.
/// Theta is value lost per year, negative for a long vanilla option.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionGreeks {
    /// Unbumped price
    pub price: f64,
    /// ∂V/∂S
    pub delta: Sensitivity,
    /// ∂²V/∂S²
    pub gamma: Sensitivity,
    /// ∂V/∂σ × 0.01
    pub vega: Sensitivity,
    /// −∂V/∂T
    pub theta: f64,
    /// ∂V/∂r × 0.01
    pub rho: f64,
}

/// Finite-difference Greeks calculator.
///
/// Each Greek perturbs the option it is given in place, inside a
/// [`ScopedBump`], so the option's spots, volatilities, expiry and rate are
/// bit-identical afterwards whether the call succeeds or fails.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::options::{EuropeanOption, OptionModel};
/// use pricer_risk::hedging::{GreeksMethod, HedgingCalculator};
///
/// let mut call = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let calc = HedgingCalculator::default();
///
/// let greeks = calc.get_all_greeks(&mut call, GreeksMethod::FiniteDifference).unwrap();
/// let delta = greeks.delta.as_scalar().unwrap();
/// assert!((delta - 0.6368).abs() < 1e-3);
/// assert_eq!(call.spots(), &[100.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgingCalculator {
    config: BumpConfig,
}

impl HedgingCalculator {
    /// Create a calculator with the given bump sizes.
    ///
    /// # Errors
    /// `RiskError::InvalidBump` if any bump is not positive and finite.
    pub fn new(config: BumpConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Bump sizes in use.
    pub fn config(&self) -> &BumpConfig {
        &self.config
    }

    /// Delta for every underlying.
    pub fn delta<M: OptionModel + ?Sized>(&self, option: &mut M) -> Result<Sensitivity, RiskError> {
        let values = (0..option.spots().len())
            .map(|asset| self.delta_for(option, asset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sensitivity::from_components(option.kind(), values))
    }

    /// Central-difference delta for one underlying, others held fixed.
    pub fn delta_for<M: OptionModel + ?Sized>(
        &self,
        option: &mut M,
        asset: usize,
    ) -> Result<f64, RiskError> {
        let (down, up, h) = self.spot_ladder(option, asset)?;
        Ok((up - down) / (2.0 * h))
    }

    /// Gamma for every underlying.
    pub fn gamma<M: OptionModel + ?Sized>(&self, option: &mut M) -> Result<Sensitivity, RiskError> {
        let base = option.price()?;
        let values = (0..option.spots().len())
            .map(|asset| {
                let (down, up, h) = self.spot_ladder(option, asset)?;
                Ok((up - 2.0 * base + down) / (h * h))
            })
            .collect::<Result<Vec<_>, RiskError>>()?;
        Ok(Sensitivity::from_components(option.kind(), values))
    }

    /// Vega for every underlying, per volatility point.
    pub fn vega<M: OptionModel + ?Sized>(&self, option: &mut M) -> Result<Sensitivity, RiskError> {
        let values = (0..option.vols().len())
            .map(|asset| self.vega_for(option, asset))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sensitivity::from_components(option.kind(), values))
    }

    /// Vega for one underlying, per volatility point.
    pub fn vega_for<M: OptionModel + ?Sized>(
        &self,
        option: &mut M,
        asset: usize,
    ) -> Result<f64, RiskError> {
        check_asset(asset, option.vols().len())?;
        let vol = option.vols()[asset];
        let h = self.config.vol_bump * vol;

        let mut bumped = ScopedBump::new(option);
        bumped.vols_mut()[asset] = vol + h;
        let up = bumped.price()?;
        bumped.vols_mut()[asset] = vol - h;
        let down = bumped.price()?;
        trace!(asset, vol, h, up, down, "vega bump");

        Ok((up - down) / (2.0 * h) * VEGA_SCALE)
    }

    /// Forward-difference theta, `(V(T) − V(T + dt)) / dt`.
    ///
    /// Zero when the option expires within one step.
    pub fn theta<M: OptionModel + ?Sized>(&self, option: &mut M) -> Result<f64, RiskError> {
        let expiry = option.expiry();
        let dt = self.config.theta_dt;
        if expiry <= dt {
            return Ok(0.0);
        }

        let base = option.price()?;
        let mut bumped = ScopedBump::new(option);
        bumped.set_expiry(expiry + dt);
        let later = bumped.price()?;
        trace!(expiry, dt, base, later, "theta bump");

        Ok((base - later) / dt)
    }

    /// Central-difference rho, per percentage point of rate.
    pub fn rho<M: OptionModel + ?Sized>(&self, option: &mut M) -> Result<f64, RiskError> {
        let rate = option.rate();
        let h = self.config.rate_bump;

        let mut bumped = ScopedBump::new(option);
        bumped.set_rate(rate + h);
        let up = bumped.price()?;
        bumped.set_rate(rate - h);
        let down = bumped.price()?;
        trace!(rate, h, up, down, "rho bump");

        Ok((up - down) / (2.0 * h) * RHO_SCALE)
    }

    /// Price plus every Greek.
    ///
    /// # Errors
    /// - `RiskError::UnsupportedMethod` for `Analytical` on a contract with
    ///   no closed form
    /// - `RiskError::Pricing` if any repricing fails; the option is restored
    pub fn get_all_greeks<M: OptionModel + ?Sized>(
        &self,
        option: &mut M,
        method: GreeksMethod,
    ) -> Result<OptionGreeks, RiskError> {
        match method {
            GreeksMethod::FiniteDifference => Ok(OptionGreeks {
                price: option.price()?,
                delta: self.delta(option)?,
                gamma: self.gamma(option)?,
                vega: self.vega(option)?,
                theta: self.theta(option)?,
                rho: self.rho(option)?,
            }),
            GreeksMethod::Analytical => {
                let greeks = option.closed_form_greeks().ok_or_else(|| {
                    RiskError::UnsupportedMethod(format!("{} for {}", method, option.kind()))
                })??;
                Ok(from_closed_form(option.price()?, &greeks))
            }
        }
    }

    /// Prices at `S − h` and `S + h` for one underlying, and `h`.
    fn spot_ladder<M: OptionModel + ?Sized>(
        &self,
        option: &mut M,
        asset: usize,
    ) -> Result<(f64, f64, f64), RiskError> {
        check_asset(asset, option.spots().len())?;
        let spot = option.spots()[asset];
        let h = self.config.spot_bump * spot;

        let mut bumped = ScopedBump::new(option);
        bumped.spots_mut()[asset] = spot + h;
        let up = bumped.price()?;
        bumped.spots_mut()[asset] = spot - h;
        let down = bumped.price()?;
        trace!(asset, spot, h, up, down, "spot bump");

        Ok((down, up, h))
    }
}

pub(crate) fn check_asset(index: usize, count: usize) -> Result<(), RiskError> {
    if index < count {
        Ok(())
    } else {
        Err(RiskError::InvalidAsset { index, count })
    }
}

fn from_closed_form(price: f64, greeks: &Greeks<f64>) -> OptionGreeks {
    OptionGreeks {
        price,
        delta: Sensitivity::Scalar(greeks.delta),
        gamma: Sensitivity::Scalar(greeks.gamma),
        vega: Sensitivity::Scalar(greeks.vega * VEGA_SCALE),
        theta: greeks.theta,
        rho: greeks.rho * RHO_SCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::OptionType;
    use pricer_pricing::mc::MonteCarloConfig;
    use pricer_pricing::options::{
        AmericanPutOption, BasketCallOption, EuropeanOption, OptionInstrument, UpAndInCallOption,
    };

    fn call() -> EuropeanOption {
        EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    fn basket() -> BasketCallOption {
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
    }

    // ================================================================
    // Finite Difference vs Closed Form
    // ================================================================

    #[test]
    fn test_fd_matches_closed_form() {
        let calc = HedgingCalculator::default();
        let mut option = call();
        let fd = calc
            .get_all_greeks(&mut option, GreeksMethod::FiniteDifference)
            .unwrap();
        let cf = calc
            .get_all_greeks(&mut option, GreeksMethod::Analytical)
            .unwrap();

        assert_eq!(fd.price, cf.price);
        assert_relative_eq!(fd.delta.total(), cf.delta.total(), max_relative = 1e-3);
        assert_relative_eq!(fd.gamma.total(), cf.gamma.total(), max_relative = 1e-3);
        assert_relative_eq!(fd.vega.total(), cf.vega.total(), max_relative = 1e-3);
        assert_relative_eq!(fd.rho, cf.rho, max_relative = 1e-3);
        // Forward difference over one trading day
        assert_relative_eq!(fd.theta, cf.theta, max_relative = 1e-2);
    }

    #[test]
    fn test_reference_magnitudes() {
        let calc = HedgingCalculator::default();
        let greeks = calc
            .get_all_greeks(&mut call(), GreeksMethod::Analytical)
            .unwrap();
        // per vol point and per rate point
        assert_relative_eq!(greeks.vega.total(), 0.3752, epsilon = 1e-3);
        assert_relative_eq!(greeks.rho, 0.5323, epsilon = 1e-3);
    }

    // ================================================================
    // Restoration
    // ================================================================

    #[test]
    fn test_state_unchanged_after_all_greeks() {
        let calc = HedgingCalculator::default();
        let mut option = OptionInstrument::from(basket());
        let before = option.clone();

        calc.get_all_greeks(&mut option, GreeksMethod::FiniteDifference)
            .unwrap();
        assert_eq!(option, before);
    }

    #[test]
    fn test_state_unchanged_after_error() {
        // A 150% spot bump sends S - h negative halfway through delta
        let calc = HedgingCalculator::new(BumpConfig::default().with_spot_bump(1.5)).unwrap();
        let mut option = call();
        let before = option.clone();

        let result = calc.get_all_greeks(&mut option, GreeksMethod::FiniteDifference);
        assert!(matches!(result, Err(RiskError::Pricing(_))));
        assert_eq!(option, before);
    }

    // ================================================================
    // Method Selection
    // ================================================================

    #[test]
    fn test_analytical_unsupported_for_non_european() {
        let calc = HedgingCalculator::default();
        let mut american = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let result = calc.get_all_greeks(&mut american, GreeksMethod::Analytical);
        assert!(matches!(result, Err(RiskError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_invalid_bump_rejected() {
        let result = HedgingCalculator::new(BumpConfig::default().with_spot_bump(0.0));
        assert!(matches!(result, Err(RiskError::InvalidBump { .. })));
    }

    // ================================================================
    // Individual Greeks
    // ================================================================

    #[test]
    fn test_basket_greeks_per_asset() {
        let calc = HedgingCalculator::default();
        let mut option = basket();
        let delta = calc.delta(&mut option).unwrap();
        let vega = calc.vega(&mut option).unwrap();

        assert!(delta.as_scalar().is_none());
        assert_eq!(delta.values().len(), 2);
        assert!(delta.values().iter().all(|&d| d > 0.0));
        assert!(vega.values().iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_theta_zero_near_expiry() {
        let calc = HedgingCalculator::default();
        let mut option =
            EuropeanOption::new("SPX", 100.0, 100.0, 1.0 / 365.0, 0.05, 0.2, OptionType::Call)
                .unwrap();
        assert_eq!(calc.theta(&mut option).unwrap(), 0.0);
    }

    #[test]
    fn test_american_put_signs() {
        let calc = HedgingCalculator::default();
        let mut put = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert!(calc.delta_for(&mut put, 0).unwrap() < 0.0);
        assert!(calc.rho(&mut put).unwrap() < 0.0);
    }

    #[test]
    fn test_barrier_delta_with_common_random_numbers() {
        // Same seed at every bump, so the difference is smooth enough to sign
        let config = MonteCarloConfig::builder()
            .n_paths(5_000)
            .n_steps(50)
            .build()
            .unwrap();
        let mut option = UpAndInCallOption::new("SPX", 100.0, 100.0, 120.0, 1.0, 0.05, 0.2)
            .unwrap()
            .with_config(config);
        let calc = HedgingCalculator::default();
        assert!(calc.delta_for(&mut option, 0).unwrap() > 0.0);
    }

    #[test]
    fn test_asset_out_of_range() {
        let calc = HedgingCalculator::default();
        let result = calc.delta_for(&mut call(), 1);
        assert!(matches!(
            result,
            Err(RiskError::InvalidAsset { index: 1, count: 1 })
        ));
    }

    #[test]
    fn test_dyn_option() {
        let calc = HedgingCalculator::default();
        let mut option = call();
        let dynamic: &mut dyn OptionModel = &mut option;
        assert!(calc.rho(dynamic).unwrap() > 0.0);
    }
}

//! Greeks computed concurrently on independent clones.

use pricer_core::traits::Priceable;
use pricer_pricing::options::OptionModel;

use super::calculator::{HedgingCalculator, OptionGreeks, Sensitivity};
use crate::error::RiskError;

type DeltaGamma = (Sensitivity, Sensitivity);

impl HedgingCalculator {
    /// Finite-difference Greeks with each Greek on its own clone, run in
    /// parallel with rayon.
    ///
    /// `option` itself is never mutated. Results equal
    /// [`get_all_greeks`](HedgingCalculator::get_all_greeks) with
    /// `GreeksMethod::FiniteDifference`, since every clone starts from the
    /// same state and Monte Carlo contracts reuse their seed.
    pub fn par_all_greeks<M>(&self, option: &M) -> Result<OptionGreeks, RiskError>
    where
        M: OptionModel + Clone + Send + Sync,
    {
        let (price, (delta_gamma, (vega, (theta, rho)))) = rayon::join(
            || option.price().map_err(RiskError::from),
            || {
                rayon::join(
                    || -> Result<DeltaGamma, RiskError> {
                        let mut a = option.clone();
                        let mut b = option.clone();
                        let (delta, gamma) =
                            rayon::join(|| self.delta(&mut a), || self.gamma(&mut b));
                        Ok((delta?, gamma?))
                    },
                    || {
                        rayon::join(
                            || self.vega(&mut option.clone()),
                            || {
                                rayon::join(
                                    || self.theta(&mut option.clone()),
                                    || self.rho(&mut option.clone()),
                                )
                            },
                        )
                    },
                )
            },
        );

        let (delta, gamma) = delta_gamma?;
        Ok(OptionGreeks {
            price: price?,
            delta,
            gamma,
            vega: vega?,
            theta: theta?,
            rho: rho?,
        })
    }
}

/// [`HedgingCalculator::par_all_greeks`] with default bumps.
pub fn par_all_greeks<M>(option: &M) -> Result<OptionGreeks, RiskError>
where
    M: OptionModel + Clone + Send + Sync,
{
    HedgingCalculator::default().par_all_greeks(option)
}

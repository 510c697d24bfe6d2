//! Effective-moment approximation for basket options.
//!
//! A weighted basket of lognormal assets is not itself lognormal. This
//! module collapses it to a single lognormal asset with
//!
//! - effective level `S_eff = wᵀS`
//! - effective volatility `σ_eff = √(wᵀΣw)`, where `Σ = diag(σ)·ρ·diag(σ)`
//!
//! and prices that with Black-Scholes-Merton. The result is an
//! approximation, not an exact price: it ignores the skew the sum of
//! lognormals picks up, and is most accurate for short expiries and
//! similar volatilities across the constituents.

use num_traits::Float;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;

/// Effective level and volatility of a weighted basket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketMoments<T: Float> {
    /// `wᵀS`
    pub effective_spot: T,
    /// `√(wᵀΣw)`
    pub effective_volatility: T,
}

impl<T: Float> BasketMoments<T> {
    /// Collapse a basket to its effective moments.
    ///
    /// `correlation` is indexed `[i][j]` in the same order as `spots`.
    ///
    /// # Errors
    /// - `AnalyticalError::DimensionMismatch` if any input length disagrees with `spots`
    /// - `AnalyticalError::NumericalInstability` if `wᵀΣw` is not positive
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BasketMoments;
    ///
    /// let corr = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    /// let m = BasketMoments::new(&[100.0_f64, 100.0], &[0.5, 0.5], &[0.2, 0.2], &corr).unwrap();
    /// assert_eq!(m.effective_spot, 100.0);
    /// // Independent assets diversify: 0.2 / √2
    /// assert!((m.effective_volatility - 0.2 / 2.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn new(
        spots: &[T],
        weights: &[T],
        vols: &[T],
        correlation: &[Vec<T>],
    ) -> Result<Self, AnalyticalError> {
        let n = spots.len();
        let check = |what: &'static str, got: usize| {
            if got == n {
                Ok(())
            } else {
                Err(AnalyticalError::DimensionMismatch {
                    what,
                    expected: n,
                    got,
                })
            }
        };
        check("weights", weights.len())?;
        check("volatilities", vols.len())?;
        check("correlation rows", correlation.len())?;
        for row in correlation {
            check("correlation columns", row.len())?;
        }

        let effective_spot = weights
            .iter()
            .zip(spots)
            .fold(T::zero(), |acc, (&w, &s)| acc + w * s);

        let mut variance = T::zero();
        for i in 0..n {
            let wi_si = weights[i] * vols[i];
            for j in 0..n {
                variance = variance + wi_si * correlation[i][j] * weights[j] * vols[j];
            }
        }

        if !(variance > T::zero()) {
            return Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "basket variance {} is not positive",
                    variance.to_f64().unwrap_or(f64::NAN)
                ),
            });
        }

        Ok(Self {
            effective_spot,
            effective_volatility: variance.sqrt(),
        })
    }

    /// Price a call on the basket with the effective-moment approximation.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidSpot` if the effective basket level is not positive.
    pub fn price_call(
        &self,
        strike: T,
        expiry: T,
        rate: T,
        dividend_yield: T,
    ) -> Result<T, AnalyticalError> {
        let bs = BlackScholes::new(self.effective_spot, rate, self.effective_volatility)?
            .with_dividend_yield(dividend_yield);
        Ok(bs.price_call(strike, expiry))
    }
}

//! Bootstrapped yield curve implementation.
//!
//! This module provides `BootstrappedCurve<T>`, a discount curve built
//! node by node by the bootstrapper and query-only afterwards.

use super::config::BootstrapInterpolation;
use num_traits::Float;
use pricer_core::market_data::{curves::YieldCurve, MarketDataError};

/// A discount curve defined by `(maturity, discount factor)` nodes.
///
/// The first node is always the `(0, 1)` seed. Maturities are strictly
/// increasing. Queries outside `[min_maturity, max_maturity]` are errors;
/// the curve never extrapolates.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::YieldCurve;
/// use pricer_models::instruments::{BankBill, Portfolio};
/// use pricer_optimiser::bootstrapping::CurveBootstrapper;
///
/// let mut portfolio = Portfolio::new();
/// portfolio.add_bank_bill(BankBill::new(100.0_f64, 0.5, 97.3).unwrap());
/// portfolio.add_bank_bill(BankBill::new(100.0, 1.0, 94.8).unwrap());
/// portfolio.set_cash_flows();
///
/// let curve = CurveBootstrapper::with_defaults()
///     .bootstrap(&portfolio)
///     .unwrap()
///     .curve;
///
/// assert_eq!(curve.node_count(), 3);
/// let df = curve.discount_factor(0.75).unwrap();
/// assert!(df < 0.973 && df > 0.948);
/// assert!(curve.discount_factor(1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BootstrappedCurve<T: Float> {
    maturities: Vec<T>,
    discount_factors: Vec<T>,
    interpolation: BootstrapInterpolation,
}

impl<T: Float> BootstrappedCurve<T> {
    /// Curve holding only the `(0, 1)` seed.
    pub(crate) fn seeded(interpolation: BootstrapInterpolation) -> Self {
        Self {
            maturities: vec![T::zero()],
            discount_factors: vec![T::one()],
            interpolation,
        }
    }

    /// Append a node. The caller guarantees `maturity > max_maturity()`.
    pub(crate) fn push(&mut self, maturity: T, discount_factor: T) {
        debug_assert!(maturity > self.max_maturity());
        self.maturities.push(maturity);
        self.discount_factors.push(discount_factor);
    }

    /// Node maturities, starting with 0.
    pub fn maturities(&self) -> &[T] {
        &self.maturities
    }

    /// Node discount factors, starting with 1.
    pub fn discount_factors(&self) -> &[T] {
        &self.discount_factors
    }

    /// Get the interpolation method.
    pub fn interpolation(&self) -> BootstrapInterpolation {
        self.interpolation
    }

    /// Smallest node maturity (always 0).
    pub fn min_maturity(&self) -> T {
        self.maturities[0]
    }

    /// Largest node maturity.
    pub fn max_maturity(&self) -> T {
        self.maturities[self.maturities.len() - 1]
    }

    /// Number of nodes including the seed.
    pub fn node_count(&self) -> usize {
        self.maturities.len()
    }

    /// True when `t` lies within the node span.
    pub fn covers(&self, t: T) -> bool {
        t >= self.min_maturity() && t <= self.max_maturity()
    }

    fn out_of_bounds(&self, t: T) -> MarketDataError {
        let as_f64 = |x: T| x.to_f64().unwrap_or(f64::NAN);
        MarketDataError::OutOfBounds {
            x: as_f64(t),
            min: as_f64(self.min_maturity()),
            max: as_f64(self.max_maturity()),
        }
    }

    /// Constant-forward interpolation between nodes `idx - 1` and `idx`.
    fn log_linear(&self, t: T, idx: usize) -> T {
        let (t0, t1) = (self.maturities[idx - 1], self.maturities[idx]);
        let (df0, df1) = (self.discount_factors[idx - 1], self.discount_factors[idx]);

        let forward = (df0.ln() - df1.ln()) / (t1 - t0);
        df0 * (-forward * (t - t0)).exp()
    }

    fn linear_zero_rate(&self, t: T, idx: usize) -> T {
        let (t0, t1) = (self.maturities[idx - 1], self.maturities[idx]);
        let (df0, df1) = (self.discount_factors[idx - 1], self.discount_factors[idx]);

        let r1 = -df1.ln() / t1;
        let r0 = if t0 > T::zero() { -df0.ln() / t0 } else { r1 };

        let w = (t - t0) / (t1 - t0);
        let r = r0 + (r1 - r0) * w;
        (-r * t).exp()
    }
}

impl<T: Float> YieldCurve<T> for BootstrappedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if !self.covers(t) {
            return Err(self.out_of_bounds(t));
        }

        // First node with maturity >= t; exists because t <= max_maturity.
        let idx = self.maturities.partition_point(|&m| m < t);
        if self.maturities[idx] == t {
            return Ok(self.discount_factors[idx]);
        }

        // t > maturities[0] here, so idx >= 1.
        Ok(match self.interpolation {
            BootstrapInterpolation::LogLinear => self.log_linear(t, idx),
            BootstrapInterpolation::LinearZeroRate => self.linear_zero_rate(t, idx),
        })
    }
}

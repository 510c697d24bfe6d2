//! The discount curve query interface.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Read-only discount curve.
///
/// Implementors supply [`discount_factor`](YieldCurve::discount_factor);
/// zero and forward rates follow from it with continuous compounding:
///
/// ```text
/// D(t)      = exp(-r(t) t)
/// r(t)      = -ln D(t) / t
/// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
/// ```
///
/// A curve built from market instruments is only defined between its first
/// and last node and reports anything outside as
/// [`MarketDataError::OutOfBounds`]. Option models call `zero_rate(expiry)`
/// for their risk-free rate, so that error reaches the caller unchanged.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-12);
/// assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-12);
/// assert!(curve.forward_rate(2.0, 2.0).is_err());
/// ```
pub trait YieldCurve<T: Float> {
    /// Present value of one unit paid at `t` years.
    ///
    /// # Errors
    /// `InvalidMaturity` for negative `t`; `OutOfBounds` when `t` lies
    /// outside a bounded curve.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate to `t`.
    ///
    /// # Errors
    /// `InvalidMaturity` for `t <= 0`, otherwise whatever
    /// [`discount_factor`](YieldCurve::discount_factor) returns.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    /// Continuously compounded forward rate over `[t1, t2]`.
    ///
    /// # Errors
    /// `InvalidMaturity` unless `t2 > t1`; discount factor errors at
    /// either end.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let tau = t2 - t1;
        if !(tau > T::zero()) {
            return Err(MarketDataError::InvalidMaturity {
                t: tau.to_f64().unwrap_or(f64::NAN),
            });
        }
        let start = self.discount_factor(t1)?;
        let end = self.discount_factor(t2)?;
        Ok((start / end).ln() / tau)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two-node curve on [0, 2] with log-linear discount factors.
    struct TwoNode {
        df_at_2: f64,
    }

    impl YieldCurve<f64> for TwoNode {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if !(0.0..=2.0).contains(&t) {
                return Err(MarketDataError::OutOfBounds {
                    x: t,
                    min: 0.0,
                    max: 2.0,
                });
            }
            Ok(self.df_at_2.powf(t / 2.0))
        }
    }

    #[test]
    fn test_zero_rate_from_discount_factor() {
        let curve = TwoNode { df_at_2: 0.9 };
        assert_relative_eq!(curve.zero_rate(2.0).unwrap(), -(0.9_f64).ln() / 2.0, epsilon = 1e-15);
        // Log-linear between the seed and one node is a flat zero rate
        assert_relative_eq!(curve.zero_rate(0.5).unwrap(), curve.zero_rate(2.0).unwrap(), epsilon = 1e-14);
    }

    #[test]
    fn test_zero_rate_rejects_non_positive_maturity() {
        let curve = TwoNode { df_at_2: 0.9 };
        assert_eq!(
            curve.zero_rate(0.0),
            Err(MarketDataError::InvalidMaturity { t: 0.0 })
        );
        assert!(matches!(
            curve.zero_rate(-1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_propagates() {
        let curve = TwoNode { df_at_2: 0.9 };
        assert!(matches!(
            curve.zero_rate(2.5),
            Err(MarketDataError::OutOfBounds { x, .. }) if x == 2.5
        ));
        assert!(matches!(
            curve.forward_rate(1.0, 3.0),
            Err(MarketDataError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_forward_rate_consistent_with_zero_rates() {
        let curve = TwoNode { df_at_2: 0.92 };
        let (t1, t2) = (0.5, 1.5);
        let f = curve.forward_rate(t1, t2).unwrap();
        let expected = (curve.zero_rate(t2).unwrap() * t2 - curve.zero_rate(t1).unwrap() * t1) / (t2 - t1);
        assert_relative_eq!(f, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_rate_needs_increasing_times() {
        let curve = TwoNode { df_at_2: 0.9 };
        assert!(matches!(
            curve.forward_rate(1.5, 1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(curve.forward_rate(f64::NAN, 1.0).is_err());
    }
}

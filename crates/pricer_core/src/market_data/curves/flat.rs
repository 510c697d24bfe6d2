//! Constant-rate curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A single continuously compounded rate for every maturity.
///
/// Unbounded: any `t >= 0` has a discount factor. Handy for tests and for
/// contracts that quote their own rate.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert!((curve.discount_factor(1.0).unwrap() - (-0.05_f64).exp()).abs() < 1e-15);
/// assert_eq!(curve.zero_rate(30.0).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Curve at `rate`.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// The constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

fn invalid<T: Float>(t: T) -> MarketDataError {
    MarketDataError::InvalidMaturity {
        t: t.to_f64().unwrap_or(f64::NAN),
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t >= T::zero() {
            Ok((-self.rate * t).exp())
        } else {
            Err(invalid(t))
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t > T::zero() {
            Ok(self.rate)
        } else {
            Err(invalid(t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor_at_zero() {
        let curve = FlatCurve::new(0.05_f64);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_factor_negative_time() {
        let curve = FlatCurve::new(0.05_f64);
        assert!(matches!(
            curve.discount_factor(-1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_zero_rate_is_constant() {
        let curve = FlatCurve::new(0.03_f64);
        assert_eq!(curve.zero_rate(0.5).unwrap(), 0.03);
        assert_eq!(curve.zero_rate(10.0).unwrap(), 0.03);
        assert!(curve.zero_rate(0.0).is_err());
    }

    #[test]
    fn test_forward_rate_uses_trait_default() {
        let curve = FlatCurve::new(0.04_f64);
        assert_relative_eq!(curve.forward_rate(1.0, 3.0).unwrap(), 0.04, epsilon = 1e-12);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_discount_factor_matches_zero_rate(
                rate in -0.02_f64..0.15,
                t in 0.01_f64..30.0,
            ) {
                let curve = FlatCurve::new(rate);
                let df = curve.discount_factor(t).unwrap();
                let implied = (-curve.zero_rate(t).unwrap() * t).exp();
                prop_assert!((df - implied).abs() < 1e-12);
            }
        }
    }
}

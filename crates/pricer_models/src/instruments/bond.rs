//! Fixed-coupon bullet bond.

use num_traits::Float;

use super::error::InstrumentError;
use super::traits::{validate_terms, CashFlow, Instrument};

/// Bond paying a fixed coupon `frequency` times a year and the face value
/// plus the last coupon at maturity.
///
/// With `n = round(maturity * frequency)` coupon periods, the schedule is
/// `(0, -price)`, one coupon at each `i / frequency` for `i = 1..n-1`, and
/// `(maturity, face_value + coupon)`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{Bond, Instrument};
///
/// let mut bond = Bond::new(100.0_f64, 1.0, 0.04, 4, 99.2).unwrap();
/// bond.set_cash_flows();
///
/// let flows = bond.cash_flows();
/// assert_eq!(flows.len(), 5); // entry, three interior coupons, final
/// assert_eq!(flows[1].amount, 1.0);
/// assert_eq!(flows[4].amount, 101.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bond<T: Float> {
    face_value: T,
    maturity: T,
    coupon_rate: T,
    frequency: u32,
    price: T,
    cash_flows: Vec<CashFlow<T>>,
}

impl<T: Float> Bond<T> {
    /// Create a bond.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidFaceValue`, `InvalidMaturity`, `InvalidPrice` for non-positive terms
    /// - `InstrumentError::InvalidFrequency` if `frequency == 0`
    /// - `InstrumentError::InvalidCouponRate` if the coupon rate is negative
    /// - `InstrumentError::InvalidParameter` if maturity is shorter than half a coupon period
    pub fn new(
        face_value: T,
        maturity: T,
        coupon_rate: T,
        frequency: u32,
        price: T,
    ) -> Result<Self, InstrumentError> {
        validate_terms(face_value, maturity, price)?;
        if frequency == 0 {
            return Err(InstrumentError::InvalidFrequency { frequency });
        }
        if !(coupon_rate >= T::zero()) || !coupon_rate.is_finite() {
            return Err(InstrumentError::InvalidCouponRate {
                coupon_rate: coupon_rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        let bond = Self {
            face_value,
            maturity,
            coupon_rate,
            frequency,
            price,
            cash_flows: Vec::new(),
        };
        if bond.num_periods() == 0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "maturity {} is shorter than half a coupon period at frequency {}",
                    maturity.to_f64().unwrap_or(f64::NAN),
                    frequency
                ),
            });
        }
        Ok(bond)
    }

    /// Annual coupon rate.
    #[inline]
    pub fn coupon_rate(&self) -> T {
        self.coupon_rate
    }

    /// Coupon payments per year.
    #[inline]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Amount of a single coupon payment.
    #[inline]
    pub fn coupon(&self) -> T {
        self.face_value * self.coupon_rate / T::from(self.frequency).unwrap()
    }

    /// Number of coupon periods, `round(maturity * frequency)`.
    pub fn num_periods(&self) -> usize {
        (self.maturity * T::from(self.frequency).unwrap())
            .round()
            .to_usize()
            .unwrap_or(0)
    }

    /// Redemption flow at maturity: face value plus the last coupon.
    #[inline]
    pub fn final_cash_flow(&self) -> T {
        self.face_value + self.coupon()
    }
}

impl<T: Float> Instrument<T> for Bond<T> {
    fn face_value(&self) -> T {
        self.face_value
    }

    fn maturity(&self) -> T {
        self.maturity
    }

    fn price(&self) -> T {
        self.price
    }

    fn cash_flows(&self) -> &[CashFlow<T>] {
        &self.cash_flows
    }

    fn set_cash_flows(&mut self) {
        let n = self.num_periods();
        let coupon = self.coupon();
        let freq = T::from(self.frequency).unwrap();

        self.cash_flows.clear();
        self.cash_flows.reserve(n + 1);
        self.cash_flows.push(CashFlow::new(T::zero(), -self.price));
        for i in 1..n {
            let t = T::from(i).unwrap() / freq;
            self.cash_flows.push(CashFlow::new(t, coupon));
        }
        self.cash_flows
            .push(CashFlow::new(self.maturity, self.final_cash_flow()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarterly_schedule() {
        let mut bond = Bond::new(100.0_f64, 2.0, 0.045, 4, 98.7).unwrap();
        bond.set_cash_flows();
        let flows = bond.cash_flows();

        // entry + 7 interior coupons + final
        assert_eq!(flows.len(), 9);
        assert_eq!(flows[0], CashFlow::new(0.0, -98.7));
        for (i, cf) in flows[1..8].iter().enumerate() {
            assert_relative_eq!(cf.time, (i + 1) as f64 / 4.0, epsilon = 1e-15);
            assert_relative_eq!(cf.amount, 1.125, epsilon = 1e-12);
        }
        assert_eq!(flows[8].time, 2.0);
        assert_relative_eq!(flows[8].amount, 101.125, epsilon = 1e-12);
    }

    #[test]
    fn test_single_period_bond_has_no_interior_coupons() {
        let mut bond = Bond::new(100.0_f64, 1.0, 0.05, 1, 99.0).unwrap();
        bond.set_cash_flows();
        assert_eq!(bond.cash_flows().len(), 2);
        assert_relative_eq!(bond.cash_flows()[1].amount, 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon_bond() {
        let mut bond = Bond::new(100.0_f64, 2.0, 0.0, 2, 92.0).unwrap();
        bond.set_cash_flows();
        let flows = bond.cash_flows();
        assert_eq!(flows.len(), 5);
        assert!(flows[1..4].iter().all(|cf| cf.amount == 0.0));
        assert_eq!(flows[4].amount, 100.0);
    }

    #[test]
    fn test_set_cash_flows_is_idempotent() {
        let mut bond = Bond::new(100.0_f64, 3.0, 0.05, 4, 97.0).unwrap();
        bond.set_cash_flows();
        let first = bond.cash_flows().to_vec();
        bond.set_cash_flows();
        assert_eq!(bond.cash_flows(), first.as_slice());
    }

    #[test]
    fn test_invalid_frequency() {
        assert_eq!(
            Bond::new(100.0_f64, 1.0, 0.04, 0, 99.0),
            Err(InstrumentError::InvalidFrequency { frequency: 0 })
        );
    }

    #[test]
    fn test_invalid_coupon_rate() {
        assert!(matches!(
            Bond::new(100.0_f64, 1.0, -0.04, 4, 99.0),
            Err(InstrumentError::InvalidCouponRate { .. })
        ));
    }

    #[test]
    fn test_maturity_shorter_than_half_period() {
        assert!(matches!(
            Bond::new(100.0_f64, 0.1, 0.04, 4, 99.0),
            Err(InstrumentError::InvalidParameter { .. })
        ));
    }
}

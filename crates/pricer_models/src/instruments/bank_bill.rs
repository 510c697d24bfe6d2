//! Bank bill (zero-coupon money-market instrument).

use num_traits::Float;

use super::error::InstrumentError;
use super::traits::{validate_terms, CashFlow, Instrument};

/// Discount security paying its face value at maturity and nothing before.
///
/// The schedule is two flows: `(0, -price)` and `(maturity, face_value)`,
/// so the discount factor to maturity is observable as `price / face_value`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BankBill, Instrument};
///
/// let mut bill = BankBill::new(100.0_f64, 0.5, 97.3).unwrap();
/// bill.set_cash_flows();
/// assert_eq!(bill.cash_flows().len(), 2);
/// assert!((bill.implied_discount_factor() - 0.973).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankBill<T: Float> {
    face_value: T,
    maturity: T,
    price: T,
    cash_flows: Vec<CashFlow<T>>,
}

impl<T: Float> BankBill<T> {
    /// Create a bank bill.
    ///
    /// # Errors
    /// Returns `InstrumentError` if face value, maturity or price is non-positive.
    pub fn new(face_value: T, maturity: T, price: T) -> Result<Self, InstrumentError> {
        validate_terms(face_value, maturity, price)?;
        Ok(Self {
            face_value,
            maturity,
            price,
            cash_flows: Vec::new(),
        })
    }

    /// Discount factor to maturity implied by the price.
    #[inline]
    pub fn implied_discount_factor(&self) -> T {
        self.price / self.face_value
    }
}

impl<T: Float> Instrument<T> for BankBill<T> {
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
        self.cash_flows.clear();
        self.cash_flows.push(CashFlow::new(T::zero(), -self.price));
        self.cash_flows
            .push(CashFlow::new(self.maturity, self.face_value));
    }
}

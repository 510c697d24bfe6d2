//! Instrument trait definitions.
//!
//! This module provides the [`Instrument`] trait shared by every
//! cash-flow-bearing security, and the [`CashFlow`] record it produces.
//!
//! # Lifecycle
//!
//! Instruments are constructed with their static terms only. The cash-flow
//! schedule is built by an explicit [`Instrument::set_cash_flows`] call;
//! before that, [`Instrument::cash_flows`] is empty.

use num_traits::Float;

use super::error::InstrumentError;

/// A single dated payment.
///
/// Negative amounts are outflows to the holder (the purchase price at t = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow<T: Float> {
    /// Payment time in years from today
    pub time: T,
    /// Signed payment amount
    pub amount: T,
}

impl<T: Float> CashFlow<T> {
    /// Create a cash flow.
    #[inline]
    pub fn new(time: T, amount: T) -> Self {
        Self { time, amount }
    }
}

/// Core trait for cash-flow-bearing instruments.
///
/// # Invariants
///
/// Once [`set_cash_flows`](Instrument::set_cash_flows) has run:
/// - the first cash flow is `(0, -price)`
/// - cash flows are in increasing time order
/// - the last cash flow falls on [`maturity`](Instrument::maturity)
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{BankBill, Instrument};
///
/// let mut bill = BankBill::new(100.0_f64, 0.25, 98.5).unwrap();
/// assert!(bill.cash_flows().is_empty());
///
/// bill.set_cash_flows();
/// let flows = bill.cash_flows();
/// assert_eq!(flows[0].amount, -98.5);
/// assert_eq!(flows[1].time, 0.25);
/// ```
pub trait Instrument<T: Float> {
    /// Face (redemption) value.
    fn face_value(&self) -> T;

    /// Maturity in years.
    fn maturity(&self) -> T;

    /// Purchase price.
    fn price(&self) -> T;

    /// Cash-flow schedule, empty until `set_cash_flows` is called.
    fn cash_flows(&self) -> &[CashFlow<T>];

    /// Build the cash-flow schedule, replacing any previous one.
    fn set_cash_flows(&mut self);
}

/// Validate the static terms common to every instrument.
pub(crate) fn validate_terms<T: Float>(
    face_value: T,
    maturity: T,
    price: T,
) -> Result<(), InstrumentError> {
    let as_f64 = |x: T| x.to_f64().unwrap_or(f64::NAN);
    if !(face_value > T::zero()) || !face_value.is_finite() {
        return Err(InstrumentError::InvalidFaceValue {
            face_value: as_f64(face_value),
        });
    }
    if !(maturity > T::zero()) || !maturity.is_finite() {
        return Err(InstrumentError::InvalidMaturity {
            maturity: as_f64(maturity),
        });
    }
    if !(price > T::zero()) || !price.is_finite() {
        return Err(InstrumentError::InvalidPrice {
            price: as_f64(price),
        });
    }
    Ok(())
}

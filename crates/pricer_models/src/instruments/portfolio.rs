//! Ordered collection of bootstrap instruments.

use num_traits::Float;

use super::bank_bill::BankBill;
use super::bond::Bond;
use super::traits::{CashFlow, Instrument};

/// Bank bills and bonds in insertion order.
///
/// Bills are kept apart from bonds because a curve is always bootstrapped
/// from the money-market end first.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BankBill, Bond, Portfolio};
///
/// let mut portfolio = Portfolio::new();
/// portfolio.add_bank_bill(BankBill::new(100.0_f64, 0.25, 98.5).unwrap());
/// portfolio.add_bond(Bond::new(100.0, 1.0, 0.04, 4, 99.2).unwrap());
/// portfolio.set_cash_flows();
///
/// assert_eq!(portfolio.len(), 2);
/// // 2 bill flows + 5 bond flows
/// assert_eq!(portfolio.cash_flows().len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio<T: Float> {
    bank_bills: Vec<BankBill<T>>,
    bonds: Vec<Bond<T>>,
    cash_flows: Vec<CashFlow<T>>,
}

impl<T: Float> Default for Portfolio<T> {
    fn default() -> Self {
        Self {
            bank_bills: Vec::new(),
            bonds: Vec::new(),
            cash_flows: Vec::new(),
        }
    }
}

impl<T: Float> Portfolio<T> {
    /// Create an empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bank bill.
    pub fn add_bank_bill(&mut self, bill: BankBill<T>) {
        self.bank_bills.push(bill);
    }

    /// Append a bond.
    pub fn add_bond(&mut self, bond: Bond<T>) {
        self.bonds.push(bond);
    }

    /// Bank bills in insertion order.
    pub fn bank_bills(&self) -> &[BankBill<T>] {
        &self.bank_bills
    }

    /// Bonds in insertion order.
    pub fn bonds(&self) -> &[Bond<T>] {
        &self.bonds
    }

    /// Total number of instruments.
    pub fn len(&self) -> usize {
        self.bank_bills.len() + self.bonds.len()
    }

    /// True when the portfolio holds no instruments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populate every constituent's schedule and gather the aggregate list,
    /// bills first then bonds.
    pub fn set_cash_flows(&mut self) {
        self.cash_flows.clear();
        for bill in &mut self.bank_bills {
            bill.set_cash_flows();
            self.cash_flows.extend_from_slice(bill.cash_flows());
        }
        for bond in &mut self.bonds {
            bond.set_cash_flows();
            self.cash_flows.extend_from_slice(bond.cash_flows());
        }
    }

    /// Aggregate cash flows, empty until `set_cash_flows` is called.
    pub fn cash_flows(&self) -> &[CashFlow<T>] {
        &self.cash_flows
    }
}

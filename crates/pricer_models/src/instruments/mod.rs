//! Fixed-income instrument definitions.
//!
//! This module provides the cash-flow-bearing instruments a discount curve
//! is bootstrapped from:
//! - [`BankBill`]: zero-coupon money-market instrument
//! - [`Bond`]: fixed-coupon bullet bond
//! - [`Portfolio`]: ordered bills and bonds
//!
//! It also holds [`OptionType`], shared by every option model.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{BankBill, Instrument};
//!
//! let mut bill = BankBill::new(100.0_f64, 0.25, 98.5).unwrap();
//! bill.set_cash_flows();
//! assert_eq!(bill.cash_flows()[0].amount, -98.5);
//! ```

mod bank_bill;
mod bond;
mod error;
mod payoff;
mod portfolio;
mod traits;

pub use bank_bill::BankBill;
pub use bond::Bond;
pub use error::InstrumentError;
pub use payoff::OptionType;
pub use portfolio::Portfolio;
pub use traits::{CashFlow, Instrument};

//! Sequential bootstrapping engine.
//!
//! This module provides `CurveBootstrapper<T>`, which strips bank bills
//! and then coupon bonds into a `BootstrappedCurve<T>`.

use std::cmp::Ordering;

use super::config::{BootstrapConfig, MissingNodePolicy};
use super::curve::BootstrappedCurve;
use super::error::BootstrapError;
use num_traits::Float;
use pricer_core::market_data::curves::YieldCurve;
use pricer_models::instruments::{BankBill, Bond, Instrument, Portfolio};
use tracing::{debug, warn};

/// An interior coupon left out of a bond's present value because it fell
/// beyond the curve built so far.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkippedCashFlow<T: Float> {
    /// Maturity of the bond that owns the coupon
    pub bond_maturity: T,
    /// Coupon payment time
    pub time: T,
    /// Coupon amount
    pub amount: T,
}

/// Result of a bootstrap operation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BootstrapResult<T: Float> {
    /// The bootstrapped curve
    pub curve: BootstrappedCurve<T>,
    /// Coupons dropped under `MissingNodePolicy::Skip`, in stripping order
    pub skipped: Vec<SkippedCashFlow<T>>,
}

/// Sequential bootstrapping engine.
///
/// Implements the standard stripping algorithm:
/// 1. Seed the curve with `(0, 1)`
/// 2. Each bank bill contributes `df = price / face_value` at its maturity
/// 3. Each bond contributes `df = (price - PV(interior coupons)) / final cash flow`,
///    with interior coupons discounted on the curve built so far
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{BankBill, Bond, Portfolio};
/// use pricer_optimiser::bootstrapping::{BootstrapConfig, CurveBootstrapper};
///
/// let mut portfolio = Portfolio::new();
/// portfolio.add_bank_bill(BankBill::new(100.0_f64, 0.5, 97.3).unwrap());
/// portfolio.add_bank_bill(BankBill::new(100.0, 0.25, 98.5).unwrap());
/// portfolio.add_bond(Bond::new(100.0, 1.0, 0.04, 4, 99.2).unwrap());
/// portfolio.set_cash_flows();
///
/// let bootstrapper = CurveBootstrapper::new(BootstrapConfig::default());
/// let result = bootstrapper.bootstrap(&portfolio).unwrap();
///
/// assert_eq!(result.curve.maturities(), &[0.0, 0.25, 0.5, 1.0]);
/// // The 0.75y coupon lies beyond the 0.5y bill
/// assert_eq!(result.skipped.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CurveBootstrapper<T: Float> {
    config: BootstrapConfig,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Float> CurveBootstrapper<T> {
    /// Create a new bootstrapper with the given configuration.
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            _marker: std::marker::PhantomData,
        }
    }

    /// Create a bootstrapper with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BootstrapConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstrap a discount curve from a portfolio.
    ///
    /// Bill and bond cash flows must already be populated
    /// (`Portfolio::set_cash_flows`).
    /// Bills are stripped strictly before bonds.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - Empty portfolio
    /// * `NonIncreasingMaturity` - Duplicate maturities, or unsorted input
    ///   with `sort_by_maturity = false`
    /// * `CashFlowsNotSet` - A bill or bond without a cash-flow schedule
    /// * `NegativeRate` / `InvalidDiscountFactor` - Solved node out of range
    /// * `MissingNode` - Coupon beyond the curve under `MissingNodePolicy::Fail`
    pub fn bootstrap(&self, portfolio: &Portfolio<T>) -> Result<BootstrapResult<T>, BootstrapError> {
        if portfolio.is_empty() {
            return Err(BootstrapError::InsufficientData { provided: 0 });
        }

        let mut curve = BootstrappedCurve::seeded(self.config.interpolation);
        let mut skipped = Vec::new();

        for bill in self.ordered(portfolio.bank_bills()) {
            self.strip_bill(&mut curve, bill)?;
        }
        for bond in self.ordered(portfolio.bonds()) {
            self.strip_bond(&mut curve, bond, &mut skipped)?;
        }

        debug!(
            nodes = curve.node_count(),
            skipped = skipped.len(),
            "Bootstrap complete"
        );

        Ok(BootstrapResult { curve, skipped })
    }

    /// Instruments in stripping order.
    fn ordered<'a, I: Instrument<T>>(&self, instruments: &'a [I]) -> Vec<&'a I> {
        let mut refs: Vec<&I> = instruments.iter().collect();
        if self.config.sort_by_maturity {
            refs.sort_by(|a, b| {
                a.maturity()
                    .partial_cmp(&b.maturity())
                    .unwrap_or(Ordering::Equal)
            });
        }
        refs
    }

    fn strip_bill(
        &self,
        curve: &mut BootstrappedCurve<T>,
        bill: &BankBill<T>,
    ) -> Result<(), BootstrapError> {
        let maturity = bill.maturity();
        if bill.cash_flows().len() < 2 {
            return Err(BootstrapError::CashFlowsNotSet {
                maturity: as_f64(maturity),
            });
        }
        self.check_extends(curve, maturity)?;

        let df = bill.implied_discount_factor();
        self.insert(curve, maturity, df)
    }

    fn strip_bond(
        &self,
        curve: &mut BootstrappedCurve<T>,
        bond: &Bond<T>,
        skipped: &mut Vec<SkippedCashFlow<T>>,
    ) -> Result<(), BootstrapError> {
        let maturity = bond.maturity();
        let flows = bond.cash_flows();
        if flows.len() < 2 {
            return Err(BootstrapError::CashFlowsNotSet {
                maturity: as_f64(maturity),
            });
        }
        self.check_extends(curve, maturity)?;

        // flows[0] is the purchase, the last entry the redemption
        let final_flow = flows[flows.len() - 1];
        let mut pv_interior = T::zero();

        for flow in &flows[1..flows.len() - 1] {
            if curve.covers(flow.time) {
                pv_interior = pv_interior + flow.amount * curve.discount_factor(flow.time)?;
                continue;
            }

            match self.config.on_missing_node {
                MissingNodePolicy::Skip => {
                    warn!(
                        bond_maturity = as_f64(maturity),
                        time = as_f64(flow.time),
                        amount = as_f64(flow.amount),
                        curve_end = as_f64(curve.max_maturity()),
                        "Coupon beyond bootstrapped range skipped"
                    );
                    skipped.push(SkippedCashFlow {
                        bond_maturity: maturity,
                        time: flow.time,
                        amount: flow.amount,
                    });
                }
                MissingNodePolicy::Fail => {
                    return Err(BootstrapError::MissingNode {
                        time: as_f64(flow.time),
                        maturity: as_f64(maturity),
                        curve_end: as_f64(curve.max_maturity()),
                    });
                }
            }
        }

        let df = (bond.price() - pv_interior) / final_flow.amount;
        self.insert(curve, maturity, df)
    }

    fn check_extends(&self, curve: &BootstrappedCurve<T>, maturity: T) -> Result<(), BootstrapError> {
        if maturity > curve.max_maturity() {
            Ok(())
        } else {
            Err(BootstrapError::NonIncreasingMaturity {
                maturity: as_f64(maturity),
                last: as_f64(curve.max_maturity()),
            })
        }
    }

    fn insert(&self, curve: &mut BootstrappedCurve<T>, maturity: T, df: T) -> Result<(), BootstrapError> {
        if !df.is_finite() || df <= T::zero() {
            return Err(BootstrapError::InvalidDiscountFactor {
                maturity: as_f64(maturity),
                discount_factor: as_f64(df),
            });
        }
        if df > T::one() && !self.config.allow_negative_rates {
            return Err(BootstrapError::NegativeRate {
                maturity: as_f64(maturity),
                discount_factor: as_f64(df),
            });
        }

        debug!(
            maturity = as_f64(maturity),
            discount_factor = as_f64(df),
            "Curve node added"
        );
        curve.push(maturity, df);
        Ok(())
    }
}

impl<T: Float> Default for CurveBootstrapper<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[inline]
fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

//! Integration tests for discount curve bootstrapping.
//!
//! These tests run the full bills-then-bonds strip over a realistic
//! money-market plus quarterly-coupon portfolio and check curve-wide
//! properties with proptest.

use approx::assert_relative_eq;
use pricer_core::market_data::curves::YieldCurve;
use pricer_models::instruments::{BankBill, Bond, Portfolio};
use pricer_optimiser::bootstrapping::{
    BootstrapConfig, BootstrapError, BootstrapInterpolation, CurveBootstrapper, MissingNodePolicy,
};
use proptest::prelude::*;

fn market_portfolio() -> Portfolio<f64> {
    let mut portfolio = Portfolio::new();
    portfolio.add_bank_bill(BankBill::new(100.0, 0.25, 98.5).unwrap());
    portfolio.add_bank_bill(BankBill::new(100.0, 0.5, 97.3).unwrap());
    portfolio.add_bond(Bond::new(100.0, 1.0, 0.04, 4, 99.2).unwrap());
    portfolio.add_bond(Bond::new(100.0, 2.0, 0.045, 4, 98.7).unwrap());
    portfolio.add_bond(Bond::new(100.0, 3.0, 0.05, 4, 97.0).unwrap());
    portfolio.set_cash_flows();
    portfolio
}

// ============================================================================
// End-to-End Bootstrap Tests
// ============================================================================

#[test]
fn test_market_portfolio_nodes() {
    let result = CurveBootstrapper::with_defaults()
        .bootstrap(&market_portfolio())
        .unwrap();
    let curve = &result.curve;

    assert_eq!(curve.maturities(), &[0.0, 0.25, 0.5, 1.0, 2.0, 3.0]);
    assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    assert_eq!(curve.discount_factor(0.25).unwrap(), 0.985);
    assert_eq!(curve.discount_factor(0.5).unwrap(), 0.973);

    // Strictly decreasing for positive rates
    for pair in curve.discount_factors().windows(2) {
        assert!(pair[1] < pair[0], "{:?}", curve.discount_factors());
    }
}

#[test]
fn test_market_portfolio_reprices_bonds() {
    let portfolio = market_portfolio();
    let result = CurveBootstrapper::with_defaults()
        .bootstrap(&portfolio)
        .unwrap();
    let curve = &result.curve;

    // Each bond reprices exactly on the curve once skipped coupons are excluded
    for bond in portfolio.bonds() {
        use pricer_models::instruments::Instrument;

        let mut pv = 0.0;
        for flow in &bond.cash_flows()[1..] {
            let was_skipped = result
                .skipped
                .iter()
                .any(|s| s.bond_maturity == bond.maturity() && s.time == flow.time);
            if !was_skipped {
                pv += flow.amount * curve.discount_factor(flow.time).unwrap();
            }
        }
        assert_relative_eq!(pv, bond.price(), epsilon = 1e-10);
    }
}

#[test]
fn test_market_portfolio_skipped_coupons() {
    let result = CurveBootstrapper::with_defaults()
        .bootstrap(&market_portfolio())
        .unwrap();

    // 1y: 0.75 | 2y: 1.25, 1.5, 1.75 | 3y: 2.25, 2.5, 2.75
    let times: Vec<f64> = result.skipped.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![0.75, 1.25, 1.5, 1.75, 2.25, 2.5, 2.75]);
    assert!(result.skipped.iter().all(|s| s.amount > 0.0));
}

#[test]
fn test_fail_policy_stops_at_first_gap() {
    let config = BootstrapConfig::new().with_missing_node_policy(MissingNodePolicy::Fail);
    let err = CurveBootstrapper::new(config)
        .bootstrap(&market_portfolio())
        .unwrap_err();
    assert!(err.is_missing_node());
}

#[test]
fn test_instrument_order_does_not_matter_when_sorting() {
    let mut reversed = Portfolio::new();
    reversed.add_bond(Bond::new(100.0, 3.0, 0.05, 4, 97.0).unwrap());
    reversed.add_bond(Bond::new(100.0, 2.0, 0.045, 4, 98.7).unwrap());
    reversed.add_bond(Bond::new(100.0, 1.0, 0.04, 4, 99.2).unwrap());
    reversed.add_bank_bill(BankBill::new(100.0, 0.5, 97.3).unwrap());
    reversed.add_bank_bill(BankBill::new(100.0, 0.25, 98.5).unwrap());
    reversed.set_cash_flows();

    let a = CurveBootstrapper::with_defaults()
        .bootstrap(&market_portfolio())
        .unwrap();
    let b = CurveBootstrapper::with_defaults()
        .bootstrap(&reversed)
        .unwrap();
    assert_eq!(a.curve, b.curve);

    let strict = CurveBootstrapper::new(BootstrapConfig::new().with_sorting(false));
    assert!(matches!(
        strict.bootstrap(&reversed),
        Err(BootstrapError::NonIncreasingMaturity { .. })
    ));
}

#[test]
fn test_curve_zero_rate_consistency() {
    let curve = CurveBootstrapper::with_defaults()
        .bootstrap(&market_portfolio())
        .unwrap()
        .curve;

    for &t in &[0.1, 0.25, 0.4, 0.75, 1.0, 1.3, 2.0, 2.5, 3.0] {
        let r = curve.zero_rate(t).unwrap();
        assert!(r > 0.0);
        assert_relative_eq!(
            curve.discount_factor(t).unwrap(),
            (-r * t).exp(),
            epsilon = 1e-14
        );
    }
    assert!(curve.discount_factor(3.5).is_err());
    assert!(curve.zero_rate(0.0).is_err());
}

#[test]
fn test_linear_zero_rate_curve_shares_nodes() {
    let config = BootstrapConfig::new().with_interpolation(BootstrapInterpolation::LinearZeroRate);
    let zero_linear = CurveBootstrapper::new(config)
        .bootstrap(&market_portfolio())
        .unwrap()
        .curve;
    let log_linear = CurveBootstrapper::with_defaults()
        .bootstrap(&market_portfolio())
        .unwrap()
        .curve;

    // Nodes up to the first bond are interpolation-independent
    for &t in &[0.25, 0.5] {
        assert_eq!(
            zero_linear.discount_factor(t).unwrap(),
            log_linear.discount_factor(t).unwrap()
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

/// Bill-only portfolio with strictly increasing maturities and decreasing prices.
fn bill_ladder() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.05f64..1.0, 0.001f64..0.05), 1..8).prop_map(|steps| {
        let mut t = 0.0;
        let mut log_df = 0.0;
        steps
            .into_iter()
            .map(|(dt, fwd)| {
                t += dt;
                log_df -= fwd * dt;
                (t, 100.0 * log_df.exp())
            })
            .collect()
    })
}

fn bill_portfolio(ladder: &[(f64, f64)]) -> Portfolio<f64> {
    let mut portfolio = Portfolio::new();
    for &(maturity, price) in ladder {
        portfolio.add_bank_bill(BankBill::new(100.0, maturity, price).unwrap());
    }
    portfolio.set_cash_flows();
    portfolio
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_curve_starts_at_one_and_decreases(ladder in bill_ladder()) {
        let curve = CurveBootstrapper::with_defaults()
            .bootstrap(&bill_portfolio(&ladder))
            .unwrap()
            .curve;

        prop_assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        for pair in curve.discount_factors().windows(2) {
            prop_assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn prop_interpolated_between_brackets(ladder in bill_ladder(), w in 0.01f64..0.99) {
        let curve = CurveBootstrapper::with_defaults()
            .bootstrap(&bill_portfolio(&ladder))
            .unwrap()
            .curve;

        let m = curve.maturities();
        let d = curve.discount_factors();
        for i in 1..m.len() {
            let t = m[i - 1] + w * (m[i] - m[i - 1]);
            let df = curve.discount_factor(t).unwrap();
            prop_assert!(df <= d[i - 1] && df >= d[i]);
        }
    }

    #[test]
    fn prop_discount_factor_matches_zero_rate(ladder in bill_ladder(), w in 0.01f64..1.0) {
        let curve = CurveBootstrapper::with_defaults()
            .bootstrap(&bill_portfolio(&ladder))
            .unwrap()
            .curve;

        let t = w * curve.max_maturity();
        let r = curve.zero_rate(t).unwrap();
        let df = curve.discount_factor(t).unwrap();
        prop_assert!((df - (-r * t).exp()).abs() < 1e-12);
    }
}

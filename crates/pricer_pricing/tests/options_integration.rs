//! Integration tests for the option contracts.
//!
//! # Test Categories
//!
//! 1. **Arbitrage relations**: put-call parity, early-exercise premium
//! 2. **Barrier**: discrete-monitoring Monte Carlo vs the continuous
//!    Reiner-Rubinstein formula with the Broadie-Glasserman shift
//! 3. **Market inputs**: options built from resolved market data

use approx::assert_relative_eq;
use chrono::NaiveDate;
use pricer_core::market_data::{FlatCurve, InMemoryMarketData};
use pricer_core::traits::Priceable;
use pricer_models::analytical::norm_cdf;
use pricer_models::instruments::OptionType;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::options::{
    AmericanPutOption, BasketCallOption, EuropeanOption, OptionInstrument, OptionModel,
    UpAndInCallOption,
};
use pricer_pricing::MarketInputs;
use proptest::prelude::*;

/// Continuous-monitoring up-and-in call for `barrier > strike`.
fn up_and_in_call_continuous(
    spot: f64,
    strike: f64,
    barrier: f64,
    expiry: f64,
    rate: f64,
    q: f64,
    vol: f64,
) -> f64 {
    let sig_t = vol * expiry.sqrt();
    let lambda = (rate - q + 0.5 * vol * vol) / (vol * vol);
    let x1 = (spot / barrier).ln() / sig_t + lambda * sig_t;
    let y = (barrier * barrier / (spot * strike)).ln() / sig_t + lambda * sig_t;
    let y1 = (barrier / spot).ln() / sig_t + lambda * sig_t;
    let ds = spot * (-q * expiry).exp();
    let dk = strike * (-rate * expiry).exp();
    let hs = barrier / spot;

    ds * norm_cdf(x1) - dk * norm_cdf(x1 - sig_t)
        - ds * hs.powf(2.0 * lambda) * (norm_cdf(-y) - norm_cdf(-y1))
        + dk * hs.powf(2.0 * lambda - 2.0) * (norm_cdf(-y + sig_t) - norm_cdf(-y1 + sig_t))
}

// ============================================================================
// Arbitrage Relations
// ============================================================================

#[test]
fn test_textbook_european_values() {
    let call = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    assert_relative_eq!(call.price().unwrap(), 10.4506, epsilon = 1e-4);
}

#[test]
fn test_american_put_premium_across_strikes() {
    for &strike in &[80.0, 90.0, 100.0, 110.0, 120.0] {
        let american = AmericanPutOption::new("SPX", 100.0, strike, 1.0, 0.05, 0.25)
            .unwrap()
            .with_steps(200);
        let european =
            EuropeanOption::new("SPX", 100.0, strike, 1.0, 0.05, 0.25, OptionType::Put).unwrap();
        assert!(
            american.price().unwrap() >= european.price().unwrap(),
            "strike {strike}"
        );
    }
}

#[test]
fn test_american_tree_converges() {
    let coarse = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2)
        .unwrap()
        .with_steps(200)
        .price()
        .unwrap();
    let fine = AmericanPutOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2)
        .unwrap()
        .with_steps(800)
        .price()
        .unwrap();
    assert!((coarse - fine).abs() < 0.02);
}

// ============================================================================
// Barrier Tests
// ============================================================================

#[test]
fn test_barrier_mc_vs_shifted_continuous_formula() {
    let (spot, strike, barrier, expiry, rate, vol) = (100.0, 100.0, 120.0, 1.0, 0.05, 0.2);
    let config = MonteCarloConfig::builder()
        .n_paths(50_000)
        .n_steps(252)
        .seed(7)
        .build()
        .unwrap();
    let option = UpAndInCallOption::new("SPX", spot, strike, barrier, expiry, rate, vol)
        .unwrap()
        .with_config(config);
    let estimate = option.estimate().unwrap();

    // Discrete monitoring behaves like a continuous barrier shifted up by
    // exp(0.5826 σ √dt)
    let dt = expiry / 252.0;
    let shifted = barrier * (0.5826 * vol * dt.sqrt()).exp();
    let reference = up_and_in_call_continuous(spot, strike, shifted, expiry, rate, 0.0, vol);

    let tolerance = 4.0 * estimate.std_error + 0.02 * reference;
    assert!(
        (estimate.price - reference).abs() < tolerance,
        "mc {} vs reference {}",
        estimate.price,
        reference
    );

    // Continuous monitoring knocks in more often
    let continuous = up_and_in_call_continuous(spot, strike, barrier, expiry, rate, 0.0, vol);
    assert!(estimate.price < continuous + 4.0 * estimate.std_error);
}

#[test]
fn test_barrier_independent_of_thread_count() {
    let config = MonteCarloConfig::builder()
        .n_paths(4_000)
        .n_steps(52)
        .batch_size(500)
        .build()
        .unwrap();
    let option = UpAndInCallOption::new("SPX", 100.0, 100.0, 115.0, 1.0, 0.05, 0.2)
        .unwrap()
        .with_config(config);

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| option.price().unwrap());
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| option.price().unwrap());
    assert_eq!(single, many);
}

// ============================================================================
// Market Inputs
// ============================================================================

#[test]
fn test_basket_from_market_inputs() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut store = InMemoryMarketData::new();
    store.insert_history(
        "AAA",
        start,
        &[100.0, 101.5, 100.8, 102.2, 101.9, 103.0, 102.4, 104.1],
    );
    store.insert_history("BBB", start, &[40.0, 40.3, 40.1, 40.9, 41.2, 41.0, 41.6, 41.9]);
    let date = start + chrono::Days::new(7);
    let tickers = vec!["AAA".to_string(), "BBB".to_string()];

    let inputs =
        MarketInputs::resolve(&store, &FlatCurve::new(0.04), &tickers, date, 0.5, 7).unwrap();
    let basket = BasketCallOption::new(
        tickers,
        inputs.spots.clone(),
        vec![0.5, 0.5],
        inputs.vols.clone(),
        inputs.correlation.clone(),
        70.0,
        0.5,
        inputs.rate,
    )
    .unwrap();

    let instrument = OptionInstrument::from(basket);
    assert_eq!(instrument.spots(), &[104.1, 41.9]);
    assert!(instrument.price().unwrap() > 0.0);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_put_call_parity(
        spot in 20.0..200.0_f64,
        strike in 20.0..200.0_f64,
        expiry in 0.05..3.0_f64,
        rate in -0.01..0.10_f64,
        q in 0.0..0.06_f64,
        vol in 0.05..0.8_f64,
    ) {
        let call = EuropeanOption::new("X", spot, strike, expiry, rate, vol, OptionType::Call)
            .unwrap()
            .with_dividend_yield(q);
        let put = EuropeanOption::new("X", spot, strike, expiry, rate, vol, OptionType::Put)
            .unwrap()
            .with_dividend_yield(q);

        let lhs = call.price().unwrap() - put.price().unwrap();
        let rhs = spot * (-q * expiry).exp() - strike * (-rate * expiry).exp();
        prop_assert!((lhs - rhs).abs() < 1e-8 * spot.max(strike));
    }

    #[test]
    fn prop_call_increases_with_spot(
        spot in 50.0..150.0_f64,
        bump in 0.5..10.0_f64,
        vol in 0.05..0.6_f64,
    ) {
        let low = EuropeanOption::new("X", spot, 100.0, 1.0, 0.03, vol, OptionType::Call).unwrap();
        let high = EuropeanOption::new("X", spot + bump, 100.0, 1.0, 0.03, vol, OptionType::Call).unwrap();
        prop_assert!(high.price().unwrap() >= low.price().unwrap());
    }
}

//! Up-and-in barrier call kernel.
//!
//! Paths follow the exact log-Euler GBM step
//!
//! ```text
//! S(t + dt) = S(t) · exp((r − q − σ²/2) dt + σ √dt Z)
//! ```
//!
//! and are monitored discretely after every step. A path knocks in as soon
//! as any post-step price is at or above the barrier; the starting spot is
//! not observed.

use tracing::debug;

use super::config::MonteCarloConfig;
use super::estimate::{run_batched, McEstimate};

/// Market and contract inputs for an up-and-in call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpAndInParams {
    /// Initial spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Knock-in level.
    pub barrier: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Volatility.
    pub volatility: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
}

/// Price an up-and-in call by simulation.
///
/// Inputs are assumed validated by the caller.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{price_up_and_in_call, MonteCarloConfig, UpAndInParams};
///
/// let params = UpAndInParams {
///     spot: 100.0,
///     strike: 100.0,
///     barrier: 120.0,
///     expiry: 1.0,
///     rate: 0.05,
///     volatility: 0.2,
///     dividend_yield: 0.0,
/// };
/// let config = MonteCarloConfig::builder().n_paths(2_000).n_steps(50).build().unwrap();
/// let est = price_up_and_in_call(&params, &config);
/// assert!(est.price > 0.0 && est.price < 10.5);
/// ```
pub fn price_up_and_in_call(params: &UpAndInParams, config: &MonteCarloConfig) -> McEstimate {
    let n_steps = config.n_steps();
    let dt = params.expiry / n_steps as f64;
    let drift = (params.rate - params.dividend_yield - 0.5 * params.volatility.powi(2)) * dt;
    let diffusion = params.volatility * dt.sqrt();
    let discount = (-params.rate * params.expiry).exp();

    debug!(
        n_paths = config.n_paths(),
        n_steps,
        seed = config.seed(),
        barrier = params.barrier,
        "Simulating up-and-in call"
    );

    run_batched(config, discount, |rng, _| {
        let mut s = params.spot;
        let mut knocked_in = false;
        for _ in 0..n_steps {
            s *= (drift + diffusion * rng.gen_normal()).exp();
            knocked_in |= s >= params.barrier;
        }

        if knocked_in {
            (s - params.strike).max(0.0)
        } else {
            0.0
        }
    })
}

//! Correlated terminal-value kernel for basket calls.
//!
//! Each asset is sampled once at expiry:
//!
//! ```text
//! S_i(T) = S_i · exp((r − q − σ_i²/2) T + σ_i √T W_i),   W = L Z
//! ```
//!
//! where `L` is the lower Cholesky factor of the correlation matrix and `Z`
//! is a vector of independent standard normals.

use tracing::debug;

use super::config::MonteCarloConfig;
use super::estimate::{run_batched, McEstimate};

/// Lower triangular Cholesky factor of a correlation matrix, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Factor `correlation = L Lᵀ`.
    ///
    /// Returns `None` when the matrix is not positive definite. The matrix
    /// must be square; shape is checked by the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::mc::CholeskyFactor;
    ///
    /// let corr = vec![vec![1.0, 0.6], vec![0.6, 1.0]];
    /// let l = CholeskyFactor::new(&corr).unwrap();
    /// assert!((l.get(1, 1) - 0.8).abs() < 1e-12);
    ///
    /// let singular = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
    /// assert!(CholeskyFactor::new(&singular).is_none());
    /// ```
    pub fn new(correlation: &[Vec<f64>]) -> Option<Self> {
        let n = correlation.len();
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let sum: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();

                if j == i {
                    let diag = correlation[i][i] - sum;
                    if diag <= 0.0 {
                        return None;
                    }
                    lower[i * n + i] = diag.sqrt();
                } else {
                    lower[i * n + j] = (correlation[i][j] - sum) / lower[j * n + j];
                }
            }
        }

        Some(Self {
            data: lower,
            dim: n,
        })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element `(i, j)`, zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Overwrite `z` with `L z`.
    ///
    /// Rows are processed bottom-up so each row only reads entries not yet
    /// overwritten.
    pub fn correlate_in_place(&self, z: &mut [f64]) {
        let n = self.dim;
        for i in (0..n).rev() {
            let row = &self.data[i * n..i * n + i + 1];
            let value: f64 = row.iter().zip(z.iter()).map(|(l, x)| l * x).sum();
            z[i] = value;
        }
    }
}

/// Market and contract inputs for a basket call.
#[derive(Clone, Copy, Debug)]
pub struct BasketParams<'a> {
    /// Spot of each constituent.
    pub spots: &'a [f64],
    /// Basket weights.
    pub weights: &'a [f64],
    /// Volatility of each constituent.
    pub vols: &'a [f64],
    /// Strike on the weighted basket level.
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuous dividend yield, common to all constituents.
    pub dividend_yield: f64,
}

/// Price a basket call by correlated terminal sampling.
///
/// Inputs are assumed validated by the caller; `factor.dim()` must equal
/// the number of constituents.
pub fn price_basket_call(
    params: &BasketParams<'_>,
    factor: &CholeskyFactor,
    config: &MonteCarloConfig,
) -> McEstimate {
    let t = params.expiry;
    let sqrt_t = t.sqrt();
    let n_assets = params.spots.len();

    let drifts: Vec<f64> = params
        .vols
        .iter()
        .map(|&v| (params.rate - params.dividend_yield - 0.5 * v * v) * t)
        .collect();
    let discount = (-params.rate * t).exp();

    debug!(
        n_paths = config.n_paths(),
        n_assets,
        seed = config.seed(),
        "Simulating basket call"
    );

    run_batched(config, discount, |rng, z| {
        z.resize(n_assets, 0.0);
        rng.fill_normal(z);
        factor.correlate_in_place(z);

        let level: f64 = (0..n_assets)
            .map(|i| {
                let terminal = params.spots[i] * (drifts[i] + params.vols[i] * sqrt_t * z[i]).exp();
                params.weights[i] * terminal
            })
            .sum();

        (level - params.strike).max(0.0)
    })
}

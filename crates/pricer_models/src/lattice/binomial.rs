//! Cox-Ross-Rubinstein binomial tree.
//!
//! With `Δt = T / N`:
//!
//! - `u = e^(σ√Δt)`, `d = 1/u`
//! - `p = (e^((r-q)Δt) - d) / (u - d)`
//! - node `(i, j)` holds `S·u^j·d^(i-j)`, so step `i` has `i + 1` states
//!
//! Values are rolled back from the terminal payoff. With early exercise each
//! node takes `max(continuation, intrinsic)`.

use crate::analytical::AnalyticalError;
use crate::instruments::OptionType;

/// Default number of time steps.
pub const DEFAULT_STEPS: usize = 100;

/// Contract and market inputs for a tree valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// Spot price (S)
    pub spot: f64,
    /// Strike (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Volatility (σ)
    pub volatility: f64,
    /// Continuous dividend yield (q)
    pub dividend_yield: f64,
    /// Call or put payoff
    pub option_type: OptionType,
    /// Allow exercise at every node
    pub american: bool,
}

/// Stock and option value grids of a fully built tree.
///
/// `stock[i][j]` and `option[i][j]` are the values after `i` steps and `j`
/// up-moves; row `i` has length `i + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialLattice {
    /// Underlying price at each node
    pub stock: Vec<Vec<f64>>,
    /// Option value at each node
    pub option: Vec<Vec<f64>>,
}

impl BinomialLattice {
    /// Option value at the root node.
    pub fn root_value(&self) -> f64 {
        self.option[0][0]
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.stock.len() - 1
    }
}

/// Cox-Ross-Rubinstein tree engine.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_models::lattice::{BinomialTree, TreeParams};
///
/// let params = TreeParams {
///     spot: 100.0,
///     strike: 100.0,
///     expiry: 1.0,
///     rate: 0.05,
///     volatility: 0.2,
///     dividend_yield: 0.0,
///     option_type: OptionType::Put,
///     american: true,
/// };
/// let price = BinomialTree::default().price(&params).unwrap();
/// assert!(price > 5.57); // early exercise premium over the European put
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
        }
    }
}

struct Factors {
    log_up: f64,
    p: f64,
    disc: f64,
}

impl Factors {
    /// Stock at node `j` of row `i`, `spot * u^(2j - i)`.
    ///
    /// Each node is computed on its own so an underflowed extreme node
    /// cannot spill into its neighbours.
    fn node(&self, spot: f64, i: usize, j: usize) -> f64 {
        spot * ((2.0 * j as f64 - i as f64) * self.log_up).exp()
    }
}

impl BinomialTree {
    /// Create a tree with `steps` time steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn factors(&self, params: &TreeParams) -> Result<Factors, AnalyticalError> {
        AnalyticalError::check_domain(
            params.spot,
            params.strike,
            params.expiry,
            params.volatility,
        )?;
        if self.steps == 0 {
            return Err(AnalyticalError::NumericalInstability {
                message: "binomial tree needs at least one step".to_string(),
            });
        }

        let dt = params.expiry / self.steps as f64;
        let log_up = params.volatility * dt.sqrt();
        let up = log_up.exp();
        let down = (-log_up).exp();
        let growth = ((params.rate - params.dividend_yield) * dt).exp();
        let p = (growth - down) / (up - down);
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("risk-neutral probability {p} is outside [0, 1]"),
            });
        }

        Ok(Factors {
            log_up,
            p,
            disc: (-params.rate * dt).exp(),
        })
    }

    /// Root value of the tree.
    ///
    /// Rolls back a single row in place, without keeping the lattice.
    ///
    /// # Errors
    /// - Domain errors for non-positive spot, strike, expiry or volatility
    /// - `AnalyticalError::NumericalInstability` if `p` falls outside [0, 1]
    pub fn price(&self, params: &TreeParams) -> Result<f64, AnalyticalError> {
        let f = self.factors(params)?;
        let n = self.steps;

        let mut values: Vec<f64> = (0..=n)
            .map(|j| {
                params
                    .option_type
                    .intrinsic(f.node(params.spot, n, j), params.strike)
            })
            .collect();

        for i in (0..n).rev() {
            for j in 0..=i {
                let cont = f.disc * (f.p * values[j + 1] + (1.0 - f.p) * values[j]);
                values[j] = if params.american {
                    let st = f.node(params.spot, i, j);
                    cont.max(params.option_type.intrinsic(st, params.strike))
                } else {
                    cont
                };
            }
        }

        Ok(values[0])
    }

    /// Build the full stock and option lattices.
    ///
    /// The root of the returned option grid equals [`price`](Self::price).
    pub fn build(&self, params: &TreeParams) -> Result<BinomialLattice, AnalyticalError> {
        let f = self.factors(params)?;
        let n = self.steps;

        let stock: Vec<Vec<f64>> = (0..=n)
            .map(|i| {
                (0..=i).map(|j| f.node(params.spot, i, j)).collect()
            })
            .collect();

        let mut option: Vec<Vec<f64>> = stock
            .iter()
            .map(|row| vec![0.0; row.len()])
            .collect();
        for (j, s) in stock[n].iter().enumerate() {
            option[n][j] = params.option_type.intrinsic(*s, params.strike);
        }
        for i in (0..n).rev() {
            for j in 0..=i {
                let cont = f.disc * (f.p * option[i + 1][j + 1] + (1.0 - f.p) * option[i + 1][j]);
                option[i][j] = if params.american {
                    cont.max(params.option_type.intrinsic(stock[i][j], params.strike))
                } else {
                    cont
                };
            }
        }

        Ok(BinomialLattice { stock, option })
    }
}

//! Price profiles over a range of spot or volatility.
//!
//! A sweep reprices a clone of the contract at each grid point and returns
//! plain arrays, ready for an external plotting tool.

use pricer_core::traits::Priceable;
use pricer_pricing::options::OptionModel;
use tracing::debug;

use crate::error::RiskError;
use crate::hedging::check_asset;

/// Prices of one contract along one risk factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivitySweep {
    /// Factor name, e.g. `spot[AAPL]`
    pub label: String,
    /// Factor values
    pub x: Vec<f64>,
    /// Price at each factor value
    pub prices: Vec<f64>,
}

impl SensitivitySweep {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` for an empty grid.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, price)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.prices.iter().copied())
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// # Examples
///
/// ```
/// use pricer_risk::sensitivity::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Price as a function of one underlying's spot.
///
/// # Errors
/// `RiskError::InvalidAsset` for an out-of-range `asset`, or
/// `RiskError::Pricing` if any grid point fails to price.
pub fn spot_sweep<M: OptionModel + Clone>(
    option: &M,
    asset: usize,
    start: f64,
    end: f64,
    n: usize,
) -> Result<SensitivitySweep, RiskError> {
    check_asset(asset, option.spots().len())?;
    let label = format!("spot[{}]", option.tickers()[asset]);
    sweep(option, label, linspace(start, end, n), |o, x| {
        o.spots_mut()[asset] = x
    })
}

/// Price as a function of one underlying's volatility.
///
/// # Errors
/// As [`spot_sweep`].
pub fn vol_sweep<M: OptionModel + Clone>(
    option: &M,
    asset: usize,
    start: f64,
    end: f64,
    n: usize,
) -> Result<SensitivitySweep, RiskError> {
    check_asset(asset, option.vols().len())?;
    let label = format!("vol[{}]", option.tickers()[asset]);
    sweep(option, label, linspace(start, end, n), |o, x| {
        o.vols_mut()[asset] = x
    })
}

fn sweep<M, F>(option: &M, label: String, x: Vec<f64>, set: F) -> Result<SensitivitySweep, RiskError>
where
    M: OptionModel + Clone,
    F: Fn(&mut M, f64),
{
    let mut work = option.clone();
    let prices = x
        .iter()
        .map(|&value| {
            set(&mut work, value);
            work.price().map_err(RiskError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(%label, points = x.len(), "Sensitivity sweep complete");
    Ok(SensitivitySweep { label, x, prices })
}

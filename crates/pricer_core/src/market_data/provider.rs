//! Market data provider interface and an in-memory implementation.
//!
//! Pricing code resolves spots, volatilities and correlations through
//! [`MarketDataProvider`]. A lookup that finds nothing is an error: callers
//! never receive a placeholder value.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::error::MarketDataError;

/// Trading days per year used to annualise return statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Source of spot prices and historical statistics by ticker and date.
///
/// # Contract
///
/// - `spot_price` returns the close on exactly `date`
/// - `historical_volatility` is annualised with a `sqrt(252)` factor
/// - `correlation_matrix` is symmetric with a unit diagonal, rows ordered as `tickers`
///
/// Every method fails with [`MarketDataError::MissingData`] when the ticker
/// or date is unknown, and with [`MarketDataError::InsufficientData`] when
/// the history is shorter than `window`.
pub trait MarketDataProvider {
    /// Close price of `ticker` on `date`.
    fn spot_price(&self, ticker: &str, date: NaiveDate) -> Result<f64, MarketDataError>;

    /// Annualised volatility of log returns over the last `window` returns up to `end_date`.
    fn historical_volatility(
        &self,
        ticker: &str,
        window: usize,
        end_date: NaiveDate,
    ) -> Result<f64, MarketDataError>;

    /// Correlation of log returns over the last `window` common returns up to `end_date`.
    fn correlation_matrix(
        &self,
        tickers: &[String],
        window: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Vec<f64>>, MarketDataError>;
}

/// Close-price histories held in memory, keyed by ticker then date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{InMemoryMarketData, MarketDataProvider};
///
/// let mut store = InMemoryMarketData::new();
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let closes = [100.0, 101.0, 100.5, 102.0, 101.2];
/// store.insert_history("XYZ", start, &closes);
///
/// let end = start + chrono::Days::new(4);
/// let vol = store.historical_volatility("XYZ", 4, end).unwrap();
/// assert!(vol > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InMemoryMarketData {
    closes: HashMap<String, BTreeMap<NaiveDate, f64>>,
}

impl InMemoryMarketData {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single close observation, replacing any existing value.
    pub fn insert_close(&mut self, ticker: &str, date: NaiveDate, close: f64) {
        self.closes
            .entry(ticker.to_string())
            .or_default()
            .insert(date, close);
    }

    /// Record consecutive daily closes starting at `start`.
    pub fn insert_history(&mut self, ticker: &str, start: NaiveDate, closes: &[f64]) {
        let series = self.closes.entry(ticker.to_string()).or_default();
        for (date, &close) in start.iter_days().zip(closes) {
            series.insert(date, close);
        }
    }

    /// Tickers with at least one observation.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.closes.keys().map(String::as_str)
    }

    fn series(&self, ticker: &str, date: NaiveDate) -> Result<&BTreeMap<NaiveDate, f64>, MarketDataError> {
        self.closes
            .get(ticker)
            .ok_or_else(|| MarketDataError::missing(ticker, date))
    }

    /// Last `window + 1` closes on or before `end_date`, oldest first.
    fn trailing_closes(
        &self,
        ticker: &str,
        window: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<f64>, MarketDataError> {
        let series = self.series(ticker, end_date)?;
        let mut closes: Vec<f64> = series
            .range(..=end_date)
            .rev()
            .take(window + 1)
            .map(|(_, &close)| close)
            .collect();
        if closes.len() < window + 1 {
            return Err(MarketDataError::InsufficientData {
                got: closes.len(),
                need: window + 1,
            });
        }
        closes.reverse();
        Ok(closes)
    }
}

impl MarketDataProvider for InMemoryMarketData {
    fn spot_price(&self, ticker: &str, date: NaiveDate) -> Result<f64, MarketDataError> {
        self.series(ticker, date)?
            .get(&date)
            .copied()
            .ok_or_else(|| MarketDataError::missing(ticker, date))
    }

    fn historical_volatility(
        &self,
        ticker: &str,
        window: usize,
        end_date: NaiveDate,
    ) -> Result<f64, MarketDataError> {
        if window < 2 {
            return Err(MarketDataError::InsufficientData { got: window, need: 2 });
        }
        let closes = self.trailing_closes(ticker, window, end_date)?;
        let returns = log_returns(&closes);
        Ok(sample_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt())
    }

    fn correlation_matrix(
        &self,
        tickers: &[String],
        window: usize,
        end_date: NaiveDate,
    ) -> Result<Vec<Vec<f64>>, MarketDataError> {
        if window < 2 {
            return Err(MarketDataError::InsufficientData { got: window, need: 2 });
        }
        let series = tickers
            .iter()
            .map(|ticker| self.series(ticker, end_date))
            .collect::<Result<Vec<_>, _>>()?;

        // Dates observed for every ticker, newest first.
        let common: Vec<NaiveDate> = match series.first() {
            Some(first) => first
                .range(..=end_date)
                .rev()
                .map(|(date, _)| *date)
                .filter(|date| series.iter().all(|s| s.contains_key(date)))
                .take(window + 1)
                .collect(),
            None => return Ok(Vec::new()),
        };
        if common.len() < window + 1 {
            return Err(MarketDataError::InsufficientData {
                got: common.len(),
                need: window + 1,
            });
        }

        let returns: Vec<Vec<f64>> = series
            .iter()
            .map(|s| {
                let closes: Vec<f64> = common.iter().rev().map(|date| s[date]).collect();
                log_returns(&closes)
            })
            .collect();

        let n = tickers.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            matrix[i][i] = 1.0;
            for j in 0..i {
                let rho = pearson(&returns[i], &returns[j]);
                matrix[i][j] = rho;
                matrix[j][i] = rho;
            }
        }
        Ok(matrix)
    }
}

/// Check that `matrix` is square of size `n`, symmetric, has a unit diagonal
/// and entries within [-1, 1].
pub fn validate_correlation(matrix: &[Vec<f64>], n: usize) -> Result<(), MarketDataError> {
    const TOL: f64 = 1e-10;
    let invalid = |reason: String| MarketDataError::InvalidCorrelation { reason };

    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(invalid(format!("expected {n}x{n} matrix")));
    }
    for i in 0..n {
        if (matrix[i][i] - 1.0).abs() > TOL {
            return Err(invalid(format!("diagonal entry {i} is {}", matrix[i][i])));
        }
        for j in 0..n {
            let rho = matrix[i][j];
            if !rho.is_finite() || !(-1.0 - TOL..=1.0 + TOL).contains(&rho) {
                return Err(invalid(format!("entry ({i}, {j}) = {rho} outside [-1, 1]")));
            }
            if (rho - matrix[j][i]).abs() > TOL {
                return Err(invalid(format!("entry ({i}, {j}) is not symmetric")));
            }
        }
    }
    Ok(())
}

fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn sample_std(xs: &[f64]) -> f64 {
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let (mx, my) = (mean(xs), mean(ys));
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        cov += (x - mx) * (y - my);
        vx += (x - mx).powi(2);
        vy += (y - my).powi(2);
    }
    if vx == 0.0 || vy == 0.0 {
        return 0.0;
    }
    cov / (vx * vy).sqrt()
}

//! Resolution of option inputs from market data and a discount curve.
//!
//! Every piece is fetched up front. A missing spot, an unknown ticker or a
//! curve that does not reach the expiry fails the whole resolution; nothing
//! is defaulted.

use chrono::NaiveDate;
use pricer_core::market_data::{validate_correlation, MarketDataProvider, YieldCurve};
use pricer_core::types::PricingError;
use tracing::debug;

/// Spots, volatilities, correlation and rate for a set of underlyings.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketInputs {
    /// Close on the valuation date, ordered as the requested tickers.
    pub spots: Vec<f64>,
    /// Annualised historical volatilities.
    pub vols: Vec<f64>,
    /// Correlation of log returns. `[[1.0]]` for a single ticker.
    pub correlation: Vec<Vec<f64>>,
    /// Continuously compounded zero rate to expiry.
    pub rate: f64,
}

impl MarketInputs {
    /// Gather inputs for `tickers` as of `date`.
    ///
    /// `window` is the number of daily log returns used for volatility and
    /// correlation estimates.
    ///
    /// # Errors
    /// - `PricingError::MissingMarketData` when any ticker has no close on `date`
    /// - `PricingError::InvalidInput` for an empty ticker list, short
    ///   history, or a curve that does not cover `expiry`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pricer_core::market_data::{FlatCurve, InMemoryMarketData};
    /// use pricer_pricing::market::MarketInputs;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let mut store = InMemoryMarketData::new();
    /// store.insert_history("XYZ", start, &[100.0, 101.0, 99.5, 100.5, 102.0]);
    ///
    /// let date = start + chrono::Days::new(4);
    /// let tickers = vec!["XYZ".to_string()];
    /// let inputs = MarketInputs::resolve(&store, &FlatCurve::new(0.03), &tickers, date, 1.0, 4).unwrap();
    /// assert_eq!(inputs.spots, vec![102.0]);
    /// assert!((inputs.rate - 0.03).abs() < 1e-12);
    /// ```
    pub fn resolve<P, C>(
        provider: &P,
        curve: &C,
        tickers: &[String],
        date: NaiveDate,
        expiry: f64,
        window: usize,
    ) -> Result<Self, PricingError>
    where
        P: MarketDataProvider + ?Sized,
        C: YieldCurve<f64> + ?Sized,
    {
        let mut inputs = Self::resolve_at_rate(provider, tickers, date, window, 0.0)?;
        inputs.rate = curve.zero_rate(expiry)?;
        debug!(expiry, rate = inputs.rate, "Rate read from curve");
        Ok(inputs)
    }

    /// Like [`resolve`](Self::resolve), with a rate the caller already has.
    ///
    /// No curve is consulted, so the expiry may lie beyond any curve.
    ///
    /// # Errors
    /// As for [`resolve`](Self::resolve), minus curve coverage.
    pub fn resolve_at_rate<P>(
        provider: &P,
        tickers: &[String],
        date: NaiveDate,
        window: usize,
        rate: f64,
    ) -> Result<Self, PricingError>
    where
        P: MarketDataProvider + ?Sized,
    {
        if tickers.is_empty() {
            return Err(PricingError::InvalidInput(
                "at least one ticker is required".to_string(),
            ));
        }

        let spots = tickers
            .iter()
            .map(|t| provider.spot_price(t, date))
            .collect::<Result<Vec<_>, _>>()?;
        let vols = tickers
            .iter()
            .map(|t| provider.historical_volatility(t, window, date))
            .collect::<Result<Vec<_>, _>>()?;

        let correlation = if tickers.len() == 1 {
            vec![vec![1.0]]
        } else {
            let matrix = provider.correlation_matrix(tickers, window, date)?;
            validate_correlation(&matrix, tickers.len())?;
            matrix
        };

        debug!(n_tickers = tickers.len(), %date, "Resolved market inputs");

        Ok(Self {
            spots,
            vols,
            correlation,
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{FlatCurve, InMemoryMarketData, MarketDataError};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn store() -> InMemoryMarketData {
        let mut store = InMemoryMarketData::new();
        store.insert_history("AAA", start(), &[100.0, 102.0, 101.0, 103.0, 104.0, 102.5]);
        store.insert_history("BBB", start(), &[50.0, 50.5, 50.2, 51.0, 51.8, 51.1]);
        store
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn end() -> NaiveDate {
        start() + chrono::Days::new(5)
    }

    // Bounded curve, to exercise the coverage check
    struct ShortCurve;

    impl YieldCurve<f64> for ShortCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if !(0.0..=0.5).contains(&t) {
                return Err(MarketDataError::OutOfBounds {
                    x: t,
                    min: 0.0,
                    max: 0.5,
                });
            }
            Ok((-0.04 * t).exp())
        }
    }

    #[test]
    fn test_resolve_two_tickers() {
        let inputs = MarketInputs::resolve(
            &store(),
            &FlatCurve::new(0.05),
            &tickers(&["AAA", "BBB"]),
            end(),
            1.0,
            5,
        )
        .unwrap();

        assert_eq!(inputs.spots, vec![102.5, 51.1]);
        assert_eq!(inputs.vols.len(), 2);
        assert!(inputs.vols.iter().all(|&v| v > 0.0));
        assert_eq!(inputs.correlation.len(), 2);
        assert_relative_eq!(inputs.correlation[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(inputs.rate, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_ticker_is_hard_failure() {
        let result = MarketInputs::resolve(
            &store(),
            &FlatCurve::new(0.05),
            &tickers(&["AAA", "ZZZ"]),
            end(),
            1.0,
            5,
        );
        assert!(matches!(result, Err(PricingError::MissingMarketData(_))));
    }

    #[test]
    fn test_missing_date_is_hard_failure() {
        let late = end() + chrono::Days::new(30);
        let result = MarketInputs::resolve(
            &store(),
            &FlatCurve::new(0.05),
            &tickers(&["AAA"]),
            late,
            1.0,
            5,
        );
        assert!(matches!(result, Err(PricingError::MissingMarketData(_))));
    }

    #[test]
    fn test_curve_must_cover_expiry() {
        let result =
            MarketInputs::resolve(&store(), &ShortCurve, &tickers(&["AAA"]), end(), 1.0, 5);
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));

        let inside =
            MarketInputs::resolve(&store(), &ShortCurve, &tickers(&["AAA"]), end(), 0.25, 5)
                .unwrap();
        assert_relative_eq!(inside.rate, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_supplied_rate_skips_curve() {
        let names = tickers(&["AAA", "BBB"]);
        let given = MarketInputs::resolve_at_rate(&store(), &names, end(), 5, 0.03).unwrap();
        let from_curve =
            MarketInputs::resolve(&store(), &FlatCurve::new(0.05), &names, end(), 1.0, 5).unwrap();

        assert_eq!(given.rate, 0.03);
        assert_eq!(given.spots, from_curve.spots);
        assert_eq!(given.vols, from_curve.vols);
        assert_eq!(given.correlation, from_curve.correlation);
    }

    #[test]
    fn test_empty_tickers() {
        let result =
            MarketInputs::resolve(&store(), &FlatCurve::new(0.05), &[], end(), 1.0, 5);
        assert!(result.is_err());
    }

    #[test]
    fn test_dyn_provider() {
        let store = store();
        let provider: &dyn MarketDataProvider = &store;
        let inputs = MarketInputs::resolve(
            provider,
            &FlatCurve::new(0.01),
            &tickers(&["BBB"]),
            end(),
            1.0,
            3,
        )
        .unwrap();
        assert_eq!(inputs.correlation, vec![vec![1.0]]);
    }
}

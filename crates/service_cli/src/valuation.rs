//! Turns a [`ValuationConfig`] into a curve and an option book.

use chrono::NaiveDate;
use pricer_core::market_data::{InMemoryMarketData, YieldCurve};
use pricer_models::instruments::{BankBill, Bond, Portfolio};
use pricer_optimiser::bootstrapping::{BootstrapResult, BootstrappedCurve, CurveBootstrapper};
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::options::{
    AmericanPutOption, BasketCallOption, BasketMethod, EuropeanOption, OptionInstrument,
    UpAndInCallOption,
};
use pricer_pricing::MarketInputs;
use tracing::{debug, info};

use crate::config::{BasketMethodSpec, CurveConfig, MarketConfig, OptionSpec, ValuationConfig};
use crate::{CliError, Result};

/// Market state shared by every contract in a run.
#[derive(Debug)]
pub struct ValuationContext {
    bootstrap: BootstrapResult<f64>,
    market: Option<(InMemoryMarketData, usize)>,
    valuation_date: Option<NaiveDate>,
    monte_carlo: MonteCarloConfig,
}

/// Per-contract values that override market lookups.
#[derive(Debug, Default)]
struct Overrides {
    spots: Option<Vec<f64>>,
    vols: Option<Vec<f64>>,
    correlation: Option<Vec<Vec<f64>>>,
    rate: Option<f64>,
}

impl ValuationContext {
    /// Bootstrap the curve and load market histories.
    ///
    /// # Errors
    /// Instrument, bootstrap and Monte Carlo configuration errors.
    pub fn from_config(config: &ValuationConfig) -> Result<Self> {
        let bootstrap = bootstrap_curve(&config.curve)?;
        let market = config.market.as_ref().map(load_market);
        Ok(Self {
            bootstrap,
            market,
            valuation_date: config.general.valuation_date,
            monte_carlo: config.monte_carlo.to_config()?,
        })
    }

    /// The bootstrapped curve plus any skipped coupons.
    pub fn bootstrap(&self) -> &BootstrapResult<f64> {
        &self.bootstrap
    }

    /// The bootstrapped curve.
    pub fn curve(&self) -> &BootstrappedCurve<f64> {
        &self.bootstrap.curve
    }

    /// Build every contract in the book, in order.
    pub fn build_book(&self, specs: &[OptionSpec]) -> Result<Vec<OptionInstrument>> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                self.build_option(spec).map_err(|e| {
                    CliError::Config(format!("option #{} ({}): {}", index, describe(spec), e))
                })
            })
            .collect()
    }

    /// Build one contract, filling in whatever the entry leaves out.
    pub fn build_option(&self, spec: &OptionSpec) -> Result<OptionInstrument> {
        let tickers = spec.tickers();
        let option = match spec {
            OptionSpec::European {
                strike,
                expiry,
                option_type,
                spot,
                vol,
                rate,
                dividend_yield,
                ..
            } => {
                let inputs = self.resolve(&tickers, *expiry, single(*spot, *vol, *rate))?;
                EuropeanOption::new(
                    &tickers[0],
                    inputs.spots[0],
                    *strike,
                    *expiry,
                    inputs.rate,
                    inputs.vols[0],
                    *option_type,
                )?
                .with_dividend_yield(*dividend_yield)
                .into()
            }
            OptionSpec::AmericanPut {
                strike,
                expiry,
                spot,
                vol,
                rate,
                dividend_yield,
                steps,
                ..
            } => {
                let inputs = self.resolve(&tickers, *expiry, single(*spot, *vol, *rate))?;
                let put = AmericanPutOption::new(
                    &tickers[0],
                    inputs.spots[0],
                    *strike,
                    *expiry,
                    inputs.rate,
                    inputs.vols[0],
                )?
                .with_dividend_yield(*dividend_yield);
                match steps {
                    Some(steps) => put.with_steps(*steps).into(),
                    None => put.into(),
                }
            }
            OptionSpec::UpAndInCall {
                strike,
                barrier,
                expiry,
                spot,
                vol,
                rate,
                dividend_yield,
                ..
            } => {
                let inputs = self.resolve(&tickers, *expiry, single(*spot, *vol, *rate))?;
                UpAndInCallOption::new(
                    &tickers[0],
                    inputs.spots[0],
                    *strike,
                    *barrier,
                    *expiry,
                    inputs.rate,
                    inputs.vols[0],
                )?
                .with_dividend_yield(*dividend_yield)
                .with_config(self.monte_carlo.clone())
                .into()
            }
            OptionSpec::BasketCall {
                weights,
                strike,
                expiry,
                spots,
                vols,
                correlation,
                rate,
                dividend_yield,
                method,
                ..
            } => {
                let overrides = Overrides {
                    spots: spots.clone(),
                    vols: vols.clone(),
                    correlation: correlation.clone(),
                    rate: *rate,
                };
                let inputs = self.resolve(&tickers, *expiry, overrides)?;
                let method = match method {
                    BasketMethodSpec::MomentMatching => BasketMethod::MomentMatching,
                    BasketMethodSpec::MonteCarlo => {
                        BasketMethod::MonteCarlo(self.monte_carlo.clone())
                    }
                };
                BasketCallOption::new(
                    tickers.clone(),
                    inputs.spots,
                    weights.clone(),
                    inputs.vols,
                    inputs.correlation,
                    *strike,
                    *expiry,
                    inputs.rate,
                )?
                .with_dividend_yield(*dividend_yield)
                .with_method(method)
                .into()
            }
        };
        debug!(kind = %describe(spec), "Built option");
        Ok(option)
    }

    fn resolve(&self, tickers: &[String], expiry: f64, overrides: Overrides) -> Result<MarketInputs> {
        let needs_market = overrides.spots.is_none()
            || overrides.vols.is_none()
            || (tickers.len() > 1 && overrides.correlation.is_none());

        let mut inputs = if needs_market {
            let ((store, window), date) = self
                .market
                .as_ref()
                .zip(self.valuation_date)
                .ok_or_else(|| {
                    CliError::Config(format!(
                        "{} needs [market] and general.valuation_date for missing spot, vol or correlation",
                        tickers.join("/")
                    ))
                })?;
            match overrides.rate {
                Some(rate) => MarketInputs::resolve_at_rate(store, tickers, date, *window, rate)?,
                None => MarketInputs::resolve(store, self.curve(), tickers, date, expiry, *window)?,
            }
        } else {
            MarketInputs {
                spots: Vec::new(),
                vols: Vec::new(),
                correlation: vec![vec![1.0]],
                rate: match overrides.rate {
                    Some(rate) => rate,
                    None => self.curve().zero_rate(expiry)?,
                },
            }
        };

        if let Some(spots) = overrides.spots {
            inputs.spots = spots;
        }
        if let Some(vols) = overrides.vols {
            inputs.vols = vols;
        }
        if let Some(correlation) = overrides.correlation {
            inputs.correlation = correlation;
        }
        if let Some(rate) = overrides.rate {
            inputs.rate = rate;
        }
        Ok(inputs)
    }
}

fn single(spot: Option<f64>, vol: Option<f64>, rate: Option<f64>) -> Overrides {
    Overrides {
        spots: spot.map(|s| vec![s]),
        vols: vol.map(|v| vec![v]),
        correlation: None,
        rate,
    }
}

/// `kind[TICKER,...]`, used to label contracts in logs and reports.
pub fn describe(spec: &OptionSpec) -> String {
    let kind = match spec {
        OptionSpec::European { .. } => "european",
        OptionSpec::AmericanPut { .. } => "american_put",
        OptionSpec::UpAndInCall { .. } => "up_and_in_call",
        OptionSpec::BasketCall { .. } => "basket_call",
    };
    format!("{}[{}]", kind, spec.tickers().join(","))
}

fn bootstrap_curve(config: &CurveConfig) -> Result<BootstrapResult<f64>> {
    let mut portfolio = Portfolio::new();
    for bill in &config.bills {
        portfolio.add_bank_bill(BankBill::new(bill.face_value, bill.maturity, bill.price)?);
    }
    for bond in &config.bonds {
        portfolio.add_bond(Bond::new(
            bond.face_value,
            bond.maturity,
            bond.coupon_rate,
            bond.frequency,
            bond.price,
        )?);
    }
    portfolio.set_cash_flows();

    let result = CurveBootstrapper::new(config.bootstrap).bootstrap(&portfolio)?;
    info!(
        nodes = result.curve.node_count(),
        skipped = result.skipped.len(),
        max_maturity = result.curve.max_maturity(),
        "Curve bootstrapped"
    );
    Ok(result)
}

fn load_market(config: &MarketConfig) -> (InMemoryMarketData, usize) {
    let mut store = InMemoryMarketData::new();
    for series in &config.series {
        store.insert_history(&series.ticker, series.start, &series.closes);
    }
    debug!(series = config.series.len(), window = config.window, "Market histories loaded");
    (store, config.window)
}

//! Price command implementation
//!
//! Prices every contract in the book and, when asked, attaches Greeks.

use std::fmt::Write as _;

use pricer_core::traits::Priceable;
use pricer_pricing::options::{OptionInstrument, OptionKind, OptionModel};
use pricer_risk::hedging::{GreeksMethod, HedgingCalculator, OptionGreeks};
use serde::Serialize;
use tracing::{info, warn};

use super::{join_values, to_json, OutputFormat};
use crate::config::ValuationConfig;
use crate::valuation::{describe, ValuationContext};
use crate::Result;

/// Greeks request resolved from the command line and the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreeksRequest {
    /// Method to try first
    pub method: GreeksMethod,
    /// Run the bump-and-reprice legs on the rayon pool
    pub parallel: bool,
}

/// One priced contract.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRow {
    /// Position in the book
    pub index: usize,
    /// `kind[TICKER,...]`
    pub label: String,
    /// Contract family
    pub kind: OptionKind,
    /// Present value
    pub price: f64,
    /// Method that produced the Greeks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<GreeksMethod>,
    /// Greeks, if requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeks: Option<OptionGreeks>,
}

/// Price the book.
///
/// Contracts without closed-form Greeks fall back to finite differences
/// when the analytical method is requested.
pub fn build(
    ctx: &ValuationContext,
    config: &ValuationConfig,
    greeks: Option<GreeksRequest>,
) -> Result<Vec<PriceRow>> {
    let book = ctx.build_book(&config.options)?;
    let calculator = HedgingCalculator::new(config.greeks.bumps)?;

    book.into_iter()
        .zip(&config.options)
        .enumerate()
        .map(|(index, (mut option, spec))| -> Result<PriceRow> {
            let label = describe(spec);
            let price = option.price()?;
            let (method, greeks) = match greeks {
                Some(request) => {
                    let (method, greeks) = compute_greeks(&calculator, &mut option, request)?;
                    (Some(method), Some(greeks))
                }
                None => (None, None),
            };
            info!(%label, price, "Priced");
            Ok(PriceRow {
                index,
                label,
                kind: option.kind(),
                price,
                method,
                greeks,
            })
        })
        .collect()
}

fn compute_greeks(
    calculator: &HedgingCalculator,
    option: &mut OptionInstrument,
    request: GreeksRequest,
) -> Result<(GreeksMethod, OptionGreeks)> {
    let method = match request.method {
        GreeksMethod::Analytical if option.kind() != OptionKind::European => {
            warn!(
                kind = %option.kind(),
                "No closed-form Greeks, using finite differences"
            );
            GreeksMethod::FiniteDifference
        }
        method => method,
    };

    let greeks = if method == GreeksMethod::FiniteDifference && request.parallel {
        calculator.par_all_greeks(&*option)?
    } else {
        calculator.get_all_greeks(option, method)?
    };
    Ok((method, greeks))
}

/// Render priced rows.
pub fn render(rows: &[PriceRow], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(rows);
    }

    let mut out = String::new();
    let with_greeks = rows.iter().any(|r| r.greeks.is_some());
    let _ = write!(out, "{:>3} {:<28} {:>12}", "#", "Contract", "Price");
    if with_greeks {
        let _ = write!(
            out,
            " {:>18} {:>18} {:>18} {:>10} {:>10}",
            "Delta", "Gamma", "Vega", "Theta", "Rho"
        );
    }
    out.push('\n');

    for row in rows {
        let _ = write!(out, "{:>3} {:<28} {:>12.6}", row.index, row.label, row.price);
        if let Some(g) = &row.greeks {
            let _ = write!(
                out,
                " {:>18} {:>18} {:>18} {:>10.4} {:>10.4}",
                join_values(g.delta.values(), 4),
                join_values(g.gamma.values(), 5),
                join_values(g.vega.values(), 4),
                g.theta,
                g.rho
            );
        }
        out.push('\n');
    }
    Ok(out)
}

/// Run the price command
pub fn run(
    ctx: &ValuationContext,
    config: &ValuationConfig,
    greeks: Option<GreeksRequest>,
    format: OutputFormat,
) -> Result<()> {
    let rows = build(ctx, config, greeks)?;
    info!(contracts = rows.len(), "Pricing complete");
    print!("{}", render(&rows, format)?);
    Ok(())
}

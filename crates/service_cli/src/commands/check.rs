//! Check command implementation
//!
//! Validates a configuration end to end without pricing: the curve must
//! bootstrap, the bumps must be usable and every contract must build.

use pricer_risk::hedging::HedgingCalculator;
use tracing::info;

use crate::config::ValuationConfig;
use crate::valuation::ValuationContext;
use crate::Result;

/// Summary of a valid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSummary {
    /// Curve nodes including the seed
    pub nodes: usize,
    /// Coupons skipped while stripping
    pub skipped: usize,
    /// Contracts in the book
    pub options: usize,
}

/// Validate everything a `price` run would touch.
pub fn build(config: &ValuationConfig) -> Result<CheckSummary> {
    let ctx = ValuationContext::from_config(config)?;
    HedgingCalculator::new(config.greeks.bumps)?;
    let book = ctx.build_book(&config.options)?;
    Ok(CheckSummary {
        nodes: ctx.curve().node_count(),
        skipped: ctx.bootstrap().skipped.len(),
        options: book.len(),
    })
}

/// Run the check command
pub fn run(config: &ValuationConfig) -> Result<()> {
    let summary = build(config)?;
    info!(
        nodes = summary.nodes,
        skipped = summary.skipped,
        options = summary.options,
        "Configuration OK"
    );
    println!(
        "OK: {} curve nodes, {} skipped coupons, {} options",
        summary.nodes, summary.skipped, summary.options
    );
    Ok(())
}

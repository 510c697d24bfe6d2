//! Sweep command implementation

use std::fmt::Write as _;

use clap::ValueEnum;
use pricer_risk::sensitivity::{spot_sweep, vol_sweep, SensitivitySweep};
use tracing::info;

use super::{to_json, OutputFormat};
use crate::config::ValuationConfig;
use crate::valuation::ValuationContext;
use crate::{CliError, Result};

/// Risk factor to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepFactor {
    /// Underlying spot
    Spot,
    /// Underlying volatility
    Vol,
}

/// Grid for one sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRequest {
    /// Position of the contract in the book
    pub option: usize,
    /// Factor to move
    pub factor: SweepFactor,
    /// Underlying index within the contract
    pub asset: usize,
    /// First grid value
    pub from: f64,
    /// Last grid value
    pub to: f64,
    /// Number of grid points
    pub points: usize,
}

/// Reprice one contract along the requested grid.
pub fn build(
    ctx: &ValuationContext,
    config: &ValuationConfig,
    request: SweepRequest,
) -> Result<SensitivitySweep> {
    let spec = config.options.get(request.option).ok_or_else(|| {
        CliError::Config(format!(
            "option #{} not in book of {}",
            request.option,
            config.options.len()
        ))
    })?;
    let option = ctx.build_option(spec)?;

    let sweep = match request.factor {
        SweepFactor::Spot => spot_sweep(
            &option,
            request.asset,
            request.from,
            request.to,
            request.points,
        )?,
        SweepFactor::Vol => vol_sweep(
            &option,
            request.asset,
            request.from,
            request.to,
            request.points,
        )?,
    };
    Ok(sweep)
}

/// Render a sweep as two columns.
pub fn render(sweep: &SensitivitySweep, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(sweep);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>14} {:>14}", sweep.label, "Price");
    for (x, price) in sweep.points() {
        let _ = writeln!(out, "{:>14.6} {:>14.6}", x, price);
    }
    Ok(out)
}

/// Run the sweep command
pub fn run(
    ctx: &ValuationContext,
    config: &ValuationConfig,
    request: SweepRequest,
    format: OutputFormat,
) -> Result<()> {
    let sweep = build(ctx, config, request)?;
    info!(label = %sweep.label, points = sweep.len(), "Sweep complete");
    print!("{}", render(&sweep, format)?);
    Ok(())
}

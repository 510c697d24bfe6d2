//! Curve command implementation
//!
//! Prints the bootstrapped nodes, any coupons skipped while stripping and,
//! optionally, interpolated points on an even grid.

use std::fmt::Write as _;

use pricer_core::market_data::YieldCurve;
use pricer_optimiser::bootstrapping::{BootstrapInterpolation, SkippedCashFlow};
use pricer_risk::linspace;
use serde::Serialize;
use tracing::info;

use super::{to_json, OutputFormat};
use crate::valuation::ValuationContext;
use crate::Result;

/// One point on the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Years
    pub maturity: f64,
    /// Discount factor
    pub discount_factor: f64,
    /// Continuously compounded zero rate; absent at t = 0
    pub zero_rate: Option<f64>,
}

/// Bootstrapped curve report.
#[derive(Debug, Clone, Serialize)]
pub struct CurveReport {
    /// Interpolation between nodes
    pub interpolation: BootstrapInterpolation,
    /// Nodes, starting with the (0, 1) seed
    pub nodes: Vec<CurvePoint>,
    /// Interpolated points, empty unless a grid was requested
    pub grid: Vec<CurvePoint>,
    /// Coupons left out of bond present values
    pub skipped: Vec<SkippedCashFlow<f64>>,
}

/// Build the report. `grid` points are spaced evenly over `(0, max maturity]`.
pub fn build(ctx: &ValuationContext, grid: Option<usize>) -> Result<CurveReport> {
    let curve = ctx.curve();
    let nodes = curve
        .maturities()
        .iter()
        .zip(curve.discount_factors())
        .map(|(&maturity, &discount_factor)| -> Result<CurvePoint> {
            Ok(CurvePoint {
                maturity,
                discount_factor,
                zero_rate: if maturity > 0.0 {
                    Some(curve.zero_rate(maturity)?)
                } else {
                    None
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let grid = match grid {
        Some(n) if n > 0 => {
            let end = curve.max_maturity();
            linspace(end / n as f64, end, n)
                .into_iter()
                .map(|t| -> Result<CurvePoint> {
                    Ok(CurvePoint {
                        maturity: t,
                        discount_factor: curve.discount_factor(t)?,
                        zero_rate: Some(curve.zero_rate(t)?),
                    })
                })
                .collect::<Result<Vec<_>>>()?
        }
        _ => Vec::new(),
    };

    Ok(CurveReport {
        interpolation: curve.interpolation(),
        nodes,
        grid,
        skipped: ctx.bootstrap().skipped.clone(),
    })
}

/// Render the report.
pub fn render(report: &CurveReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(report);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Interpolation: {:?}", report.interpolation);
    write_points(&mut out, "Nodes", &report.nodes);
    if !report.grid.is_empty() {
        write_points(&mut out, "Grid", &report.grid);
    }
    if !report.skipped.is_empty() {
        let _ = writeln!(out, "\nSkipped coupons");
        let _ = writeln!(out, "{:>10} {:>10} {:>12}", "Bond", "Time", "Amount");
        for cf in &report.skipped {
            let _ = writeln!(
                out,
                "{:>10.4} {:>10.4} {:>12.6}",
                cf.bond_maturity, cf.time, cf.amount
            );
        }
    }
    Ok(out)
}

fn write_points(out: &mut String, title: &str, points: &[CurvePoint]) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{:>10} {:>12} {:>12}", "Maturity", "DF", "Zero");
    for p in points {
        let zero = p
            .zero_rate
            .map(|z| format!("{:.4}%", z * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>10.4} {:>12.8} {:>12}",
            p.maturity, p.discount_factor, zero
        );
    }
}

/// Run the curve command
pub fn run(ctx: &ValuationContext, grid: Option<usize>, format: OutputFormat) -> Result<()> {
    let report = build(ctx, grid)?;
    info!(nodes = report.nodes.len(), "Curve report ready");
    print!("{}", render(&report, format)?);
    Ok(())
}

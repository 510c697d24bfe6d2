//! CLI command implementations
//!
//! Each submodule builds a report from a [`ValuationContext`](crate::valuation::ValuationContext)
//! and renders it as a table or as JSON.

pub mod check;
pub mod curve;
pub mod price;
pub mod sweep;

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Pretty JSON for any report.
pub(crate) fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Comma-joined per-asset values, or the single value.
pub(crate) fn join_values(values: &[f64], precision: usize) -> String {
    values
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect::<Vec<_>>()
        .join(",")
}

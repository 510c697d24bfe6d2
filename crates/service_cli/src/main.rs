//! Neutryx valuation CLI
//!
//! Bootstraps a discount curve from bills and bonds, then prices an option
//! book off it and reports Greeks.
//!
//! # Commands
//!
//! - `neutryx-val curve` - Print bootstrapped nodes, skipped coupons and an optional grid
//! - `neutryx-val price [--greeks]` - Price the book, optionally with Greeks
//! - `neutryx-val sweep --option <n>` - Reprice one contract over a spot or vol range
//! - `neutryx-val check` - Validate the configuration without pricing
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate only wires configuration
//! into the pricer crates and renders their results.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricer_risk::hedging::GreeksMethod;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod valuation;

pub use error::{CliError, Result};

use commands::price::GreeksRequest;
use commands::sweep::{SweepFactor, SweepRequest};
use commands::OutputFormat;
use config::ValuationConfig;
use valuation::ValuationContext;

/// Neutryx curve bootstrapping and option valuation
#[derive(Parser)]
#[command(name = "neutryx-val")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Valuation configuration file
    #[arg(short, long, global = true, default_value = "valuation.toml")]
    config: PathBuf,

    /// Log level when RUST_LOG is unset (overrides the configuration file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap the discount curve and print its nodes
    Curve {
        /// Also print this many evenly spaced interpolated points
        #[arg(short, long)]
        grid: Option<usize>,
    },

    /// Price the option book
    Price {
        /// Report Greeks (also enabled by `greeks.enabled` in the configuration)
        #[arg(long)]
        greeks: bool,

        /// Greeks method: finite_difference or analytical
        #[arg(short, long)]
        method: Option<GreeksMethod>,

        /// Compute finite-difference Greeks on the rayon pool
        #[arg(long)]
        parallel: bool,
    },

    /// Reprice one contract over a range of spot or volatility
    Sweep {
        /// Position of the contract in the book
        #[arg(short, long)]
        option: usize,

        /// Risk factor to move
        #[arg(long, value_enum, default_value_t = SweepFactor::Spot)]
        factor: SweepFactor,

        /// Underlying index within the contract
        #[arg(long, default_value_t = 0)]
        asset: usize,

        /// First grid value
        #[arg(long)]
        from: f64,

        /// Last grid value
        #[arg(long)]
        to: f64,

        /// Number of grid points
        #[arg(short, long, default_value_t = 11)]
        points: usize,
    },

    /// Check the configuration without pricing
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ValuationConfig::from_file(&cli.config)?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.general.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!(config = %cli.config.display(), "Loaded configuration");

    let context = || -> Result<ValuationContext> {
        let ctx = ValuationContext::from_config(&config)?;
        debug!(nodes = ctx.curve().node_count(), "Valuation context ready");
        Ok(ctx)
    };

    match cli.command {
        Commands::Curve { grid } => commands::curve::run(&context()?, grid, cli.format),
        Commands::Price {
            greeks,
            method,
            parallel,
        } => {
            let request = if greeks || config.greeks.enabled {
                Some(GreeksRequest {
                    method: method.unwrap_or(config.greeks.method),
                    parallel,
                })
            } else {
                None
            };
            commands::price::run(&context()?, &config, request, cli.format)
        }
        Commands::Sweep {
            option,
            factor,
            asset,
            from,
            to,
            points,
        } => commands::sweep::run(
            &context()?,
            &config,
            SweepRequest {
                option,
                factor,
                asset,
                from,
                to,
                points,
            },
            cli.format,
        ),
        Commands::Check => commands::check::run(&config),
    }
}

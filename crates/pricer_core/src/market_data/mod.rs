//! Market inputs: discount curves and historical closes.
//!
//! # Components
//!
//! - [`curves`]: Yield curve query trait and a flat curve
//! - [`provider`]: Market data provider interface and in-memory store
//! - [`error`]: Market data error types (MarketDataError)
//!
//! Option models never touch a provider directly: inputs are resolved once
//! up front and handed to the contract, so a missing close fails before any
//! pricing starts.

pub mod curves;
pub mod error;
pub mod provider;

pub use curves::{FlatCurve, YieldCurve};
pub use error::MarketDataError;
pub use provider::{validate_correlation, InMemoryMarketData, MarketDataProvider};

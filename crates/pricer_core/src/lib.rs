//! # pricer_core: Foundation for Curve Bootstrapping and Option Risk
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Error types: `PricingError` (`types::error`), `MarketDataError` (`market_data::error`)
//! - The `YieldCurve` query trait implemented by bootstrapped curves (`market_data::curves`)
//! - The `MarketDataProvider` interface and an in-memory store (`market_data::provider`)
//! - The `Priceable` trait shared by every option model (`traits::priceable`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Calendar dates for market data lookups
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pricer_core::market_data::{InMemoryMarketData, MarketDataProvider};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let mut store = InMemoryMarketData::new();
//! store.insert_close("AAPL", date, 180.5);
//!
//! assert_eq!(store.spot_price("AAPL", date).unwrap(), 180.5);
//! assert!(store.spot_price("MSFT", date).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error and market data types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod traits;
pub mod types;

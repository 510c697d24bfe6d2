//! # Pricer Models (L2: Business Logic)
//!
//! Instruments and closed-form or lattice pricing models.
//!
//! This crate provides:
//! - Fixed-income instruments a curve is bootstrapped from (`instruments`)
//! - Black-Scholes-Merton prices and Greeks with dividend yield (`analytical`)
//! - Effective-moment basket approximation (`analytical::basket`)
//! - Cox-Ross-Rubinstein binomial tree with exportable lattices (`lattice`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** where the model is a formula
//! - **Fail fast**: domain checks run before any computation, never returning NaN
//! - **Builder pattern** for optional inputs such as dividend yield

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;

//! Recombining lattice models.
//!
//! - [`BinomialTree`]: Cox-Ross-Rubinstein tree with optional early exercise
//! - [`BinomialLattice`]: full stock and option value grids for inspection

pub mod binomial;

pub use binomial::{BinomialLattice, BinomialTree, TreeParams};

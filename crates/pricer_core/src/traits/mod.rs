//! Traits shared by every pricer crate.
//!
//! Option contracts are gathered in an enum that forwards to each variant,
//! so the traits here are used through static dispatch.

/// Numeric bound for curve and model code.
///
/// ```
/// use pricer_core::traits::Float;
///
/// fn growth<T: Float>(rate: T, years: T) -> T {
///     (rate * years).exp()
/// }
///
/// assert!((growth(0.05_f64, 2.0) - 1.105171).abs() < 1e-6);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::Priceable;

//! Trait for priceable instruments.

use crate::types::PricingError;
use num_traits::Float;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Design Philosophy
///
/// This trait is designed for **static dispatch**. Variants are gathered
/// in an `enum` that forwards `price` to the concrete model:
///
/// ```
/// use pricer_core::traits::priceable::Priceable;
/// use pricer_core::types::PricingError;
///
/// enum Contract {
///     Forward { spot: f64, strike: f64, df: f64 },
///     Digital { payout: f64, df: f64 },
/// }
///
/// impl Priceable<f64> for Contract {
///     fn price(&self) -> Result<f64, PricingError> {
///         match self {
///             Contract::Forward { spot, strike, df } => Ok(spot - strike * df),
///             Contract::Digital { payout, df } if *payout < 0.0 => {
///                 Err(PricingError::non_positive("payout", *payout))
///             }
///             Contract::Digital { payout, df } => Ok(payout * df),
///         }
///     }
/// }
///
/// let fwd = Contract::Forward { spot: 100.0, strike: 100.0, df: 0.95 };
/// assert!((fwd.price().unwrap() - 5.0).abs() < 1e-12);
/// ```
///
/// # Usage in Layer 3
///
/// Implemented by every option model in `pricer_pricing` and by the
/// `OptionInstrument` enum that dispatches over them.
pub trait Priceable<T: Float> {
    /// Calculate the present value of the instrument.
    ///
    /// # Errors
    /// Returns `PricingError::InvalidInput` when the instrument's current
    /// parameters are outside the model's domain. Implementations validate
    /// before computing so that no NaN is returned silently.
    ///
    /// # Invariants
    /// - The method must be pure (no side effects, deterministic)
    fn price(&self) -> Result<T, PricingError>;
}

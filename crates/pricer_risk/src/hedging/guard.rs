//! Scoped perturbation of an option's risk factors.

use std::ops::{Deref, DerefMut};

use pricer_pricing::options::OptionModel;

/// Snapshot of spots, volatilities, expiry and rate, written back on drop.
///
/// Bumps are applied through the guard (it dereferences to the option).
/// Whatever happens while the guard is alive, including an early `?`
/// return or a panic inside `price()`, the option leaves the scope with
/// bit-identical factors.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::options::{EuropeanOption, OptionModel};
/// use pricer_risk::hedging::ScopedBump;
///
/// let mut call = EuropeanOption::new("SPX", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// {
///     let mut bumped = ScopedBump::new(&mut call);
///     bumped.spots_mut()[0] = 101.0;
///     bumped.set_rate(0.06);
/// }
/// assert_eq!(call.spots(), &[100.0]);
/// assert_eq!(call.rate(), 0.05);
/// ```
pub struct ScopedBump<'a, M: OptionModel + ?Sized> {
    option: &'a mut M,
    spots: Vec<f64>,
    vols: Vec<f64>,
    expiry: f64,
    rate: f64,
}

impl<'a, M: OptionModel + ?Sized> ScopedBump<'a, M> {
    /// Snapshot the option's current factors.
    pub fn new(option: &'a mut M) -> Self {
        let spots = option.spots().to_vec();
        let vols = option.vols().to_vec();
        let expiry = option.expiry();
        let rate = option.rate();
        Self {
            option,
            spots,
            vols,
            expiry,
            rate,
        }
    }

    /// Write the snapshot back without ending the scope.
    pub fn restore(&mut self) {
        self.option.spots_mut().copy_from_slice(&self.spots);
        self.option.vols_mut().copy_from_slice(&self.vols);
        self.option.set_expiry(self.expiry);
        self.option.set_rate(self.rate);
    }
}

impl<M: OptionModel + ?Sized> Deref for ScopedBump<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.option
    }
}

impl<M: OptionModel + ?Sized> DerefMut for ScopedBump<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.option
    }
}

impl<M: OptionModel + ?Sized> Drop for ScopedBump<'_, M> {
    fn drop(&mut self) {
        self.restore();
    }
}

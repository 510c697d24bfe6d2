//! Finite-difference and closed-form Greeks for option contracts.
//!
//! # Conventions
//!
//! | Greek | Scheme | Bump | Scale |
//! |-------|--------|------|-------|
//! | delta | central | 1% of spot | per unit spot |
//! | gamma | central second difference | 1% of spot | per unit spot² |
//! | vega | central | 1% of vol | per vol point |
//! | theta | forward, `(V(T) − V(T + dt)) / dt` | one trading day | per year |
//! | rho | central | 1bp | per rate point |
//!
//! Basket contracts report delta, gamma and vega per underlying.
//!
//! Every bump runs inside a [`ScopedBump`], which restores the option's
//! factors when it goes out of scope.

mod calculator;
mod config;
mod guard;
mod parallel;

pub use calculator::{HedgingCalculator, OptionGreeks, Sensitivity};
pub(crate) use calculator::check_asset;
pub use config::{BumpConfig, GreeksMethod, RHO_SCALE, VEGA_SCALE};
pub use guard::ScopedBump;
pub use parallel::par_all_greeks;

//! Bump sizes and Greeks method selection.

use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Vega is reported per one volatility point.
pub const VEGA_SCALE: f64 = 0.01;

/// Rho is reported per one percentage point of rate.
pub const RHO_SCALE: f64 = 0.01;

/// Finite-difference bump sizes.
///
/// Spot and volatility bumps are relative to the current level; the rate
/// bump is absolute; theta steps forward by `theta_dt` years.
///
/// # Examples
///
/// ```
/// use pricer_risk::hedging::BumpConfig;
///
/// let config = BumpConfig::default();
/// assert_eq!(config.spot_bump, 0.01);
/// assert_eq!(config.rate_bump, 1e-4);
///
/// let wide = BumpConfig::default().with_spot_bump(0.05);
/// assert!(wide.validate().is_ok());
/// assert!(BumpConfig::default().with_vol_bump(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BumpConfig {
    /// Relative spot bump (1% by default).
    pub spot_bump: f64,
    /// Relative volatility bump (1% by default).
    pub vol_bump: f64,
    /// Absolute rate bump (1bp by default).
    pub rate_bump: f64,
    /// Forward time step for theta, in years (one trading day by default).
    pub theta_dt: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            spot_bump: 0.01,
            vol_bump: 0.01,
            rate_bump: 1e-4,
            theta_dt: 1.0 / 252.0,
        }
    }
}

impl BumpConfig {
    /// Set the relative spot bump.
    pub fn with_spot_bump(mut self, bump: f64) -> Self {
        self.spot_bump = bump;
        self
    }

    /// Set the relative volatility bump.
    pub fn with_vol_bump(mut self, bump: f64) -> Self {
        self.vol_bump = bump;
        self
    }

    /// Set the absolute rate bump.
    pub fn with_rate_bump(mut self, bump: f64) -> Self {
        self.rate_bump = bump;
        self
    }

    /// Set the theta time step.
    pub fn with_theta_dt(mut self, dt: f64) -> Self {
        self.theta_dt = dt;
        self
    }

    /// Every bump must be positive and finite.
    pub fn validate(&self) -> Result<(), RiskError> {
        for (name, value) in [
            ("spot_bump", self.spot_bump),
            ("vol_bump", self.vol_bump),
            ("rate_bump", self.rate_bump),
            ("theta_dt", self.theta_dt),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(RiskError::InvalidBump { name, value });
            }
        }
        Ok(())
    }
}

/// How Greeks are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GreeksMethod {
    /// Bump, reprice and restore. Works for every contract.
    #[default]
    FiniteDifference,
    /// Closed-form Black-Scholes Greeks. European options only.
    Analytical,
}

impl fmt::Display for GreeksMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreeksMethod::FiniteDifference => write!(f, "finite_difference"),
            GreeksMethod::Analytical => write!(f, "analytical"),
        }
    }
}

impl FromStr for GreeksMethod {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fd" | "finite_difference" | "finite-difference" | "bump" => {
                Ok(GreeksMethod::FiniteDifference)
            }
            "analytical" | "analytic" | "closed_form" | "closed-form" => {
                Ok(GreeksMethod::Analytical)
            }
            other => Err(RiskError::UnsupportedMethod(other.to_string())),
        }
    }
}

//! Black-Scholes-Merton prices and Greeks for European options.
//!
//! Lognormal spot with continuous dividend yield `q`:
//!
//! ```text
//! d1 = (ln(S/K) + (r - q + σ²/2) T) / (σ √T)      d2 = d1 - σ √T
//! C  = S e^{-qT} N(d1) - K e^{-rT} N(d2)
//! P  = K e^{-rT} N(-d2) - S e^{-qT} N(-d1)
//! ```
//!
//! At or below `T = 1e-10` every quantity collapses to its expiry value:
//! intrinsic price, a step delta and zero for the other Greeks.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Closed-form sensitivities of a European option.
///
/// Unscaled: vega and rho per unit of volatility and rate, theta per year
/// of calendar time (usually negative).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂t
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

/// Black-Scholes-Merton model for one underlying.
///
/// The model holds the market state (spot, rate, volatility, dividend
/// yield); strike, expiry and call/put are per-query arguments.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
/// assert!((call - 10.4506).abs() < 1e-3);
/// assert!((call - put - (100.0 - 100.0 * (-0.05_f64).exp())).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
    dividend_yield: T,
}

/// Everything a price or Greek needs for one `(K, T)` query.
struct Terms<T> {
    d1: T,
    d2: T,
    sqrt_t: T,
    /// e^{-rT}
    discount: T,
    /// e^{-qT}
    carry: T,
}

impl<T: Float> BlackScholes<T> {
    /// Model with zero dividend yield.
    ///
    /// # Errors
    /// `InvalidSpot` or `InvalidVolatility` unless the value is strictly
    /// positive (NaN included).
    ///
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(0.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, -0.2).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
            dividend_yield: T::zero(),
        })
    }

    /// Set the continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Spot.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Continuously compounded rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    #[inline]
    fn expired(expiry: T) -> bool {
        expiry <= T::from(1e-10).unwrap()
    }

    /// -1, 0 or +1 as the spot is below, at or above `strike`.
    fn moneyness_sign(&self, strike: T) -> T {
        if self.spot > strike {
            T::one()
        } else if self.spot < strike {
            -T::one()
        } else {
            T::zero()
        }
    }

    fn terms(&self, strike: T, expiry: T) -> Terms<T> {
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;
        let variance_drift = T::from(0.5).unwrap() * self.volatility * self.volatility;
        let d1 = ((self.spot / strike).ln()
            + (self.rate - self.dividend_yield + variance_drift) * expiry)
            / vol_sqrt_t;
        Terms {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount: (-self.rate * expiry).exp(),
            carry: (-self.dividend_yield * expiry).exp(),
        }
    }

    /// `d1`; ±100 (or 0 at the money) once expired.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return self.moneyness_sign(strike) * T::from(100.0).unwrap();
        }
        self.terms(strike, expiry).d1
    }

    /// `d2 = d1 - σ√T`; equal to `d1` once expired.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return self.d1(strike, expiry);
        }
        self.terms(strike, expiry).d2
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, true)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(strike, expiry, false)
    }

    /// Call (`is_call`) or put price.
    pub fn price(&self, strike: T, expiry: T, is_call: bool) -> T {
        if Self::expired(expiry) {
            let payoff = if is_call {
                self.spot - strike
            } else {
                strike - self.spot
            };
            return payoff.max(T::zero());
        }

        let x = self.terms(strike, expiry);
        let spot_leg = self.spot * x.carry;
        let strike_leg = strike * x.discount;
        if is_call {
            spot_leg * norm_cdf(x.d1) - strike_leg * norm_cdf(x.d2)
        } else {
            strike_leg * norm_cdf(-x.d2) - spot_leg * norm_cdf(-x.d1)
        }
    }

    /// `e^{-qT} N(d1)` for a call, `e^{-qT} (N(d1) - 1)` for a put.
    pub fn delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        if Self::expired(expiry) {
            let sign = self.moneyness_sign(strike);
            return match (is_call, sign > T::zero(), sign < T::zero()) {
                (true, true, _) => T::one(),
                (false, _, true) => -T::one(),
                _ => T::zero(),
            };
        }
        let x = self.terms(strike, expiry);
        let n_d1 = norm_cdf(x.d1);
        x.carry * if is_call { n_d1 } else { n_d1 - T::one() }
    }

    /// `e^{-qT} φ(d1) / (S σ √T)`, shared by calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let x = self.terms(strike, expiry);
        x.carry * norm_pdf(x.d1) / (self.spot * self.volatility * x.sqrt_t)
    }

    /// `S e^{-qT} √T φ(d1)`, shared by calls and puts.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let x = self.terms(strike, expiry);
        self.spot * x.carry * x.sqrt_t * norm_pdf(x.d1)
    }

    /// Calendar-time decay ∂V/∂t, including the carry terms in `r` and `q`.
    pub fn theta(&self, strike: T, expiry: T, is_call: bool) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let x = self.terms(strike, expiry);
        let spot_leg = self.spot * x.carry;
        let strike_leg = strike * x.discount;
        let two = T::from(2.0).unwrap();
        let diffusion = -spot_leg * self.volatility * norm_pdf(x.d1) / (two * x.sqrt_t);

        if is_call {
            diffusion - self.rate * strike_leg * norm_cdf(x.d2)
                + self.dividend_yield * spot_leg * norm_cdf(x.d1)
        } else {
            diffusion + self.rate * strike_leg * norm_cdf(-x.d2)
                - self.dividend_yield * spot_leg * norm_cdf(-x.d1)
        }
    }

    /// `±K T e^{-rT} N(±d2)`.
    pub fn rho(&self, strike: T, expiry: T, is_call: bool) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let x = self.terms(strike, expiry);
        let strike_leg = strike * expiry * x.discount;
        if is_call {
            strike_leg * norm_cdf(x.d2)
        } else {
            -strike_leg * norm_cdf(-x.d2)
        }
    }

    /// All five Greeks.
    pub fn greeks(&self, strike: T, expiry: T, is_call: bool) -> Greeks<T> {
        Greeks {
            delta: self.delta(strike, expiry, is_call),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(strike, expiry, is_call),
            rho: self.rho(strike, expiry, is_call),
        }
    }
}

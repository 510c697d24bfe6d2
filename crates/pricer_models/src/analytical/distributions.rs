//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: density φ
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients (a1..a5) and the `p` constant.
const AS_COEFFS: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];
const AS_P: f64 = 0.327_591_1;

/// Complementary error function, Abramowitz and Stegun 7.1.26.
///
/// Absolute error below 1.5e-7. Negative arguments use
/// `erfc(-x) = 2 - erfc(x)`.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let ax = x.abs();
    let t = T::one() / (T::one() + T::from(AS_P).unwrap() * ax);
    let poly = AS_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| (acc + T::from(a).unwrap()) * t);
    let tail = poly * (-ax * ax).exp();
    if x < T::zero() {
        T::from(2.0).unwrap() - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2, accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96_f64) - 0.975).abs() < 1e-4);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    half * erfc(-x / T::from(std::f64::consts::SQRT_2).unwrap())
}

/// Standard normal probability density function.
///
/// φ(x) = exp(-x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    T::from(FRAC_1_SQRT_2PI).unwrap() * (-half * x * x).exp()
}

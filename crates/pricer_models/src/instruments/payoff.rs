//! Option type definitions.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// let put: OptionType = "PUT".parse().unwrap();
/// assert_eq!(put, OptionType::Put);
/// assert_eq!(put.intrinsic(90.0_f64, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: max(S - K, 0)
    #[default]
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionType {
    /// True for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Exercise value at spot `spot` against strike `strike`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => (spot - strike).max(T::zero()),
            OptionType::Put => (strike - spot).max(T::zero()),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    /// Parses option type from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(format!("Unknown option type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" put ".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err, "Unknown option type: straddle");
    }

    #[test]
    fn test_display_round_trip() {
        for ty in [OptionType::Call, OptionType::Put] {
            assert_eq!(ty.to_string().parse::<OptionType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0_f64, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(110.0_f64, 100.0), 0.0);
    }
}

//! Knobs for the bill and bond stripper.

/// How the finished curve fills the gaps between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BootstrapInterpolation {
    /// Straight lines in `ln D(t)`: a flat forward rate per segment.
    #[default]
    LogLinear,

    /// Straight lines in the zero rate. The segment starting at the t = 0 seed uses the zero rate of the
    /// first positive node.
    LinearZeroRate,
}

/// What to do with a bond's interior coupon that falls beyond the last
/// node already on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissingNodePolicy {
    /// Drop the coupon from the present value and record it in
    /// [`BootstrapResult::skipped`](super::BootstrapResult::skipped).
    #[default]
    Skip,

    /// Abort with [`BootstrapError::MissingNode`](super::BootstrapError::MissingNode).
    Fail,
}

/// Bootstrapper settings. The defaults sort instruments, skip unpriceable
/// coupons and reject negative rates.
///
/// ```
/// use pricer_optimiser::bootstrapping::{BootstrapConfig, MissingNodePolicy};
///
/// let config = BootstrapConfig::default();
/// assert!(config.sort_by_maturity);
/// assert!(!config.allow_negative_rates);
///
/// let strict = BootstrapConfig::default().with_missing_node_policy(MissingNodePolicy::Fail);
/// assert_eq!(strict.on_missing_node, MissingNodePolicy::Fail);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BootstrapConfig {
    /// Interpolation of the returned curve.
    pub interpolation: BootstrapInterpolation,

    /// Handling of interior coupons beyond the curve built so far.
    pub on_missing_node: MissingNodePolicy,

    /// Sort bills and bonds by maturity first. Without sorting, every
    /// instrument must mature strictly after the one before it.
    pub sort_by_maturity: bool,

    /// Accept discount factors above 1.
    pub allow_negative_rates: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            interpolation: BootstrapInterpolation::LogLinear,
            on_missing_node: MissingNodePolicy::Skip,
            sort_by_maturity: true,
            allow_negative_rates: false,
        }
    }
}

impl BootstrapConfig {
    /// Same as [`Default::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the interpolation.
    pub fn with_interpolation(mut self, interpolation: BootstrapInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the missing-node policy.
    pub fn with_missing_node_policy(mut self, policy: MissingNodePolicy) -> Self {
        self.on_missing_node = policy;
        self
    }

    /// Toggle sorting by maturity.
    pub fn with_sorting(mut self, sort: bool) -> Self {
        self.sort_by_maturity = sort;
        self
    }

    /// Toggle acceptance of discount factors above 1.
    pub fn with_negative_rates(mut self, allow: bool) -> Self {
        self.allow_negative_rates = allow;
        self
    }
}

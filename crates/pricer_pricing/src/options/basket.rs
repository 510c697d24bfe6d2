//! Call on a weighted basket of correlated underlyings.

use pricer_core::market_data::validate_correlation;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::analytical::BasketMoments;
use pricer_models::instruments::OptionType;

use super::{check_finite, OptionKind, OptionModel};
use crate::mc::{price_basket_call, BasketParams, CholeskyFactor, MonteCarloConfig};

/// How a [`BasketCallOption`] is priced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BasketMethod {
    /// Collapse the basket to one lognormal asset with matched first two
    /// moments and apply Black-Scholes. An approximation, not an exact price.
    #[default]
    MomentMatching,
    /// Correlated terminal sampling with the given simulation settings.
    MonteCarlo(MonteCarloConfig),
}

/// Call on `Σ wᵢ Sᵢ(T)` struck at `K`.
///
/// # Examples
///
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_pricing::options::BasketCallOption;
///
/// let basket = BasketCallOption::new(
///     vec!["AAA".into(), "BBB".into()],
///     vec![100.0, 100.0],
///     vec![0.5, 0.5],
///     vec![0.2, 0.2],
///     vec![vec![1.0, 0.5], vec![0.5, 1.0]],
///     100.0,
///     1.0,
///     0.05,
/// )
/// .unwrap();
/// let price = basket.price().unwrap();
/// assert!(price > 0.0 && price < 10.4506); // diversified below the single-asset call
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BasketCallOption {
    tickers: Vec<String>,
    spots: Vec<f64>,
    weights: Vec<f64>,
    vols: Vec<f64>,
    correlation: Vec<Vec<f64>>,
    strike: f64,
    expiry: f64,
    rate: f64,
    dividend_yield: f64,
    method: BasketMethod,
}

impl BasketCallOption {
    /// Create a basket call priced by moment matching.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` when vector lengths disagree, any spot,
    /// volatility, the strike or the expiry is not positive, or the
    /// correlation matrix is not a symmetric positive semi-definite matrix
    /// with a unit diagonal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tickers: Vec<String>,
        spots: Vec<f64>,
        weights: Vec<f64>,
        vols: Vec<f64>,
        correlation: Vec<Vec<f64>>,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> Result<Self, PricingError> {
        let option = Self {
            tickers,
            spots,
            weights,
            vols,
            correlation,
            strike,
            expiry,
            rate,
            dividend_yield: 0.0,
            method: BasketMethod::default(),
        };
        option.validate()?;
        Ok(option)
    }

    /// Set the continuous dividend yield, common to every constituent.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Select the pricing method.
    pub fn with_method(mut self, method: BasketMethod) -> Self {
        self.method = method;
        self
    }

    /// Pricing method in use.
    pub fn method(&self) -> &BasketMethod {
        &self.method
    }

    /// Basket weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Correlation matrix, rows ordered as [`tickers`](OptionModel::tickers).
    pub fn correlation(&self) -> &[Vec<f64>] {
        &self.correlation
    }

    /// Effective level and volatility used by moment matching.
    pub fn moments(&self) -> Result<BasketMoments<f64>, PricingError> {
        self.validate()?;
        Ok(BasketMoments::new(
            &self.spots,
            &self.weights,
            &self.vols,
            &self.correlation,
        )?)
    }

    fn validate(&self) -> Result<(), PricingError> {
        let n = self.spots.len();
        if n == 0 {
            return Err(PricingError::InvalidInput(
                "basket needs at least one underlying".to_string(),
            ));
        }
        for (what, len) in [
            ("tickers", self.tickers.len()),
            ("weights", self.weights.len()),
            ("volatilities", self.vols.len()),
        ] {
            if len != n {
                return Err(PricingError::InvalidInput(format!(
                    "{} has length {}, expected {}",
                    what, len, n
                )));
            }
        }

        for (&spot, &vol) in self.spots.iter().zip(&self.vols) {
            check_positive("spot", spot)?;
            check_positive("volatility", vol)?;
        }
        for &w in &self.weights {
            check_finite("weight", w)?;
        }
        check_positive("strike", self.strike)?;
        check_positive("expiry", self.expiry)?;
        check_finite("rate", self.rate)?;
        check_finite("dividend yield", self.dividend_yield)?;

        validate_correlation(&self.correlation, n)?;
        check_semi_definite(&self.correlation)
    }
}

/// Diagonal shift that lets a singular but valid matrix, such as perfect
/// correlation, pass the Cholesky test.
const PSD_TOLERANCE: f64 = 1e-10;

fn check_semi_definite(correlation: &[Vec<f64>]) -> Result<(), PricingError> {
    let shifted: Vec<Vec<f64>> = correlation
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut row = row.clone();
            row[i] += PSD_TOLERANCE;
            row
        })
        .collect();
    match CholeskyFactor::new(&shifted) {
        Some(_) => Ok(()),
        None => Err(PricingError::InvalidInput(
            "correlation matrix is not positive semi-definite".to_string(),
        )),
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::non_positive(name, value))
    }
}

impl Priceable<f64> for BasketCallOption {
    fn price(&self) -> Result<f64, PricingError> {
        match &self.method {
            BasketMethod::MomentMatching => Ok(self.moments()?.price_call(
                self.strike,
                self.expiry,
                self.rate,
                self.dividend_yield,
            )?),
            BasketMethod::MonteCarlo(config) => {
                self.validate()?;
                let factor = CholeskyFactor::new(&self.correlation).ok_or_else(|| {
                    PricingError::InvalidInput(
                        "correlation matrix is not positive definite".to_string(),
                    )
                })?;
                let params = BasketParams {
                    spots: &self.spots,
                    weights: &self.weights,
                    vols: &self.vols,
                    strike: self.strike,
                    expiry: self.expiry,
                    rate: self.rate,
                    dividend_yield: self.dividend_yield,
                };
                Ok(price_basket_call(&params, &factor, config).price)
            }
        }
    }
}

impl OptionModel for BasketCallOption {
    fn kind(&self) -> OptionKind {
        OptionKind::BasketCall
    }

    fn tickers(&self) -> &[String] {
        &self.tickers
    }

    fn spots(&self) -> &[f64] {
        &self.spots
    }

    fn spots_mut(&mut self) -> &mut [f64] {
        &mut self.spots
    }

    fn vols(&self) -> &[f64] {
        &self.vols
    }

    fn vols_mut(&mut self) -> &mut [f64] {
        &mut self.vols
    }

    fn strike(&self) -> f64 {
        self.strike
    }

    fn expiry(&self) -> f64 {
        self.expiry
    }

    fn set_expiry(&mut self, expiry: f64) {
        self.expiry = expiry;
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn option_type(&self) -> OptionType {
        OptionType::Call
    }

    fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EuropeanOption;
    use approx::assert_relative_eq;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("T{i}")).collect()
    }

    fn two_asset(rho: f64) -> BasketCallOption {
        BasketCallOption::new(
            names(2),
            vec![100.0, 100.0],
            vec![0.5, 0.5],
            vec![0.2, 0.2],
            vec![vec![1.0, rho], vec![rho, 1.0]],
            100.0,
            1.0,
            0.05,
        )
        .unwrap()
    }

    fn mc(n_paths: usize) -> BasketMethod {
        BasketMethod::MonteCarlo(
            MonteCarloConfig::builder()
                .n_paths(n_paths)
                .n_steps(1)
                .build()
                .unwrap(),
        )
    }

    // ========================================
    // Moment matching
    // ========================================

    #[test]
    fn test_perfectly_correlated_equals_vanilla() {
        let basket = two_asset(1.0);
        let vanilla =
            EuropeanOption::new("X", 100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        assert_relative_eq!(
            basket.price().unwrap(),
            vanilla.price().unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_diversification_lowers_price() {
        let high = two_asset(0.9).price().unwrap();
        let low = two_asset(0.1).price().unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_effective_moments() {
        let m = two_asset(0.5).moments().unwrap();
        assert_relative_eq!(m.effective_spot, 100.0, epsilon = 1e-12);
        assert_relative_eq!(m.effective_volatility, 0.2 * 0.75_f64.sqrt(), epsilon = 1e-12);
    }

    // ========================================
    // Monte Carlo
    // ========================================

    #[test]
    fn test_single_asset_mc_matches_black_scholes() {
        let basket = BasketCallOption::new(
            names(1),
            vec![100.0],
            vec![1.0],
            vec![0.2],
            vec![vec![1.0]],
            100.0,
            1.0,
            0.05,
        )
        .unwrap()
        .with_method(mc(40_000));
        let price = basket.price().unwrap();
        assert!((price - 10.4506).abs() < 0.3, "mc price {price}");
    }

    #[test]
    fn test_mc_close_to_moment_matching() {
        let analytic = two_asset(0.5).price().unwrap();
        let simulated = two_asset(0.5).with_method(mc(40_000)).price().unwrap();
        assert!((analytic - simulated).abs() < 0.5);
    }

    #[test]
    fn test_mc_rejects_singular_correlation() {
        let basket = two_asset(1.0).with_method(mc(1_000));
        assert!(matches!(basket.price(), Err(PricingError::InvalidInput(_))));
    }

    // ========================================
    // Validation
    // ========================================

    #[test]
    fn test_length_mismatch() {
        let result = BasketCallOption::new(
            names(2),
            vec![100.0, 100.0],
            vec![1.0],
            vec![0.2, 0.2],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            100.0,
            1.0,
            0.05,
        );
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_correlation() {
        for corr in [
            vec![vec![1.0, 0.3], vec![0.4, 1.0]],
            vec![vec![0.9, 0.3], vec![0.3, 1.0]],
            vec![vec![1.0, 1.5], vec![1.5, 1.0]],
        ] {
            let result = BasketCallOption::new(
                names(2),
                vec![100.0, 100.0],
                vec![0.5, 0.5],
                vec![0.2, 0.2],
                corr,
                100.0,
                1.0,
                0.05,
            );
            assert!(matches!(result, Err(PricingError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_rejects_indefinite_correlation() {
        // Pairwise valid entries, smallest eigenvalue -0.8
        let corr = vec![
            vec![1.0, -0.9, -0.9],
            vec![-0.9, 1.0, -0.9],
            vec![-0.9, -0.9, 1.0],
        ];
        let result = BasketCallOption::new(
            names(3),
            vec![100.0, 100.0, 100.0],
            vec![1.0, 0.1, 0.1],
            vec![0.2, 0.2, 0.2],
            corr,
            100.0,
            1.0,
            0.05,
        );
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput(msg)) if msg.contains("semi-definite")
        ));
    }

    #[test]
    fn test_indefinite_correlation_after_construction() {
        let mut basket = BasketCallOption::new(
            names(3),
            vec![100.0, 100.0, 100.0],
            vec![1.0, 0.1, 0.1],
            vec![0.2, 0.2, 0.2],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
            100.0,
            1.0,
            0.05,
        )
        .unwrap();
        for (i, row) in basket.correlation.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                if i != j {
                    *value = -0.9;
                }
            }
        }
        assert!(matches!(basket.price(), Err(PricingError::InvalidInput(_))));
        let basket = basket.with_method(mc(1_000));
        assert!(matches!(basket.price(), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_non_positive_vol_after_mutation() {
        let mut basket = two_asset(0.5);
        basket.vols_mut()[1] = 0.0;
        assert!(matches!(basket.price(), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_basket() {
        let result = BasketCallOption::new(
            vec![],
            vec![],
            vec![],
            vec![],
            vec![],
            100.0,
            1.0,
            0.05,
        );
        assert!(result.is_err());
    }
}

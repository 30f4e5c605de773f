//! EA configuration.

use crate::error::ConfigError;

/// Largest accepted `mu` or `lambda`.
pub const MAX_POPULATION: usize = 1_000_000;

/// Configuration of the (mu + lambda) EA with fitness assignment.
///
/// # Examples
///
/// ```
/// use u_blackbox::ea::EaConfig;
///
/// let config = EaConfig::default()
///     .with_mu(4)
///     .with_lambda(4)
///     .with_crossover_rate(0.5);
/// assert!(config.validate().is_ok());
///
/// // crossover needs two distinct parents
/// assert!(config.with_mu(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Number of parents kept every generation.
    pub mu: usize,

    /// Number of offspring created every generation.
    pub lambda: usize,

    /// Probability of creating an offspring by recombination instead of
    /// mutation (0.0–1.0). Must be 0 if `mu` is 1.
    pub crossover_rate: f64,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            mu: 16,
            lambda: 16,
            crossover_rate: 0.05,
        }
    }
}

impl EaConfig {
    /// Sets the number of parents.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the number of offspring.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the crossover rate. Out-of-range values are rejected by
    /// [`validate`](EaConfig::validate), not clamped.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.crossover_rate.is_finite() || !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::InvalidCrossoverRate(self.crossover_rate));
        }
        if self.mu < 1 || self.mu > MAX_POPULATION {
            return Err(ConfigError::InvalidMu {
                mu: self.mu,
                min: 1,
                max: MAX_POPULATION,
            });
        }
        if self.mu == 1 && self.crossover_rate > 0.0 {
            return Err(ConfigError::CrossoverNeedsTwoParents(self.crossover_rate));
        }
        if self.lambda < 1 || self.lambda > MAX_POPULATION {
            return Err(ConfigError::InvalidLambda {
                lambda: self.lambda,
                max: MAX_POPULATION,
            });
        }
        Ok(())
    }
}

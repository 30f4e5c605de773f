//! Memetic algorithm configuration.

use crate::ea::MAX_POPULATION;
use crate::error::ConfigError;

/// Configuration of the memetic algorithm.
///
/// # Examples
///
/// ```
/// use u_blackbox::ma::MaConfig;
///
/// let config = MaConfig::default().with_mu(8).with_lambda(8).with_clearing(true);
/// assert!(config.validate().is_ok());
///
/// // offspring are always created by recombination
/// assert!(config.with_mu(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaConfig {
    /// Number of parents kept every generation (at least 2).
    pub mu: usize,

    /// Number of offspring created every generation.
    pub lambda: usize,

    /// Upper bound for improving moves per local search.
    /// `usize::MAX` means "until a local optimum is reached".
    pub max_ls_steps: usize,

    /// Keep only parents of pairwise distinct quality and restart once
    /// fewer than two remain.
    pub clearing: bool,
}

impl Default for MaConfig {
    fn default() -> Self {
        Self {
            mu: 16,
            lambda: 16,
            max_ls_steps: usize::MAX,
            clearing: false,
        }
    }
}

impl MaConfig {
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

    /// Sets the local search step bound.
    pub fn with_max_ls_steps(mut self, steps: usize) -> Self {
        self.max_ls_steps = steps;
        self
    }

    /// Enables or disables clearing (and with it, restarts).
    pub fn with_clearing(mut self, clearing: bool) -> Self {
        self.clearing = clearing;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mu < 2 || self.mu > MAX_POPULATION {
            return Err(ConfigError::InvalidMu {
                mu: self.mu,
                min: 2,
                max: MAX_POPULATION,
            });
        }
        if self.lambda < 1 || self.lambda > MAX_POPULATION {
            return Err(ConfigError::InvalidLambda {
                lambda: self.lambda,
                max: MAX_POPULATION,
            });
        }
        if self.max_ls_steps == 0 {
            return Err(ConfigError::InvalidLocalSearchSteps(self.max_ls_steps));
        }
        Ok(())
    }
}

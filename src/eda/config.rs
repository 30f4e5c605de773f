//! EDA configurations.

use crate::ea::MAX_POPULATION;
use crate::error::ConfigError;

/// Configuration of the EDA with fitness assignment.
///
/// # Examples
///
/// ```
/// use u_blackbox::eda::EdaConfig;
///
/// let config = EdaConfig::default().with_mu(10).with_lambda(100);
/// assert!(config.validate().is_ok());
///
/// // the model is estimated from a subset of the sampled points
/// assert!(config.with_mu(101).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdaConfig {
    /// Number of selected points the model is estimated from.
    pub mu: usize,

    /// Number of points sampled from the model every generation.
    pub lambda: usize,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self { mu: 16, lambda: 64 }
    }
}

impl EdaConfig {
    /// Sets the selection size.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the sample size.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mu_lambda(self.mu, self.lambda)
    }
}

/// Configuration of the EDA whose samples are refined by local search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridEdaConfig {
    /// Number of selected points the model is estimated from.
    pub mu: usize,

    /// Number of points sampled from the model every generation.
    pub lambda: usize,

    /// Upper bound for improving moves per local search.
    /// `usize::MAX` means "until a local optimum is reached".
    pub max_ls_steps: usize,
}

impl Default for HybridEdaConfig {
    fn default() -> Self {
        Self {
            mu: 16,
            lambda: 64,
            max_ls_steps: usize::MAX,
        }
    }
}

impl HybridEdaConfig {
    /// Sets the selection size.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the sample size.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the local search step bound.
    pub fn with_max_ls_steps(mut self, steps: usize) -> Self {
        self.max_ls_steps = steps;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mu_lambda(self.mu, self.lambda)?;
        if self.max_ls_steps == 0 {
            return Err(ConfigError::InvalidLocalSearchSteps(self.max_ls_steps));
        }
        Ok(())
    }
}

fn validate_mu_lambda(mu: usize, lambda: usize) -> Result<(), ConfigError> {
    if lambda < 1 || lambda > MAX_POPULATION {
        return Err(ConfigError::InvalidLambda {
            lambda,
            max: MAX_POPULATION,
        });
    }
    if mu < 1 || mu > lambda {
        return Err(ConfigError::InvalidMu {
            mu,
            min: 1,
            max: lambda,
        });
    }
    Ok(())
}

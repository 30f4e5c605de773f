//! Configuration errors.
//!
//! Every algorithm validates its hyperparameters eagerly, at construction.
//! A run that has started never fails: budget exhaustion is reported only
//! through the oracle's termination predicate.

/// Rejected algorithm configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid mu: {mu} (must be in {min}..={max})")]
    InvalidMu { mu: usize, min: usize, max: usize },

    #[error("invalid lambda: {lambda} (must be in 1..={max})")]
    InvalidLambda { lambda: usize, max: usize },

    #[error("invalid crossover rate: {0} (must be finite and in [0, 1])")]
    InvalidCrossoverRate(f64),

    #[error("crossover rate must be 0 if mu is 1, but it is {0}")]
    CrossoverNeedsTwoParents(f64),

    #[error("invalid number of maximum local search steps: {0}")]
    InvalidLocalSearchSteps(usize),

    #[error("unary operator cannot enumerate its neighborhood")]
    CannotEnumerate,

    #[error("invalid budget: {0}")]
    InvalidBudget(&'static str),
}

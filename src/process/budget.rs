//! A budget-constrained black-box process.
//!
//! [`BudgetProcess`] owns the search space, the three operators, the
//! objective function and a seeded random source. Its [`BudgetEvaluator`]
//! counts objective function evaluations (FEs), remembers the best point
//! ever seen and switches the termination predicate on once the FE budget
//! or the time budget is used up, or once the goal quality is reached.

use super::types::{
    BinaryOperator, BlackBoxProcess, Evaluator, NullaryOperator, ObjectiveFunction,
    ProcessParts, SearchSpace, UnaryOperator,
};
use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Budget and reproducibility settings of a [`BudgetProcess`].
///
/// # Examples
///
/// ```
/// use u_blackbox::process::BudgetConfig;
///
/// let config = BudgetConfig::default()
///     .with_max_fes(10_000)
///     .with_goal(0.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetConfig {
    /// Maximum number of objective function evaluations.
    pub max_fes: Option<u64>,

    /// Maximum runtime in milliseconds, measured from process creation.
    pub max_time_ms: Option<u64>,

    /// Stop as soon as a quality `<= goal` has been evaluated.
    ///
    /// `None` uses the objective's lower bound.
    pub goal: Option<f64>,

    /// Random seed. `None` draws a random seed.
    pub seed: Option<u64>,

    /// Whether to record the quality of every evaluation.
    pub record_trace: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_fes: Some(100_000),
            max_time_ms: None,
            goal: None,
            seed: None,
            record_trace: false,
        }
    }
}

impl BudgetConfig {
    /// Sets the FE budget.
    pub fn with_max_fes(mut self, fes: u64) -> Self {
        self.max_fes = Some(fes);
        self
    }

    /// Removes the FE budget.
    pub fn without_max_fes(mut self) -> Self {
        self.max_fes = None;
        self
    }

    /// Sets the time budget in milliseconds.
    pub fn with_max_time_ms(mut self, ms: u64) -> Self {
        self.max_time_ms = Some(ms);
        self
    }

    /// Sets the goal quality.
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the quality trace.
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Validates the configuration.
    ///
    /// At least one of the FE budget and the time budget must be set,
    /// otherwise a run could never end.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fes.is_none() && self.max_time_ms.is_none() {
            return Err(ConfigError::InvalidBudget(
                "either max_fes or max_time_ms must be set",
            ));
        }
        if self.max_fes == Some(0) {
            return Err(ConfigError::InvalidBudget("max_fes must be positive"));
        }
        if self.max_time_ms == Some(0) {
            return Err(ConfigError::InvalidBudget("max_time_ms must be positive"));
        }
        if let Some(goal) = self.goal {
            if goal.is_nan() {
                return Err(ConfigError::InvalidBudget("goal must not be NaN"));
            }
        }
        Ok(())
    }
}

/// Counts evaluations and keeps the best point ever evaluated.
#[derive(Debug, Clone)]
pub struct BudgetEvaluator<X, F> {
    objective: F,
    max_fes: u64,
    deadline: Option<Instant>,
    goal: f64,
    consumed_fes: u64,
    best_quality: f64,
    best_point: Option<X>,
    best_fe: u64,
    exhausted: bool,
    trace: Option<Vec<f64>>,
}

impl<X: Clone, F: ObjectiveFunction<X>> BudgetEvaluator<X, F> {
    fn new(objective: F, config: &BudgetConfig) -> Self {
        let goal = config.goal.unwrap_or_else(|| objective.lower_bound());
        Self {
            max_fes: config.max_fes.unwrap_or(u64::MAX),
            deadline: config
                .max_time_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            goal,
            consumed_fes: 0,
            best_quality: f64::INFINITY,
            best_point: None,
            best_fe: 0,
            exhausted: false,
            trace: config.record_trace.then(Vec::new),
            objective,
        }
    }

    /// Number of evaluations performed so far.
    pub fn consumed_fes(&self) -> u64 {
        self.consumed_fes
    }

    /// Best quality evaluated so far, if any.
    pub fn best_quality(&self) -> Option<f64> {
        self.best_point.as_ref().map(|_| self.best_quality)
    }

    /// Best point evaluated so far, if any.
    pub fn best_point(&self) -> Option<&X> {
        self.best_point.as_ref()
    }

    /// The (1-based) evaluation at which the best point was found.
    pub fn best_fe(&self) -> u64 {
        self.best_fe
    }

    /// Quality of every evaluation in order, if recording was enabled.
    pub fn trace(&self) -> Option<&[f64]> {
        self.trace.as_deref()
    }
}

impl<X: Clone, F: ObjectiveFunction<X>> Evaluator<X> for BudgetEvaluator<X, F> {
    fn evaluate(&mut self, point: &X) -> f64 {
        let quality = self.objective.evaluate(point);
        debug_assert!(!quality.is_nan(), "objective returned NaN");
        self.consumed_fes += 1;

        if let Some(trace) = self.trace.as_mut() {
            trace.push(quality);
        }

        if self.best_point.is_none() || quality < self.best_quality {
            self.best_quality = quality;
            self.best_fe = self.consumed_fes;
            match self.best_point.as_mut() {
                Some(best) => best.clone_from(point),
                None => self.best_point = Some(point.clone()),
            }
            if quality <= self.goal && !self.exhausted {
                tracing::debug!(fes = self.consumed_fes, quality, "goal reached");
                self.exhausted = true;
            }
        }

        if self.consumed_fes >= self.max_fes && !self.exhausted {
            tracing::debug!(fes = self.consumed_fes, "evaluation budget exhausted");
            self.exhausted = true;
        }

        quality
    }

    fn should_terminate(&self) -> bool {
        self.exhausted
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// A complete black-box process with FE, time and goal budgets.
///
/// # Examples
///
/// ```
/// use u_blackbox::bitstrings::{BitStringSpace, RandomBits, SingleBitFlip, UniformCrossover, ZeroCount};
/// use u_blackbox::process::{BlackBoxProcess, BudgetConfig, BudgetProcess};
///
/// let n = 16;
/// let mut process = BudgetProcess::new(
///     BitStringSpace::new(n),
///     RandomBits,
///     SingleBitFlip,
///     UniformCrossover,
///     ZeroCount,
///     &BudgetConfig::default().with_max_fes(100).with_seed(7),
/// )
/// .unwrap();
///
/// let mut parts = process.parts();
/// let x = parts.random_point();
/// let q = parts.evaluate(&x);
/// assert_eq!(process.best_quality(), Some(q));
/// ```
pub struct BudgetProcess<S: SearchSpace, N, U, B, F> {
    rng: StdRng,
    space: S,
    nullary: N,
    unary: U,
    binary: B,
    evaluator: BudgetEvaluator<S::Point, F>,
}

impl<S, N, U, B, F> BudgetProcess<S, N, U, B, F>
where
    S: SearchSpace,
    S::Point: Clone,
    N: NullaryOperator<S::Point>,
    U: UnaryOperator<S::Point>,
    B: BinaryOperator<S::Point>,
    F: ObjectiveFunction<S::Point>,
{
    /// Creates the process. The time budget starts running now.
    pub fn new(
        space: S,
        nullary: N,
        unary: U,
        binary: B,
        objective: F,
        config: &BudgetConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            rng,
            space,
            nullary,
            unary,
            binary,
            evaluator: BudgetEvaluator::new(objective, config),
        })
    }

    /// The evaluator, with the run's bookkeeping.
    pub fn evaluator(&self) -> &BudgetEvaluator<S::Point, F> {
        &self.evaluator
    }

    /// Number of evaluations performed so far.
    pub fn consumed_fes(&self) -> u64 {
        self.evaluator.consumed_fes()
    }

    /// Best quality evaluated so far, if any.
    pub fn best_quality(&self) -> Option<f64> {
        self.evaluator.best_quality()
    }

    /// Best point evaluated so far, if any.
    pub fn best_point(&self) -> Option<&S::Point> {
        self.evaluator.best_point()
    }
}

impl<S, N, U, B, F> BlackBoxProcess for BudgetProcess<S, N, U, B, F>
where
    S: SearchSpace,
    S::Point: Clone,
    N: NullaryOperator<S::Point>,
    U: UnaryOperator<S::Point>,
    B: BinaryOperator<S::Point>,
    F: ObjectiveFunction<S::Point>,
{
    type Point = S::Point;
    type Rng = StdRng;
    type Space = S;
    type Nullary = N;
    type Unary = U;
    type Binary = B;
    type Evaluator = BudgetEvaluator<S::Point, F>;

    fn parts(&mut self) -> ProcessParts<'_, Self> {
        ProcessParts {
            rng: &mut self.rng,
            space: &self.space,
            nullary: &self.nullary,
            unary: &self.unary,
            binary: &self.binary,
            evaluator: &mut self.evaluator,
        }
    }
}

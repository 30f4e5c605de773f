//! The memetic algorithm and its plain generation loop.
//!
//! local search on every record not known to be optimal → sort by quality →
//! fair shuffle of the mu parents → lambda offspring by recombination →
//! repeat until termination.

use super::clearing::solve_with_clearing;
use super::config::MaConfig;
use crate::error::ConfigError;
use crate::local_search::{refine, Refinement};
use crate::population::{by_quality, distinct_index, fair_shuffle, LsRecord};
use crate::process::{BinaryOperator, BlackBoxProcess, ProcessParts, SearchSpace, UnaryOperator};
use crate::setup::{merge_name, Metaheuristic, RunStats, SetupDescription, Solve};
use std::fmt;

/// A (mu + lambda) memetic algorithm.
///
/// Every offspring is created by recombining two distinct parents and then
/// refined by a first-improvement local search over the unary operator's
/// neighborhood. Records that are verified local optima are not searched
/// again.
///
/// With [`MaConfig::clearing`] the parents are restricted to records of
/// pairwise distinct quality, and the run restarts from random points
/// once fewer than two distinct qualities remain.
///
/// # Usage
///
/// ```
/// use u_blackbox::bitstrings::{BitStringSpace, RandomBits, SingleBitFlip, TwoMax, UniformCrossover};
/// use u_blackbox::ma::{MaConfig, Memetic};
/// use u_blackbox::process::{BudgetConfig, BudgetProcess};
/// use u_blackbox::setup::{Metaheuristic, Solve};
///
/// let mut process = BudgetProcess::new(
///     BitStringSpace::new(32),
///     RandomBits,
///     SingleBitFlip,
///     UniformCrossover,
///     TwoMax,
///     &BudgetConfig::default().with_max_fes(10_000).with_seed(3),
/// )
/// .unwrap();
///
/// let config = MaConfig::default().with_mu(4).with_lambda(4).with_clearing(true);
/// let mut ma = Memetic::new(config, &SingleBitFlip, &UniformCrossover).unwrap();
/// ma.solve(&mut process);
///
/// assert_eq!(process.best_quality(), Some(0.0));
/// assert_eq!(ma.name(), "mac_4+4_1flip_uniform");
/// ```
#[derive(Debug, Clone)]
pub struct Memetic {
    config: MaConfig,
    unary: String,
    binary: String,
}

impl Memetic {
    /// Creates the algorithm for processes using `unary` and `binary` (or
    /// operators of the same kind). Their names become part of the
    /// algorithm's name.
    ///
    /// # Errors
    /// [`ConfigError::CannotEnumerate`] if `unary` cannot enumerate its
    /// neighborhood, or any error of [`MaConfig::validate`].
    pub fn new<X, U, B>(config: MaConfig, unary: &U, binary: &B) -> Result<Self, ConfigError>
    where
        U: UnaryOperator<X> + fmt::Display,
        B: BinaryOperator<X> + fmt::Display,
    {
        config.validate()?;
        if !unary.can_enumerate() {
            return Err(ConfigError::CannotEnumerate);
        }
        Ok(Self {
            config,
            unary: unary.to_string(),
            binary: binary.to_string(),
        })
    }

    pub fn config(&self) -> &MaConfig {
        &self.config
    }
}

impl<X> Solve<X> for Memetic {
    fn solve<P: BlackBoxProcess<Point = X>>(&mut self, process: &mut P) -> RunStats {
        let mut parts = process.parts();
        tracing::debug!(algorithm = %self.name(), "run started");
        let stats = if self.config.clearing {
            solve_with_clearing(&self.config, &mut parts)
        } else {
            solve_plain(&self.config, &mut parts)
        };
        stats.finished()
    }
}

fn solve_plain<P: BlackBoxProcess + ?Sized>(config: &MaConfig, parts: &mut ProcessParts<'_, P>) -> RunStats {
    let MaConfig {
        mu,
        lambda,
        max_ls_steps,
        ..
    } = *config;
    let mut stats = RunStats::default();

    let mut population = Vec::with_capacity(mu + lambda);
    for _ in 0..mu + lambda {
        let point = parts.random_point();
        let quality = parts.evaluate(&point);
        population.push(LsRecord::new(point, quality));
        if parts.should_terminate() {
            return stats;
        }
    }
    let mut temp = parts.space.create();

    while !parts.should_terminate() {
        if !refine_population(parts, &mut population, &mut temp, max_ls_steps) {
            return stats;
        }

        population.sort_by(by_quality);
        fair_shuffle(parts.rng, &mut population, 0, mu);

        let (parents, offspring) = population.split_at_mut(mu);
        let mut p1 = mu - 1;
        for dest in offspring.iter_mut().rev() {
            if parts.should_terminate() {
                return stats;
            }
            p1 = (p1 + 1) % mu;
            let p2 = distinct_index(parts.rng, mu, p1);
            parts.binary.apply(
                &parents[p1].point,
                &parents[p2].point,
                &mut dest.point,
                parts.rng,
            );
            dest.quality = parts.evaluate(&dest.point);
            dest.is_optimum = false;
        }

        stats.generations += 1;
        tracing::trace!(generation = stats.generations, "generation done");
    }
    stats
}

/// Runs local search on every record not yet flagged as a local optimum.
///
/// A record is flagged only when a full scan found no better neighbor;
/// records stopped by the step bound stay unflagged. Returns `false` once
/// the process demands termination.
fn refine_population<P: BlackBoxProcess + ?Sized>(
    parts: &mut ProcessParts<'_, P>,
    population: &mut [LsRecord<P::Point>],
    temp: &mut P::Point,
    max_ls_steps: usize,
) -> bool {
    for record in population.iter_mut().filter(|r| !r.is_optimum) {
        match refine(parts, &mut record.point, &mut record.quality, temp, max_ls_steps) {
            Refinement::Terminated => return false,
            outcome => record.is_optimum = outcome == Refinement::Optimum,
        }
    }
    true
}

impl Metaheuristic for Memetic {
    fn setup_description(&self) -> SetupDescription {
        let mut setup = SetupDescription::new();
        setup
            .entry("base_algorithm", "ma")
            .entry("mu", self.config.mu)
            .entry("lambda", self.config.lambda)
            .entry("cr", 1.0)
            .entry("clearing", self.config.clearing)
            .entry("restarts", self.config.clearing)
            .entry("max_ls_steps", self.config.max_ls_steps)
            .entry("unary", &self.unary)
            .entry("binary", &self.binary);
        setup
    }

    fn name(&self) -> String {
        let family = if self.config.clearing { "mac" } else { "ma" };
        let steps = match self.config.max_ls_steps {
            usize::MAX => String::new(),
            steps => steps.to_string(),
        };
        merge_name(&[
            family.to_string(),
            format!("{}+{}", self.config.mu, self.config.lambda),
            steps,
            self.unary.clone(),
            self.binary.clone(),
        ])
    }
}

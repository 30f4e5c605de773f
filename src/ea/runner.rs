//! The generation loop of the EA with fitness assignment.
//!
//! initialization → (fitness → sort → fair shuffle of the mu parents →
//! lambda offspring by crossover or mutation) → repeat until termination.

use super::config::EaConfig;
use crate::error::ConfigError;
use crate::fitness::FitnessAssignment;
use crate::population::{distinct_index, fair_shuffle, FitnessRecord};
use crate::process::{BinaryOperator, BlackBoxProcess, UnaryOperator};
use crate::setup::{merge_name, Describe, Metaheuristic, RunStats, SetupDescription, Solve};
use rand::Rng;

/// A (mu + lambda) evolutionary algorithm whose selection is driven by a
/// [`FitnessAssignment`] process instead of raw quality.
///
/// The population holds `mu + lambda` records for the whole run. Every
/// generation the records are ranked by fitness, the first `mu` become
/// parents and the last `lambda` are overwritten by offspring. The first
/// parent walks round-robin over the shuffled parents, the second (for
/// crossover) is drawn uniformly from the other parents.
///
/// # Usage
///
/// ```
/// use u_blackbox::bitstrings::{BitStringSpace, RandomBits, SingleBitFlip, UniformCrossover, ZeroCount};
/// use u_blackbox::ea::{EaConfig, EaWithFitness};
/// use u_blackbox::fitness::DirectFitness;
/// use u_blackbox::process::{BudgetConfig, BudgetProcess};
/// use u_blackbox::setup::{Metaheuristic, Solve};
///
/// let mut process = BudgetProcess::new(
///     BitStringSpace::new(16),
///     RandomBits,
///     SingleBitFlip,
///     UniformCrossover,
///     ZeroCount,
///     &BudgetConfig::default().with_max_fes(5_000).with_seed(42),
/// )
/// .unwrap();
///
/// let config = EaConfig::default().with_mu(8).with_lambda(8).with_crossover_rate(0.3);
/// let mut ea = EaWithFitness::new(config, DirectFitness).unwrap();
/// ea.solve(&mut process);
///
/// assert_eq!(process.best_quality(), Some(0.0));
/// assert_eq!(ea.name(), "ea_direct_8+8@0d3");
/// ```
#[derive(Debug, Clone)]
pub struct EaWithFitness<F> {
    config: EaConfig,
    fitness: F,
}

impl<F> EaWithFitness<F> {
    /// Creates the algorithm, rejecting invalid configurations.
    pub fn new(config: EaConfig, fitness: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, fitness })
    }

    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }
}

impl<X, F: FitnessAssignment<X>> Solve<X> for EaWithFitness<F> {
    fn solve<P: BlackBoxProcess<Point = X>>(&mut self, process: &mut P) -> RunStats {
        let EaConfig {
            mu,
            lambda,
            crossover_rate,
        } = self.config;
        let mut parts = process.parts();
        let mut stats = RunStats::default();
        tracing::debug!(algorithm = %self.name(), "run started");

        self.fitness.initialize();

        // first generation: independent random points
        let mut population = Vec::with_capacity(mu + lambda);
        for _ in 0..mu + lambda {
            let point = parts.random_point();
            let quality = parts.evaluate(&point);
            population.push(FitnessRecord::new(point, quality));
            if parts.should_terminate() {
                return stats.finished();
            }
        }

        loop {
            self.fitness.assign_fitness(&mut population);
            let fitness = &self.fitness;
            population.sort_by(|a, b| fitness.compare(a, b));
            fair_shuffle(parts.rng, &mut population, 0, mu);

            let (parents, offspring) = population.split_at_mut(mu);
            let mut p1 = mu - 1;
            for dest in offspring.iter_mut().rev() {
                if parts.should_terminate() {
                    return stats.finished();
                }
                p1 = (p1 + 1) % mu;
                if parts.rng.random::<f64>() < crossover_rate {
                    let p2 = distinct_index(parts.rng, mu, p1);
                    parts.binary.apply(
                        &parents[p1].point,
                        &parents[p2].point,
                        &mut dest.point,
                        parts.rng,
                    );
                } else {
                    parts
                        .unary
                        .apply(&parents[p1].point, &mut dest.point, parts.rng);
                }
                dest.quality = parts.evaluate(&dest.point);
            }

            stats.generations += 1;
            tracing::trace!(generation = stats.generations, "generation done");
            if parts.should_terminate() {
                return stats.finished();
            }
        }
    }
}

impl<F: Describe> Metaheuristic for EaWithFitness<F> {
    fn setup_description(&self) -> SetupDescription {
        let mut setup = SetupDescription::new();
        setup
            .entry("base_algorithm", "fitness_ea")
            .entry("mu", self.config.mu)
            .entry("lambda", self.config.lambda)
            .entry("cr", self.config.crossover_rate)
            .entry("clearing", false)
            .entry("restarts", false)
            .entry("fitness", &self.fitness);
        self.fitness.describe(&mut setup);
        setup
    }

    fn name(&self) -> String {
        merge_name(&[
            "ea".to_string(),
            self.fitness.to_string(),
            format!(
                "{}+{}@{}",
                self.config.mu, self.config.lambda, self.config.crossover_rate
            ),
        ])
    }
}

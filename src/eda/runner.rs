//! The restart and generation loop of the EDA with fitness assignment.

use super::config::EdaConfig;
use crate::error::ConfigError;
use crate::fitness::FitnessAssignment;
use crate::model::Model;
use crate::population::FitnessRecord;
use crate::process::{BlackBoxProcess, NullaryOperator, ProcessParts, SearchSpace};
use crate::setup::{merge_name, Describe, Metaheuristic, RunStats, SetupDescription, Solve};

/// An estimation-of-distribution algorithm with fitness assignment.
///
/// Each epoch starts from the uninformative model and `lambda` random
/// points. Every generation the best `mu` points (by fitness) re-estimate
/// the model, which then replaces the whole population by `lambda` fresh
/// samples. If the model needs more than `mu` points for an update, the
/// epoch is abandoned and the algorithm restarts.
///
/// # Usage
///
/// ```
/// use u_blackbox::bitstrings::{BitStringSpace, RandomBits, SingleBitFlip, UniformCrossover, ZeroCount};
/// use u_blackbox::eda::{EdaConfig, EdaWithFitness};
/// use u_blackbox::fitness::DirectFitness;
/// use u_blackbox::model::UnivariateBitModel;
/// use u_blackbox::process::{BudgetConfig, BudgetProcess};
/// use u_blackbox::setup::{Metaheuristic, Solve};
///
/// let mut process = BudgetProcess::new(
///     BitStringSpace::new(32),
///     RandomBits,
///     SingleBitFlip,
///     UniformCrossover,
///     ZeroCount,
///     &BudgetConfig::default().with_max_fes(20_000).with_seed(7),
/// )
/// .unwrap();
///
/// let config = EdaConfig::default().with_mu(10).with_lambda(100);
/// let mut eda = EdaWithFitness::new(config, UnivariateBitModel::new(32), DirectFitness).unwrap();
/// eda.solve(&mut process);
///
/// assert_eq!(process.best_quality(), Some(0.0));
/// assert_eq!(eda.name(), "eda_umda_direct_10+100");
/// ```
#[derive(Debug, Clone)]
pub struct EdaWithFitness<M, F> {
    config: EdaConfig,
    model: M,
    fitness: F,
}

impl<M, F> EdaWithFitness<M, F> {
    /// Creates the algorithm, rejecting invalid configurations.
    pub fn new(config: EdaConfig, model: M, fitness: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            fitness,
        })
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }
}

/// Fills `population` with `size` random records, reusing existing storage.
///
/// Returns `false` as soon as the process demands termination.
pub(crate) fn sample_randomly<P: BlackBoxProcess + ?Sized>(
    parts: &mut ProcessParts<'_, P>,
    population: &mut Vec<FitnessRecord<P::Point>>,
    size: usize,
) -> bool {
    for slot in 0..size {
        if slot == population.len() {
            population.push(FitnessRecord::new(parts.space.create(), f64::INFINITY));
        }
        let record = &mut population[slot];
        parts.nullary.apply(&mut record.point, parts.rng);
        record.quality = parts.evaluate(&record.point);
        if parts.should_terminate() {
            return false;
        }
    }
    true
}

impl<X, M, F> Solve<X> for EdaWithFitness<M, F>
where
    M: Model<X>,
    F: FitnessAssignment<X>,
{
    fn solve<P: BlackBoxProcess<Point = X>>(&mut self, process: &mut P) -> RunStats {
        let EdaConfig { mu, lambda } = self.config;
        let mut parts = process.parts();
        let mut stats = RunStats::default();
        tracing::debug!(algorithm = %self.name(), "run started");

        self.fitness.initialize();
        let mut population: Vec<FitnessRecord<X>> = Vec::with_capacity(lambda);

        while !parts.should_terminate() {
            self.model.initialize();
            if !sample_randomly(&mut parts, &mut population, lambda) {
                return stats.finished();
            }

            loop {
                if mu < self.model.minimum_samples_needed_for_update() {
                    stats.restarts += 1;
                    tracing::debug!(restart = stats.restarts, "model needs more samples than mu");
                    break;
                }

                self.fitness.assign_fitness(&mut population);
                let fitness = &self.fitness;
                population.sort_by(|a, b| fitness.compare(a, b));
                self.model.update(population[..mu].iter().map(|r| &r.point));

                for record in population.iter_mut() {
                    self.model.sample(&mut record.point, parts.rng);
                    record.quality = parts.evaluate(&record.point);
                    if parts.should_terminate() {
                        return stats.finished();
                    }
                }

                stats.generations += 1;
                tracing::trace!(generation = stats.generations, "generation done");
            }
        }
        stats.finished()
    }
}

impl<M: Describe, F: Describe> Metaheuristic for EdaWithFitness<M, F> {
    fn setup_description(&self) -> SetupDescription {
        let mut setup = SetupDescription::new();
        setup
            .entry("base_algorithm", "eda")
            .entry("mu", self.config.mu)
            .entry("lambda", self.config.lambda)
            .entry("model", &self.model)
            .entry("fitness", &self.fitness)
            .entry("clearing", false)
            .entry("restarts", true);
        self.model.describe(&mut setup);
        self.fitness.describe(&mut setup);
        setup
    }

    fn name(&self) -> String {
        merge_name(&[
            "eda".to_string(),
            self.model.to_string(),
            self.fitness.to_string(),
            format!("{}+{}", self.config.mu, self.config.lambda),
        ])
    }
}

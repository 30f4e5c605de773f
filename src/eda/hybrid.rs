//! EDA whose samples are refined by local search before selection.

use super::config::HybridEdaConfig;
use super::runner::sample_randomly;
use crate::error::ConfigError;
use crate::fitness::FitnessAssignment;
use crate::local_search::{refine, Refinement};
use crate::model::Model;
use crate::population::FitnessRecord;
use crate::process::{BlackBoxProcess, SearchSpace, UnaryOperator};
use crate::setup::{merge_name, Describe, Metaheuristic, RunStats, SetupDescription, Solve};
use std::fmt;

/// An EDA with fitness assignment and a first-improvement local search.
///
/// Same restart and generation structure as
/// [`EdaWithFitness`](super::EdaWithFitness), but every sampled point is
/// improved by at most `max_ls_steps` improving moves of the process's
/// unary operator before the model is re-estimated. The unary operator
/// therefore has to enumerate its neighborhood.
#[derive(Debug, Clone)]
pub struct HybridEdaWithFitness<M, F> {
    config: HybridEdaConfig,
    model: M,
    fitness: F,
    unary: String,
}

impl<M, F> HybridEdaWithFitness<M, F> {
    /// Creates the algorithm for processes using `unary` (or an operator of
    /// the same kind) as their unary operator. Its name becomes part of the
    /// algorithm's name.
    ///
    /// # Errors
    /// [`ConfigError::CannotEnumerate`] if `unary` cannot enumerate its
    /// neighborhood, or any error of [`HybridEdaConfig::validate`].
    pub fn new<X, U>(config: HybridEdaConfig, model: M, fitness: F, unary: &U) -> Result<Self, ConfigError>
    where
        M: Model<X>,
        U: UnaryOperator<X> + fmt::Display,
    {
        config.validate()?;
        if !unary.can_enumerate() {
            return Err(ConfigError::CannotEnumerate);
        }
        Ok(Self {
            config,
            model,
            fitness,
            unary: unary.to_string(),
        })
    }

    pub fn config(&self) -> &HybridEdaConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn fitness(&self) -> &F {
        &self.fitness
    }
}

impl<X, M, F> Solve<X> for HybridEdaWithFitness<M, F>
where
    M: Model<X>,
    F: FitnessAssignment<X>,
{
    fn solve<P: BlackBoxProcess<Point = X>>(&mut self, process: &mut P) -> RunStats {
        let HybridEdaConfig {
            mu,
            lambda,
            max_ls_steps,
        } = self.config;
        let mut parts = process.parts();
        let mut stats = RunStats::default();
        tracing::debug!(algorithm = %self.name(), "run started");

        self.fitness.initialize();
        let mut population: Vec<FitnessRecord<X>> = Vec::with_capacity(lambda);
        let mut temp = parts.space.create();

        while !parts.should_terminate() {
            self.model.initialize();
            if !sample_randomly(&mut parts, &mut population, lambda) {
                return stats.finished();
            }

            loop {
                for record in population.iter_mut() {
                    let outcome = refine(
                        &mut parts,
                        &mut record.point,
                        &mut record.quality,
                        &mut temp,
                        max_ls_steps,
                    );
                    if outcome == Refinement::Terminated {
                        return stats.finished();
                    }
                }

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

impl<M: Describe, F: Describe> Metaheuristic for HybridEdaWithFitness<M, F> {
    fn setup_description(&self) -> SetupDescription {
        let mut setup = SetupDescription::new();
        setup
            .entry("base_algorithm", "heda")
            .entry("mu", self.config.mu)
            .entry("lambda", self.config.lambda)
            .entry("model", &self.model)
            .entry("max_ls_steps", self.config.max_ls_steps)
            .entry("fitness", &self.fitness)
            .entry("unary", &self.unary)
            .entry("clearing", false)
            .entry("restarts", true);
        self.model.describe(&mut setup);
        self.fitness.describe(&mut setup);
        setup
    }

    fn name(&self) -> String {
        let steps = match self.config.max_ls_steps {
            usize::MAX => String::new(),
            steps => steps.to_string(),
        };
        merge_name(&[
            "heda".to_string(),
            self.model.to_string(),
            self.fitness.to_string(),
            format!("{}+{}", self.config.mu, self.config.lambda),
            steps,
            self.unary.clone(),
        ])
    }
}

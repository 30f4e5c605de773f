//! Fitness assignment processes.
//!
//! A fitness assignment process turns the raw qualities of a whole
//! population into a fitness value per record, which then defines the
//! order used for selection. It is recomputed from scratch every
//! generation, but the process itself may carry state across
//! generations (see [`FrequencyFitness`]).
//!
//! # Implementations
//!
//! - [`DirectFitness`]: fitness equals quality (plain truncation selection)
//! - [`RankFitness`]: dense rank of the quality within the population
//! - [`FrequencyFitness`]: how often a quality value has been seen so far (FFA)

mod direct;
mod frequency;
mod rank;

pub use direct::DirectFitness;
pub use frequency::FrequencyFitness;
pub use rank::RankFitness;

use crate::population::{by_fitness, FitnessRecord};
use crate::setup::Describe;
use std::cmp::Ordering;

/// Assigns fitness values based on the full population context.
///
/// Implementations write only the `fitness` field and never touch `point`
/// or `quality`. Given the same quality multiset and the same internal
/// state, the assignment is deterministic.
///
/// The [`Describe`] supertrait names the process in setup dumps.
pub trait FitnessAssignment<X>: Describe {
    /// Resets the adaptive state at the start of a run.
    fn initialize(&mut self) {}

    /// Overwrites the `fitness` of every record in `population`.
    fn assign_fitness(&mut self, population: &mut [FitnessRecord<X>]);

    /// Strict weak order over records after [`assign_fitness`](FitnessAssignment::assign_fitness):
    /// smaller is better. Defaults to ascending fitness.
    fn compare(&self, a: &FitnessRecord<X>, b: &FitnessRecord<X>) -> Ordering {
        by_fitness(a, b)
    }
}

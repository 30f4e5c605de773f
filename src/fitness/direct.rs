use super::FitnessAssignment;
use crate::population::FitnessRecord;
use crate::setup::Describe;
use std::fmt;

/// Uses the quality itself as fitness.
///
/// With this process the fitness-based EA degenerates to a plain
/// (mu + lambda) EA with truncation selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectFitness;

impl<X> FitnessAssignment<X> for DirectFitness {
    fn assign_fitness(&mut self, population: &mut [FitnessRecord<X>]) {
        for record in population {
            record.fitness = record.quality;
        }
    }
}

impl Describe for DirectFitness {}

impl fmt::Display for DirectFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("direct")
    }
}

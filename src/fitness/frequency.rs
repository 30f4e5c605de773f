use super::FitnessAssignment;
use crate::population::FitnessRecord;
use crate::setup::Describe;
use std::collections::HashMap;
use std::fmt;

/// Frequency Fitness Assignment (FFA).
///
/// Keeps a histogram of every quality value that has entered a fitness
/// assignment since the last [`initialize`](FitnessAssignment::initialize).
/// The fitness of a record is how often its quality has been seen: rare
/// qualities are preferred, which drives the search away from plateaus
/// regardless of whether a quality is good or bad.
///
/// Qualities are bucketed by exact value, so this is meant for objectives
/// with a moderate number of distinct (typically integer) values.
#[derive(Debug, Clone, Default)]
pub struct FrequencyFitness {
    counts: HashMap<u64, u64>,
}

impl FrequencyFitness {
    pub fn new() -> Self {
        Self::default()
    }

    /// How often `quality` has been seen since the last reset.
    pub fn frequency(&self, quality: f64) -> u64 {
        self.counts.get(&key(quality)).copied().unwrap_or(0)
    }
}

/// Maps `-0.0` and `0.0` to the same bucket.
fn key(quality: f64) -> u64 {
    (quality + 0.0).to_bits()
}

impl<X> FitnessAssignment<X> for FrequencyFitness {
    fn initialize(&mut self) {
        self.counts.clear();
    }

    fn assign_fitness(&mut self, population: &mut [FitnessRecord<X>]) {
        for record in population.iter() {
            *self.counts.entry(key(record.quality)).or_insert(0) += 1;
        }
        for record in population.iter_mut() {
            record.fitness = self.frequency(record.quality) as f64;
        }
    }
}

impl Describe for FrequencyFitness {}

impl fmt::Display for FrequencyFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ffa")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(qualities: &[f64]) -> Vec<FitnessRecord<()>> {
        qualities.iter().map(|&q| FitnessRecord::new((), q)).collect()
    }

    #[test]
    fn test_counts_accumulate_across_generations() {
        let mut ffa = FrequencyFitness::new();
        FitnessAssignment::<()>::initialize(&mut ffa);

        let mut pop = population(&[1.0, 2.0, 1.0]);
        ffa.assign_fitness(&mut pop);
        assert_eq!(pop.iter().map(|r| r.fitness).collect::<Vec<_>>(), vec![2.0, 1.0, 2.0]);

        let mut pop = population(&[2.0, 3.0, 3.0]);
        ffa.assign_fitness(&mut pop);
        assert_eq!(pop.iter().map(|r| r.fitness).collect::<Vec<_>>(), vec![2.0, 2.0, 2.0]);
        assert_eq!(ffa.frequency(1.0), 2);
    }

    #[test]
    fn test_initialize_resets() {
        let mut ffa = FrequencyFitness::new();
        let mut pop = population(&[5.0, 5.0]);
        ffa.assign_fitness(&mut pop);
        FitnessAssignment::<()>::initialize(&mut ffa);
        assert_eq!(ffa.frequency(5.0), 0);
    }

    #[test]
    fn test_signed_zero_shares_bucket() {
        let mut ffa = FrequencyFitness::new();
        let mut pop = population(&[0.0, -0.0]);
        ffa.assign_fitness(&mut pop);
        assert_eq!(pop[0].fitness, 2.0);
        assert_eq!(pop[1].fitness, 2.0);
    }
}

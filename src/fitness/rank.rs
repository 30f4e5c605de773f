use super::FitnessAssignment;
use crate::population::FitnessRecord;
use crate::setup::Describe;
use std::fmt;

/// Dense ranking by quality.
///
/// The best quality gets fitness 0, the next distinct quality 1, and so
/// on. Records with equal quality share a rank.
#[derive(Debug, Clone, Default)]
pub struct RankFitness {
    order: Vec<usize>,
}

impl RankFitness {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<X> FitnessAssignment<X> for RankFitness {
    fn assign_fitness(&mut self, population: &mut [FitnessRecord<X>]) {
        self.order.clear();
        self.order.extend(0..population.len());
        self.order
            .sort_by(|&a, &b| population[a].quality.total_cmp(&population[b].quality));

        let mut rank = 0u32;
        let mut previous: Option<f64> = None;
        for &i in &self.order {
            let quality = population[i].quality;
            if let Some(p) = previous {
                if quality > p {
                    rank += 1;
                }
            }
            previous = Some(quality);
            population[i].fitness = f64::from(rank);
        }
    }
}

impl Describe for RankFitness {}

impl fmt::Display for RankFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rank")
    }
}

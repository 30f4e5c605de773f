//! Univariate Marginal Distribution Algorithm model for bit strings.
//!
//! # References
//!
//! - Mühlenbein & Paaß (1996), "From Recombination of Genes to the
//!   Estimation of Distributions I. Binary Parameters"

use super::Model;
use crate::setup::{Describe, SetupDescription};
use rand::Rng;
use std::fmt;

/// Independent per-bit probabilities of a `1`.
///
/// After an update each probability is the relative frequency of `1` at
/// that position among the selected points, kept within
/// `[1/n, 1 - 1/n]` so that no bit value ever becomes impossible.
#[derive(Debug, Clone)]
pub struct UnivariateBitModel {
    probabilities: Vec<f64>,
    counts: Vec<u64>,
    margin: f64,
}

impl UnivariateBitModel {
    /// Creates the model for bit strings of `length` bits.
    ///
    /// # Panics
    /// Panics if `length` is zero.
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "bit string length must be positive");
        let margin = if length > 1 { 1.0 / length as f64 } else { 0.5 };
        Self {
            probabilities: vec![0.5; length],
            counts: vec![0; length],
            margin,
        }
    }

    /// Current probability of a `1` at every position.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl Model<Vec<bool>> for UnivariateBitModel {
    fn initialize(&mut self) {
        self.probabilities.fill(0.5);
    }

    fn update<'a, I>(&mut self, selected: I)
    where
        I: IntoIterator<Item = &'a Vec<bool>>,
    {
        self.counts.fill(0);
        let mut samples = 0u64;
        for point in selected {
            samples += 1;
            for (count, &bit) in self.counts.iter_mut().zip(point) {
                if bit {
                    *count += 1;
                }
            }
        }
        if samples == 0 {
            return;
        }

        let low = self.margin;
        let high = 1.0 - self.margin;
        for (p, &count) in self.probabilities.iter_mut().zip(&self.counts) {
            *p = (count as f64 / samples as f64).clamp(low, high);
        }
    }

    fn sample<R: Rng>(&self, dest: &mut Vec<bool>, rng: &mut R) {
        dest.resize(self.probabilities.len(), false);
        for (bit, &p) in dest.iter_mut().zip(&self.probabilities) {
            *bit = rng.random::<f64>() < p;
        }
    }
}

impl Describe for UnivariateBitModel {
    fn describe(&self, setup: &mut SetupDescription) {
        setup.entry("umda_margin", self.margin);
    }
}

impl fmt::Display for UnivariateBitModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("umda")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_update_estimates_frequencies() {
        let mut model = UnivariateBitModel::new(4);
        let selected = [
            vec![true, true, false, false],
            vec![true, false, false, true],
        ];
        model.update(selected.iter());
        assert_eq!(model.probabilities(), &[0.75, 0.5, 0.25, 0.5]);
    }

    #[test]
    fn test_initialize_resets_to_uniform() {
        let mut model = UnivariateBitModel::new(3);
        model.update([vec![true, true, true]].iter());
        model.initialize();
        assert_eq!(model.probabilities(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_sample_follows_model() {
        let mut model = UnivariateBitModel::new(10);
        model.update([vec![true; 10]].iter());
        let mut rng = StdRng::seed_from_u64(42);
        let mut ones = 0usize;
        let mut point = Vec::new();
        for _ in 0..200 {
            model.sample(&mut point, &mut rng);
            assert_eq!(point.len(), 10);
            ones += point.iter().filter(|&&b| b).count();
        }
        // p = 0.9 per bit
        assert!(ones > 1600, "expected mostly ones, got {ones}/2000");
    }

    #[test]
    fn test_empty_update_is_ignored() {
        let mut model = UnivariateBitModel::new(2);
        model.update(std::iter::empty());
        assert_eq!(model.probabilities(), &[0.5, 0.5]);
    }
}

//! Probability models for estimation-of-distribution algorithms.
//!
//! A [`Model`] is a samplable distribution over the search space that is
//! re-estimated every generation from the selected elite. Models live for
//! one restart epoch: the EDA resets them to the uninformative
//! distribution at every restart.
//!
//! # Implementations
//!
//! - [`UnivariateBitModel`]: UMDA over fixed-length bit strings

mod umda;

pub use umda::UnivariateBitModel;

use crate::setup::Describe;
use rand::Rng;

/// A samplable, updatable distribution over points of type `X`.
///
/// The [`Describe`] supertrait names the model in setup dumps.
pub trait Model<X>: Describe {
    /// Resets to the uninformative (uniform) distribution.
    fn initialize(&mut self);

    /// Re-estimates the distribution from the selected points.
    ///
    /// Callers must pass at least
    /// [`minimum_samples_needed_for_update`](Model::minimum_samples_needed_for_update)
    /// points.
    fn update<'a, I>(&mut self, selected: I)
    where
        I: IntoIterator<Item = &'a X>,
        X: 'a;

    /// Draws one point into `dest`. The result is always a valid point.
    fn sample<R: Rng>(&self, dest: &mut X, rng: &mut R);

    /// Same as [`sample`](Model::sample): a model acts as a nullary operator.
    fn apply<R: Rng>(&self, dest: &mut X, rng: &mut R) {
        self.sample(dest, rng);
    }

    /// The smallest selection size [`update`](Model::update) accepts.
    fn minimum_samples_needed_for_update(&self) -> usize {
        1
    }
}

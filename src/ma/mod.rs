//! Memetic algorithms: recombination plus local search.
//!
//! # Key Types
//!
//! - [`MaConfig`]: mu, lambda, local search step bound, clearing on/off
//! - [`Memetic`]: executes the generation loop
//!
//! Without clearing the algorithm runs a single epoch until the budget is
//! exhausted. With clearing, duplicate qualities are removed from the
//! parents every generation and the run restarts as soon as fewer than two
//! distinct qualities remain. Qualities are compared exactly, so clearing
//! is meant for objectives with discrete values.
//!
//! # References
//!
//! - Moscato (1989), "On Evolution, Search, Optimization, Genetic
//!   Algorithms and Martial Arts: Towards Memetic Algorithms"
//! - Pétrowski (1996), "A Clearing Procedure as a Niching Method for
//!   Genetic Algorithms"

mod clearing;
mod config;
mod runner;

pub use config::MaConfig;
pub use runner::Memetic;

//! Estimation-of-distribution algorithms with fitness assignment.
//!
//! Instead of varying individual points, an EDA samples a whole population
//! from a [`Model`](crate::model::Model) and re-estimates the model from the
//! selected part of it.
//!
//! # Key Types
//!
//! - [`EdaConfig`] / [`EdaWithFitness`]: the plain EDA
//! - [`HybridEdaConfig`] / [`HybridEdaWithFitness`]: every sample is refined
//!   by local search before selection
//!
//! Both restart from the uninformative model whenever `mu` is too small for
//! a model update.
//!
//! # References
//!
//! - Larrañaga & Lozano (2002), *Estimation of Distribution Algorithms*

mod config;
mod hybrid;
mod runner;

pub use config::{EdaConfig, HybridEdaConfig};
pub use hybrid::HybridEdaWithFitness;
pub use runner::EdaWithFitness;

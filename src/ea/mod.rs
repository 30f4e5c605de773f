//! (mu + lambda) evolutionary algorithm with fitness assignment.
//!
//! Parents are chosen by a pluggable [`FitnessAssignment`](crate::fitness::FitnessAssignment)
//! instead of raw quality. With [`DirectFitness`](crate::fitness::DirectFitness)
//! this is the plain (mu + lambda) EA, with
//! [`FrequencyFitness`](crate::fitness::FrequencyFitness) it becomes FEA.
//!
//! # Key Types
//!
//! - [`EaConfig`]: mu, lambda and crossover rate
//! - [`EaWithFitness`]: executes the generation loop
//!
//! # References
//!
//! - Weise et al. (2021), "Frequency Fitness Assignment: Making
//!   Optimization Algorithms Invariant under Bijective Transformations of
//!   the Objective Function Value"

mod config;
mod runner;

pub use config::{EaConfig, MAX_POPULATION};
pub use runner::EaWithFitness;

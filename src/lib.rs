//! Domain-agnostic black-box population search.
//!
//! Provides generic implementations of population-based metaheuristics that
//! only see a problem through a black-box process (oracle):
//!
//! - **EA with fitness assignment**: (mu + lambda) evolution whose selection
//!   is driven by a pluggable fitness process (direct, rank, FFA).
//! - **EDA with fitness assignment**: a probability model is re-estimated
//!   from the selected samples every generation, with restarts.
//! - **Hybrid EDA**: every sample is refined by local search before the
//!   model update.
//! - **Memetic Algorithm (MA)**: recombination plus first-improvement local
//!   search, optionally with clearing of duplicate qualities and restarts.
//!
//! # Architecture
//!
//! Algorithms never return results. They drive evaluations through a
//! [`BlackBoxProcess`](process::BlackBoxProcess), which counts the budget,
//! decides termination and remembers the best point. Problems plug in via
//! the traits in [`process`]; [`bitstrings`] is a ready-made kit for
//! fixed-length bit strings.
//!
//! Runs are single-threaded and fully reproducible from the process seed.

pub mod bitstrings;
pub mod ea;
pub mod eda;
pub mod error;
pub mod fitness;
mod local_search;
pub mod ma;
pub mod model;
pub mod population;
pub mod process;
pub mod setup;

pub use error::ConfigError;

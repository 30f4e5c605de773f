//! The black-box process: everything an algorithm consumes.
//!
//! Algorithms never see a concrete problem. They are handed a
//! [`BlackBoxProcess`], which lends them a random source, a
//! [`SearchSpace`], three search operators and an [`Evaluator`] that
//! counts every objective evaluation against a budget.
//!
//! # Core Traits
//!
//! - [`SearchSpace`]: creates and copies points
//! - [`NullaryOperator`], [`UnaryOperator`], [`BinaryOperator`]: search operators
//! - [`Evaluator`]: budget-counted evaluation plus termination predicate
//! - [`BlackBoxProcess`]: bundles all of the above as [`ProcessParts`]
//!
//! # Key Types
//!
//! - [`BudgetProcess`]: a ready-made process with FE / time / goal budgets
//! - [`BudgetConfig`]: its configuration

mod budget;
mod types;

pub use budget::{BudgetConfig, BudgetEvaluator, BudgetProcess};
pub use types::{
    BinaryOperator, BlackBoxProcess, Evaluator, NullaryOperator, ObjectiveFunction,
    ProcessParts, SearchSpace, UnaryOperator,
};

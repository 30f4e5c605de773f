//! Fixed-length bit strings (`Vec<bool>`): space, operators and benchmark
//! objectives.
//!
//! This is the smallest complete problem kit for the algorithms in this
//! crate and doubles as the reference implementation of the operator
//! contracts.
//!
//! # Operators
//!
//! - [`RandomBits`]: uniform random bit string (nullary)
//! - [`SingleBitFlip`]: flip one bit; neighborhood of size n (unary)
//! - [`DoubleBitFlip`]: flip one or two bits; neighborhood of size n(n+1)/2 (unary)
//! - [`UniformCrossover`]: each bit from either parent (binary)
//!
//! # Objectives (all minimized, optimum 0)
//!
//! - [`ZeroCount`]: number of zero bits (OneMax)
//! - [`LeadingOnes`]: n minus the number of leading ones
//! - [`TwoMax`]: two symmetric slopes, only the all-ones string is optimal

mod objectives;
mod operators;

pub use objectives::{LeadingOnes, TwoMax, ZeroCount};
pub use operators::{DoubleBitFlip, RandomBits, SingleBitFlip, UniformCrossover};

use crate::process::SearchSpace;

/// The space of bit strings of one fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitStringSpace {
    length: usize,
}

impl BitStringSpace {
    /// # Panics
    /// Panics if `length` is zero.
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "bit string length must be positive");
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl SearchSpace for BitStringSpace {
    type Point = Vec<bool>;

    fn create(&self) -> Vec<bool> {
        vec![false; self.length]
    }

    fn copy(&self, src: &Vec<bool>, dst: &mut Vec<bool>) {
        dst.clone_from(src);
    }
}

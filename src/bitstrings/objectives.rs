//! Benchmark objective functions on bit strings.

use crate::process::ObjectiveFunction;
use std::fmt;

/// Number of zero bits. The all-ones string is the only optimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroCount;

impl ObjectiveFunction<Vec<bool>> for ZeroCount {
    fn evaluate(&self, point: &Vec<bool>) -> f64 {
        point.iter().filter(|&&b| !b).count() as f64
    }

    fn lower_bound(&self) -> f64 {
        0.0
    }
}

/// `n` minus the length of the leading run of ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadingOnes;

impl ObjectiveFunction<Vec<bool>> for LeadingOnes {
    fn evaluate(&self, point: &Vec<bool>) -> f64 {
        let leading = point.iter().take_while(|&&b| b).count();
        (point.len() - leading) as f64
    }

    fn lower_bound(&self) -> f64 {
        0.0
    }
}

/// Two slopes towards all-ones and all-zeros.
///
/// All-ones scores 0, all-zeros scores 1 (a deceptive local optimum),
/// everything else `1 + n - max(ones, zeros)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoMax;

impl ObjectiveFunction<Vec<bool>> for TwoMax {
    fn evaluate(&self, point: &Vec<bool>) -> f64 {
        let n = point.len();
        let ones = point.iter().filter(|&&b| b).count();
        if ones == n {
            return 0.0;
        }
        (1 + n - ones.max(n - ones)) as f64
    }

    fn lower_bound(&self) -> f64 {
        0.0
    }
}

impl fmt::Display for ZeroCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("zerocount")
    }
}

impl fmt::Display for LeadingOnes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("leadingones")
    }
}

impl fmt::Display for TwoMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("twomax")
    }
}

//! Bounded first-improvement local search.
//!
//! Shared by the hybrid EDA and the memetic algorithms. One step scans the
//! unary operator's neighborhood until the first strictly better neighbor
//! shows up, adopts it and starts the next scan from there.

use crate::process::{BlackBoxProcess, Evaluator, ProcessParts, UnaryOperator};
use std::mem;

/// How a local search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Refinement {
    /// A complete scan found no better neighbor: the point is a local optimum.
    Optimum,
    /// The step bound was hit while still improving.
    StepLimit,
    /// The process demanded termination.
    Terminated,
}

/// Refines `point` (of quality `quality`) in place.
///
/// At most `max_steps` improving scans are performed. `temp` is scratch
/// storage for candidates; it ends up holding an arbitrary point.
pub(crate) fn refine<P: BlackBoxProcess + ?Sized>(
    parts: &mut ProcessParts<'_, P>,
    point: &mut P::Point,
    quality: &mut f64,
    temp: &mut P::Point,
    max_steps: usize,
) -> Refinement {
    let mut steps = max_steps;
    loop {
        let current = *quality;
        let mut better: Option<f64> = None;
        let evaluator = &mut *parts.evaluator;

        parts.unary.enumerate(&mut *parts.rng, point, temp, |candidate| {
            let q = evaluator.evaluate(candidate);
            if q < current {
                better = Some(q);
                return true;
            }
            evaluator.should_terminate()
        });

        if let Some(q) = better {
            mem::swap(point, temp);
            *quality = q;
        }
        if parts.should_terminate() {
            return Refinement::Terminated;
        }
        if better.is_none() {
            return Refinement::Optimum;
        }
        steps -= 1;
        if steps == 0 {
            return Refinement::StepLimit;
        }
    }
}

//! The generation loop of the memetic algorithm with clearing.
//!
//! Records live in a fixed arena for the whole run; a generation only
//! permutes the index buffers in front of it. Clearing reads the sorted
//! front buffer and writes the unique-quality prefix plus the duplicate
//! suffix into the back buffer, which then becomes authoritative.

use super::config::MaConfig;
use crate::local_search::{refine, Refinement};
use crate::population::{by_quality, clear_duplicates, distinct_index, fair_shuffle, DoubleBuffer, LsRecord};
use crate::process::{BinaryOperator, BlackBoxProcess, NullaryOperator, ProcessParts, SearchSpace};
use crate::setup::RunStats;
use std::mem;

pub(super) fn solve_with_clearing<P: BlackBoxProcess + ?Sized>(
    config: &MaConfig,
    parts: &mut ProcessParts<'_, P>,
) -> RunStats {
    let MaConfig {
        mu,
        lambda,
        max_ls_steps,
        ..
    } = *config;
    let size = mu + lambda;
    let mut stats = RunStats::default();

    let mut arena: Vec<LsRecord<P::Point>> = Vec::with_capacity(size);
    let mut order = DoubleBuffer::new((0..size).collect::<Vec<usize>>());
    let mut temp = parts.space.create();

    'restart: while !parts.should_terminate() {
        for slot in 0..size {
            if slot == arena.len() {
                arena.push(LsRecord::new(parts.space.create(), f64::INFINITY));
            }
            let record = &mut arena[slot];
            parts.nullary.apply(&mut record.point, parts.rng);
            record.quality = parts.evaluate(&record.point);
            record.is_optimum = false;
            if parts.should_terminate() {
                return stats;
            }
        }

        // after the first generation only the fresh offspring are refined
        let mut ls_start = 0;

        while !parts.should_terminate() {
            for &slot in order.front()[ls_start..].iter().rev() {
                let record = &mut arena[slot];
                if record.is_optimum {
                    continue;
                }
                match refine(parts, &mut record.point, &mut record.quality, &mut temp, max_ls_steps) {
                    Refinement::Terminated => return stats,
                    outcome => record.is_optimum = outcome == Refinement::Optimum,
                }
            }

            fair_shuffle(parts.rng, order.front_mut(), 0, size);
            order
                .front_mut()
                .sort_by(|&a, &b| by_quality(&arena[a], &arena[b]));

            let unique = clear_duplicates(&arena, &mut order, mu);
            if unique <= 1 {
                stats.restarts += 1;
                tracing::debug!(
                    restart = stats.restarts,
                    generation = stats.generations,
                    "fewer than two distinct qualities left"
                );
                continue 'restart;
            }

            fair_shuffle(parts.rng, order.front_mut(), 0, unique);
            let ranked = order.front();
            let mut p1 = unique - 1;
            for &dest in ranked[unique..].iter().rev() {
                if parts.should_terminate() {
                    return stats;
                }
                p1 = (p1 + 1) % unique;
                let p2 = distinct_index(parts.rng, unique, p1);
                parts.binary.apply(
                    &arena[ranked[p1]].point,
                    &arena[ranked[p2]].point,
                    &mut temp,
                    parts.rng,
                );
                let record = &mut arena[dest];
                mem::swap(&mut record.point, &mut temp);
                record.quality = parts.evaluate(&record.point);
                record.is_optimum = false;
            }

            ls_start = mu;
            stats.generations += 1;
            tracing::trace!(generation = stats.generations, unique, "generation done");
        }
    }
    stats
}

//! Population records and the utilities shared by all algorithms.
//!
//! # Records
//!
//! - [`Record`]: point + quality
//! - [`FitnessRecord`]: point + quality + fitness (fitness-based EA/EDA)
//! - [`LsRecord`]: point + quality + local-optimum flag (memetic family)
//!
//! # Utilities
//!
//! - [`fair_shuffle`]: reproducible Fisher–Yates over a sub-range
//! - [`DoubleBuffer`]: two same-length arrays, exactly one authoritative
//! - [`clear_duplicates`]: quality-based clearing over a sorted order

use rand::Rng;
use std::cmp::Ordering;

/// Access to the quality of a population record.
pub trait Quality {
    /// The objective value. Lower is better.
    fn quality(&self) -> f64;
}

/// A point and its quality.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<X> {
    pub point: X,
    pub quality: f64,
}

impl<X> Record<X> {
    pub fn new(point: X, quality: f64) -> Self {
        Self { point, quality }
    }
}

/// A point, its quality and the fitness derived from the whole population.
///
/// `fitness` is only meaningful relative to the other records of the same
/// fitness assignment call.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessRecord<X> {
    pub point: X,
    pub quality: f64,
    pub fitness: f64,
}

impl<X> FitnessRecord<X> {
    /// Creates a record whose fitness is not yet assigned.
    pub fn new(point: X, quality: f64) -> Self {
        Self {
            point,
            quality,
            fitness: f64::INFINITY,
        }
    }
}

/// A point, its quality, and whether it is a verified local optimum.
///
/// `is_optimum` is set by local search when a full scan of the unary
/// operator's neighborhood found no strictly better neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct LsRecord<X> {
    pub point: X,
    pub quality: f64,
    pub is_optimum: bool,
}

impl<X> LsRecord<X> {
    /// Creates a record that still has to be refined.
    pub fn new(point: X, quality: f64) -> Self {
        Self {
            point,
            quality,
            is_optimum: false,
        }
    }
}

impl<X> Quality for Record<X> {
    fn quality(&self) -> f64 {
        self.quality
    }
}

impl<X> Quality for FitnessRecord<X> {
    fn quality(&self) -> f64 {
        self.quality
    }
}

impl<X> Quality for LsRecord<X> {
    fn quality(&self) -> f64 {
        self.quality
    }
}

/// Orders records by ascending quality (best first).
pub fn by_quality<T: Quality>(a: &T, b: &T) -> Ordering {
    a.quality().total_cmp(&b.quality())
}

/// Orders records by ascending fitness (best first).
pub fn by_fitness<X>(a: &FitnessRecord<X>, b: &FitnessRecord<X>) -> Ordering {
    a.fitness.total_cmp(&b.fitness)
}

/// Shuffles `items[start..start + count]` in place.
///
/// Fisher–Yates from the top of the range down: each of the `count - 1`
/// swaps consumes exactly one `random_range` draw, so a seeded rng always
/// produces the same permutation. Elements outside the range are untouched.
///
/// # Panics
/// Panics if `start + count > items.len()`.
pub fn fair_shuffle<T, R: Rng>(rng: &mut R, items: &mut [T], start: usize, count: usize) {
    assert!(start + count <= items.len(), "shuffle range out of bounds");
    for i in (2..=count).rev() {
        let j = start + rng.random_range(0..i);
        items.swap(start + i - 1, j);
    }
}

/// Draws a uniform index in `0..count` different from `excluded`.
///
/// Rejection sampling: redraws until the index differs.
///
/// # Panics
/// Panics if `count < 2`.
pub fn distinct_index<R: Rng>(rng: &mut R, count: usize, excluded: usize) -> usize {
    assert!(count >= 2, "need at least two indices to pick a distinct one");
    loop {
        let index = rng.random_range(0..count);
        if index != excluded {
            return index;
        }
    }
}

/// Two same-length buffers of which exactly one is authoritative.
///
/// A pass reads the front buffer, writes the back buffer completely, then
/// calls [`flip`](DoubleBuffer::flip). Neither buffer is ever resized.
#[derive(Debug, Clone)]
pub struct DoubleBuffer<T> {
    buffers: [Vec<T>; 2],
    active: usize,
}

impl<T: Clone> DoubleBuffer<T> {
    /// Creates the buffer with `initial` as the authoritative content.
    pub fn new(initial: Vec<T>) -> Self {
        let back = initial.clone();
        Self {
            buffers: [initial, back],
            active: 0,
        }
    }
}

impl<T> DoubleBuffer<T> {
    /// The authoritative buffer.
    pub fn front(&self) -> &[T] {
        &self.buffers[self.active]
    }

    /// The authoritative buffer, mutably.
    pub fn front_mut(&mut self) -> &mut [T] {
        &mut self.buffers[self.active]
    }

    /// The authoritative buffer and the scratch buffer.
    pub fn split(&mut self) -> (&[T], &mut [T]) {
        let [a, b] = &mut self.buffers;
        if self.active == 0 {
            (a.as_slice(), b.as_mut_slice())
        } else {
            (b.as_slice(), a.as_mut_slice())
        }
    }

    /// Makes the scratch buffer authoritative.
    pub fn flip(&mut self) {
        self.active ^= 1;
    }

    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers[0].is_empty()
    }
}

/// Moves records with duplicate quality behind the unique ones.
///
/// `order` holds indices into `arena`; its front buffer must be sorted by
/// ascending quality. The pass writes the back buffer and flips, so that
/// afterwards the first `u` entries of the front buffer have pairwise
/// distinct qualities, `u` being the number of distinct qualities capped
/// at `limit`. Duplicates are written from the end backwards. Once `limit`
/// unique records are collected, the rest is copied over in bulk: those
/// slots are going to be overwritten anyway.
///
/// Qualities are compared exactly, which suits integer-valued objectives.
///
/// Returns `u`.
pub fn clear_duplicates<T: Quality>(
    arena: &[T],
    order: &mut DoubleBuffer<usize>,
    limit: usize,
) -> usize {
    let (sorted, dest) = order.split();
    let mut unique = 0;
    let mut end = sorted.len();

    for (done, &slot) in sorted.iter().enumerate() {
        if unique == 0 || arena[slot].quality() > arena[dest[unique - 1]].quality() {
            dest[unique] = slot;
            unique += 1;
            if unique >= limit {
                dest[unique..end].copy_from_slice(&sorted[done + 1..]);
                break;
            }
        } else {
            end -= 1;
            dest[end] = slot;
        }
    }

    order.flip();
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena(qualities: &[f64]) -> Vec<Record<()>> {
        qualities.iter().map(|&q| Record::new((), q)).collect()
    }

    fn sorted_order(arena: &[Record<()>]) -> DoubleBuffer<usize> {
        let mut order: Vec<usize> = (0..arena.len()).collect();
        order.sort_by(|&a, &b| by_quality(&arena[a], &arena[b]));
        DoubleBuffer::new(order)
    }

    #[test]
    fn test_fair_shuffle_only_touches_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<usize> = (0..10).collect();
        fair_shuffle(&mut rng, &mut items, 2, 5);
        assert_eq!(&items[..2], &[0, 1]);
        assert_eq!(&items[7..], &[7, 8, 9]);
        let mut middle = items[2..7].to_vec();
        middle.sort_unstable();
        assert_eq!(middle, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_fair_shuffle_reproducible() {
        let mut a: Vec<usize> = (0..20).collect();
        let mut b = a.clone();
        fair_shuffle(&mut StdRng::seed_from_u64(7), &mut a, 0, 20);
        fair_shuffle(&mut StdRng::seed_from_u64(7), &mut b, 0, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fair_shuffle_consumes_one_draw_per_swap() {
        let mut items: Vec<usize> = (0..6).collect();
        let mut rng = StdRng::seed_from_u64(3);
        fair_shuffle(&mut rng, &mut items, 0, 6);
        let after_shuffle: u64 = rng.random();

        let mut replay = StdRng::seed_from_u64(3);
        for i in (2..=6).rev() {
            let _ = replay.random_range(0..i);
        }
        assert_eq!(after_shuffle, replay.random::<u64>());
    }

    #[test]
    fn test_fair_shuffle_small_ranges_draw_nothing() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut items = vec![1, 2, 3];
        fair_shuffle(&mut rng, &mut items, 1, 1);
        fair_shuffle(&mut rng, &mut items, 0, 0);
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(rng.random::<u64>(), StdRng::seed_from_u64(11).random::<u64>());
    }

    #[test]
    fn test_distinct_index() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            assert_eq!(distinct_index(&mut rng, 2, 0), 1);
            let i = distinct_index(&mut rng, 5, 3);
            assert!(i < 5 && i != 3);
        }
    }

    #[test]
    fn test_record_orderings() {
        let mut records = vec![
            FitnessRecord { point: 'a', quality: 3.0, fitness: 1.0 },
            FitnessRecord { point: 'b', quality: 1.0, fitness: 2.0 },
            FitnessRecord { point: 'c', quality: 2.0, fitness: 0.0 },
        ];
        records.sort_by(by_quality);
        assert_eq!(records.iter().map(|r| r.point).collect::<String>(), "bca");
        records.sort_by(by_fitness);
        assert_eq!(records.iter().map(|r| r.point).collect::<String>(), "cab");
    }

    #[test]
    fn test_double_buffer_flip() {
        let mut buffer = DoubleBuffer::new(vec![1, 2, 3]);
        {
            let (front, back) = buffer.split();
            for (b, f) in back.iter_mut().zip(front.iter().rev()) {
                *b = *f;
            }
        }
        assert_eq!(buffer.front(), &[1, 2, 3]);
        buffer.flip();
        assert_eq!(buffer.front(), &[3, 2, 1]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_clear_duplicates_example() {
        let arena = arena(&[3.0, 1.0, 1.0, 2.0, 3.0, 1.0]);
        let mut order = sorted_order(&arena);
        let unique = clear_duplicates(&arena, &mut order, 6);
        assert_eq!(unique, 3);
        let qualities: Vec<f64> = order.front()[..unique]
            .iter()
            .map(|&i| arena[i].quality)
            .collect();
        assert_eq!(qualities, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clear_duplicates_stops_at_limit() {
        let arena = arena(&[5.0, 4.0, 3.0, 2.0, 1.0, 1.0]);
        let mut order = sorted_order(&arena);
        let unique = clear_duplicates(&arena, &mut order, 2);
        assert_eq!(unique, 2);
        assert_eq!(&order.front()[..2], &[4, 3]);
    }

    #[test]
    fn test_clear_duplicates_single_quality() {
        let arena = arena(&[7.0; 5]);
        let mut order = sorted_order(&arena);
        assert_eq!(clear_duplicates(&arena, &mut order, 3), 1);
    }

    proptest! {
        #[test]
        fn prop_fair_shuffle_is_permutation(len in 0usize..40, seed in any::<u64>()) {
            let mut items: Vec<usize> = (0..len).collect();
            fair_shuffle(&mut StdRng::seed_from_u64(seed), &mut items, 0, len);
            items.sort_unstable();
            prop_assert_eq!(items, (0..len).collect::<Vec<_>>());
        }

        #[test]
        fn prop_clear_duplicates_prefix_is_unique(
            qualities in prop::collection::vec(0u8..6, 3..30),
            limit in 2usize..12,
        ) {
            let qualities: Vec<f64> = qualities.into_iter().map(f64::from).collect();
            let arena = arena(&qualities);
            let mut order = sorted_order(&arena);
            let unique = clear_duplicates(&arena, &mut order, limit);

            let mut distinct = qualities.clone();
            distinct.sort_by(f64::total_cmp);
            distinct.dedup();
            prop_assert_eq!(unique, distinct.len().min(limit));

            let prefix: Vec<f64> = order.front()[..unique].iter().map(|&i| arena[i].quality).collect();
            prop_assert!(prefix.windows(2).all(|w| w[0] < w[1]));

            let mut all = order.front().to_vec();
            all.sort_unstable();
            prop_assert_eq!(all, (0..qualities.len()).collect::<Vec<_>>());
        }
    }
}

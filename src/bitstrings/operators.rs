//! Search operators for bit strings.

use crate::population::fair_shuffle;
use crate::process::{BinaryOperator, NullaryOperator, UnaryOperator};
use rand::Rng;
use std::fmt;

/// Samples every bit uniformly at random.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomBits;

impl NullaryOperator<Vec<bool>> for RandomBits {
    fn apply<R: Rng>(&self, dest: &mut Vec<bool>, rng: &mut R) {
        for bit in dest.iter_mut() {
            *bit = rng.random();
        }
    }
}

/// Flips exactly one bit.
///
/// Enumeration visits the n single-flip neighbors in random order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleBitFlip;

impl UnaryOperator<Vec<bool>> for SingleBitFlip {
    fn apply<R: Rng>(&self, src: &Vec<bool>, dest: &mut Vec<bool>, rng: &mut R) {
        dest.clone_from(src);
        let i = rng.random_range(0..dest.len());
        dest[i] = !dest[i];
    }

    fn can_enumerate(&self) -> bool {
        true
    }

    fn enumerate<R, V>(&self, rng: &mut R, src: &Vec<bool>, dest: &mut Vec<bool>, mut visitor: V) -> bool
    where
        R: Rng,
        V: FnMut(&Vec<bool>) -> bool,
    {
        dest.clone_from(src);
        let indexes = shuffled_indexes(dest.len(), rng);
        for i in indexes {
            dest[i] = !dest[i];
            if visitor(&*dest) {
                return true;
            }
            dest[i] = !dest[i];
        }
        false
    }
}

/// Flips one bit and, with probability `(n-1)/n`, a second different one.
///
/// Enumeration visits all one- and two-flip neighbors, ordered by a random
/// permutation of the bit positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleBitFlip;

impl UnaryOperator<Vec<bool>> for DoubleBitFlip {
    fn apply<R: Rng>(&self, src: &Vec<bool>, dest: &mut Vec<bool>, rng: &mut R) {
        dest.clone_from(src);
        let i = rng.random_range(0..dest.len());
        dest[i] = !dest[i];
        let j = rng.random_range(0..dest.len());
        if i != j {
            dest[j] = !dest[j];
        }
    }

    fn can_enumerate(&self) -> bool {
        true
    }

    fn enumerate<R, V>(&self, rng: &mut R, src: &Vec<bool>, dest: &mut Vec<bool>, mut visitor: V) -> bool
    where
        R: Rng,
        V: FnMut(&Vec<bool>) -> bool,
    {
        dest.clone_from(src);
        let indexes = shuffled_indexes(dest.len(), rng);
        for (a, &i) in indexes.iter().enumerate() {
            dest[i] = !dest[i];
            if visitor(&*dest) {
                return true;
            }
            for &j in &indexes[..a] {
                dest[j] = !dest[j];
                if visitor(&*dest) {
                    return true;
                }
                dest[j] = !dest[j];
            }
            dest[i] = !dest[i];
        }
        false
    }
}

fn shuffled_indexes<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indexes: Vec<usize> = (0..n).collect();
    fair_shuffle(rng, &mut indexes, 0, n);
    indexes
}

/// Takes every bit from a uniformly chosen parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformCrossover;

impl BinaryOperator<Vec<bool>> for UniformCrossover {
    fn apply<R: Rng>(&self, parent_a: &Vec<bool>, parent_b: &Vec<bool>, dest: &mut Vec<bool>, rng: &mut R) {
        dest.clear();
        dest.extend(
            parent_a
                .iter()
                .zip(parent_b)
                .map(|(&a, &b)| if rng.random::<bool>() { a } else { b }),
        );
    }
}

impl fmt::Display for RandomBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("random")
    }
}

impl fmt::Display for SingleBitFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("1flip")
    }
}

impl fmt::Display for DoubleBitFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("2flip")
    }
}

impl fmt::Display for UniformCrossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("uniform")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn hamming(a: &[bool], b: &[bool]) -> usize {
        a.iter().zip(b).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_single_flip_changes_one_bit() {
        let mut rng = StdRng::seed_from_u64(42);
        let src = vec![false; 12];
        let mut dest = Vec::new();
        for _ in 0..50 {
            SingleBitFlip.apply(&src, &mut dest, &mut rng);
            assert_eq!(hamming(&src, &dest), 1);
        }
    }

    #[test]
    fn test_single_flip_enumerates_whole_neighborhood() {
        let mut rng = StdRng::seed_from_u64(1);
        let src = vec![true, false, true, false, false];
        let mut dest = Vec::new();
        let mut seen = HashSet::new();
        let stopped = SingleBitFlip.enumerate(&mut rng, &src, &mut dest, |x| {
            assert_eq!(hamming(&src, x), 1);
            seen.insert(x.clone());
            false
        });
        assert!(!stopped);
        assert_eq!(seen.len(), 5);
        assert_eq!(dest, src);
    }

    #[test]
    fn test_enumeration_stops_and_keeps_candidate() {
        let mut rng = StdRng::seed_from_u64(2);
        let src = vec![false; 8];
        let mut dest = Vec::new();
        let mut last = Vec::new();
        let mut visits = 0;
        let stopped = DoubleBitFlip.enumerate(&mut rng, &src, &mut dest, |x| {
            visits += 1;
            last = x.clone();
            visits == 3
        });
        assert!(stopped);
        assert_eq!(visits, 3);
        assert_eq!(dest, last);
    }

    #[test]
    fn test_double_flip_enumerates_whole_neighborhood() {
        let mut rng = StdRng::seed_from_u64(3);
        let src = vec![false; 6];
        let mut dest = Vec::new();
        let mut seen = HashSet::new();
        DoubleBitFlip.enumerate(&mut rng, &src, &mut dest, |x| {
            let d = hamming(&src, x);
            assert!(d == 1 || d == 2);
            seen.insert(x.clone());
            false
        });
        assert_eq!(seen.len(), 6 + 15);
    }

    #[test]
    fn test_double_flip_apply_distance() {
        let mut rng = StdRng::seed_from_u64(4);
        let src = vec![true; 10];
        let mut dest = Vec::new();
        for _ in 0..50 {
            DoubleBitFlip.apply(&src, &mut dest, &mut rng);
            let d = hamming(&src, &dest);
            assert!(d == 1 || d == 2);
        }
    }

    #[test]
    fn test_uniform_crossover_takes_bits_from_parents() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = vec![true; 16];
        let b = vec![false; 16];
        let mut dest = vec![true; 3];
        UniformCrossover.apply(&a, &b, &mut dest, &mut rng);
        assert_eq!(dest.len(), 16);
        assert!(dest.iter().any(|&x| x) && dest.iter().any(|&x| !x));

        UniformCrossover.apply(&a, &a, &mut dest, &mut rng);
        assert_eq!(dest, a);
    }

    #[test]
    fn test_random_bits_is_random() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut x = vec![false; 64];
        RandomBits.apply(&mut x, &mut rng);
        let ones = x.iter().filter(|&&b| b).count();
        assert!(ones > 10 && ones < 54, "got {ones} ones");
    }
}

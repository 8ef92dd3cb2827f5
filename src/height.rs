//! Sources of randomness for node heights.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// The seed [SkipList::new](crate::SkipList::new) hands to its [SeededHeights].
pub const DEFAULT_SEED: u64 = 0;

/// Supplies the random numbers a [SkipList](crate::SkipList) draws its node heights from.
///
/// A list of maximum height `h` asks for one number in `[0, h - 1]` per inserted node and
/// gives the node a height one greater than that.
pub trait HeightSource {
    /// Returns a number uniformly distributed over `[0, upper]`, `upper` included.
    fn next_in_range(&mut self, upper: usize) -> usize;
}

/// The default [HeightSource]: a [StdRng] seeded with a fixed value, so that the heights drawn
/// for a given insertion order are reproducible.
#[derive(Clone, Debug)]
pub struct SeededHeights {
    rng: StdRng,
}

impl SeededHeights {
    pub fn new(seed: u64) -> Self {
        SeededHeights {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededHeights {
    fn default() -> Self {
        SeededHeights::new(DEFAULT_SEED)
    }
}

impl HeightSource for SeededHeights {
    fn next_in_range(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..=upper)
    }
}

impl<H: HeightSource + ?Sized> HeightSource for &mut H {
    fn next_in_range(&mut self, upper: usize) -> usize {
        (**self).next_in_range(upper)
    }
}

impl<H: HeightSource + ?Sized> HeightSource for Box<H> {
    fn next_in_range(&mut self, upper: usize) -> usize {
        (**self).next_in_range(upper)
    }
}

#[cfg(test)]
mod height_test {
    use super::*;

    #[test]
    fn test_in_range() {
        let mut heights = SeededHeights::default();

        for upper in 0..32 {
            for _ in 0..100 {
                assert!(heights.next_in_range(upper) <= upper);
            }
        }
    }

    #[test]
    fn test_reproducible() {
        let mut a = SeededHeights::new(42);
        let mut b = SeededHeights::new(42);

        let a = (0..1_000).map(|_| a.next_in_range(15)).collect::<Vec<_>>();
        let b = (0..1_000).map(|_| b.next_in_range(15)).collect::<Vec<_>>();

        assert_eq!(a, b);
    }

    #[test]
    fn test_covers_range() {
        let mut heights = SeededHeights::new(7);
        let mut seen = [false; 8];

        for _ in 0..10_000 {
            seen[heights.next_in_range(7)] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_zero_upper() {
        let mut heights = SeededHeights::new(3);

        assert!((0..100).all(|_| heights.next_in_range(0) == 0));
    }
}

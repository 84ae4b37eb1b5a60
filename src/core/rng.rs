//! Injectable randomness for dice, enemy picks, and reward offers.
//!
//! ## Key Types
//!
//! - `RandomSource`: the seam every random consumer is generic over
//! - `GameRng`: seeded ChaCha8 source for real runs
//! - `ScriptedRng`: replays a fixed sequence, for deterministic tests
//!
//! ```
//! use dice_duel::core::{GameRng, RandomSource};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! // Same seed, same dice
//! assert_eq!(rng1.roll_die(), rng2.roll_die());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of faces on a combat die.
pub const DIE_FACES: usize = 6;

/// Source of uniform random integers.
///
/// Implementors only provide `next_below`; dice, picks, and shuffles are
/// derived from it so that a scripted source controls all of them.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is always > 0.
    fn next_below(&mut self, bound: usize) -> usize;

    /// Roll one six-sided die (1..=6).
    fn roll_die(&mut self) -> u8 {
        (self.next_below(DIE_FACES) + 1) as u8
    }

    /// Choose a random element from a slice.
    fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if slice.is_empty() {
            return None;
        }
        slice.get(self.next_below(slice.len()))
    }

    /// Shuffle a slice in place (Fisher-Yates).
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Deterministic seeded RNG.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Replays a fixed sequence of raw values, cycling when exhausted.
///
/// Each call to `next_below(bound)` returns `value % bound`, so a script of
/// `[5]` rolls every die as a 6 and always picks the last pool entry.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a scripted source. An empty script behaves like `[0]`.
    #[must_use]
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, cursor: 0 }
    }

    /// Script that rolls the given dice faces (1..=6) in order.
    #[must_use]
    pub fn dice(faces: &[u8]) -> Self {
        Self::new(faces.iter().map(|f| usize::from(f.saturating_sub(1))).collect::<Vec<_>>())
    }

    /// How many values have been drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, bound: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_below(1000), rng2.next_below(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next_below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next_below(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_range() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; DIE_FACES];

        for _ in 0..600 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] = true;
        }

        assert!(seen.iter().all(|s| *s), "every face should appear in 600 rolls");
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_pick() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.pick(&items);
        assert!(chosen.is_some_and(|c| items.contains(c)));

        let empty: Vec<i32> = vec![];
        assert!(rng.pick(&empty).is_none());
    }

    #[test]
    fn test_scripted_dice() {
        let mut rng = ScriptedRng::dice(&[4, 3, 2, 5]);

        assert_eq!(rng.roll_die(), 4);
        assert_eq!(rng.roll_die(), 3);
        assert_eq!(rng.roll_die(), 2);
        assert_eq!(rng.roll_die(), 5);
        // Cycles
        assert_eq!(rng.roll_die(), 4);
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn test_scripted_wraps_bound() {
        let mut rng = ScriptedRng::new(vec![7]);
        assert_eq!(rng.next_below(3), 1);

        let mut empty = ScriptedRng::new(Vec::new());
        assert_eq!(empty.next_below(10), 0);
    }

    #[test]
    fn test_scripted_shuffle_is_permutation() {
        let mut rng = ScriptedRng::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let mut data: Vec<u32> = (0..10).collect();

        rng.shuffle(&mut data);
        data.sort();

        assert_eq!(data, (0..10).collect::<Vec<_>>());
    }
}

//! 7-bag randomizer for piece generation
//!
//! All 7 pieces are shuffled, then dealt out one at a time before the next
//! bag is shuffled. No type can repeat within a bag.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::tetromino::PieceType;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Upcoming pieces; always whole bags appended in order
    queue: VecDeque<PieceType>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a new bag randomizer with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic bag randomizer
    pub fn with_seed(seed: u64) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(14),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        };
        bag.refill();
        bag
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the next piece
    pub fn next(&mut self) -> PieceType {
        loop {
            if let Some(piece) = self.queue.pop_front() {
                return piece;
            }
            self.refill();
        }
    }

    /// Preview the next `count` pieces without removing them.
    ///
    /// Shuffles the following bag early if the current one runs short; the
    /// dealt order is the same either way.
    pub fn preview(&mut self, count: usize) -> Vec<PieceType> {
        while self.queue.len() < count {
            self.refill();
        }
        self.queue.iter().take(count).copied().collect()
    }

    /// Append a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = PieceType::all();
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::new();
        let pieces: HashSet<_> = (0..7).map(|_| bag.next()).collect();
        assert_eq!(pieces.len(), 7);
    }

    #[test]
    fn test_two_bags_each_type_twice() {
        let mut bag = Bag::with_seed(42);
        let pieces: Vec<_> = (0..14).map(|_| bag.next()).collect();
        for kind in PieceType::all() {
            assert_eq!(pieces.iter().filter(|&&p| p == kind).count(), 2);
        }
        for run in pieces.chunks(7) {
            let unique: HashSet<_> = run.iter().collect();
            assert_eq!(unique.len(), 7);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(7);
        let mut b = Bag::with_seed(7);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_preview_matches_next() {
        let mut bag = Bag::with_seed(3);
        let preview = bag.preview(10);
        assert_eq!(preview.len(), 10);
        let dealt: Vec<_> = (0..10).map(|_| bag.next()).collect();
        assert_eq!(preview, dealt);
    }

    #[test]
    fn test_many_pieces() {
        let mut bag = Bag::with_seed(99);
        let pieces: Vec<_> = (0..700).map(|_| bag.next()).collect();
        for run in pieces.chunks(7) {
            let unique: HashSet<_> = run.iter().collect();
            assert_eq!(unique.len(), 7);
        }
    }
}

use num_traits::float::Float;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::segment::LineSegment;

/// Decides the order in which segments are inserted into the decomposition.
pub trait InsertionOrder {
    fn arrange<T: Float>(&mut self, segments: &mut [LineSegment<T>]);
}

/// Inserts segments in the order the polygon lists its edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrder;

impl InsertionOrder for InputOrder {
    fn arrange<T: Float>(&mut self, _segments: &mut [LineSegment<T>]) {}
}

/// Inserts segments in a seeded random order.
///
/// Random order is what gives the search structure its expected logarithmic depth.
#[derive(Clone, Debug)]
pub struct Shuffled {
    rng: ChaCha8Rng,
}

impl Shuffled {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Shuffled {
    fn default() -> Self {
        Self::new(1234)
    }
}

impl InsertionOrder for Shuffled {
    fn arrange<T: Float>(&mut self, segments: &mut [LineSegment<T>]) {
        segments.shuffle(&mut self.rng);
    }
}

use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::{CATALOG_LEN, Shape};

/// Supplies the next piece to spawn. Injecting this keeps piece selection
/// swappable: seeded PRNG in the binary, fixed sequences in tests.
pub trait ShapeSource: fmt::Debug {
    fn next_shape(&mut self) -> Shape;
}

/// Uniform catalog draw backed by a small, fast PRNG. A fixed seed reproduces
/// the exact piece sequence.
#[derive(Debug, Clone)]
pub struct RandomShapeSource {
    rng: Pcg32,
}

impl RandomShapeSource {
    /// Creates a source seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShapeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeSource for RandomShapeSource {
    fn next_shape(&mut self) -> Shape {
        Shape::from_catalog(self.rng.random_range(0..CATALOG_LEN))
    }
}

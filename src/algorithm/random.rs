//! Random choices consumed by the evolution loop
//!
//! The engine never touches a global generator. Every draw goes through a
//! [`PixelSource`], so a run is reproducible from its seed and tests can
//! script the exact sequence of mutations.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Supplier of the two kinds of random decision the engine makes
pub trait PixelSource {
    /// Value for one cell of the initial noise grid
    fn initial_pixel(&mut self) -> bool;

    /// Cell to flip, as `(col, row)` with `col < width` and `row < height`
    ///
    /// Only called with a non-empty shape; [`Evolver::new`] rejects empty
    /// targets. Draws are independent and the same cell may repeat.
    ///
    /// [`Evolver::new`]: crate::algorithm::executor::Evolver::new
    fn select_cell(&mut self, width: usize, height: usize) -> (usize, usize);
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from operating system entropy
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl PixelSource for RandomSelector {
    fn initial_pixel(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn select_cell(&mut self, width: usize, height: usize) -> (usize, usize) {
        let col = self.rng.random_range(0..width);
        let row = self.rng.random_range(0..height);
        (col, row)
    }
}

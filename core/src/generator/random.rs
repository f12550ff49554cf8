use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random generation strategy, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Picks a fresh seed from the thread-local generator.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        log::debug!("Picked generator seed {seed}");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: &GameConfig) -> Result<Grid> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Grid::generate(config, &mut rng)
    }
}

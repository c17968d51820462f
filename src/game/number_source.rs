use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of secret numbers.
pub trait NumberSource {
    /// Returns a number uniformly drawn from `1..=max`.
    fn draw(&mut self, max: u32) -> u32;
}

pub struct RandomNumberSource {
    rng: StdRng,
}

impl RandomNumberSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl NumberSource for RandomNumberSource {
    fn draw(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max.max(1))
    }
}

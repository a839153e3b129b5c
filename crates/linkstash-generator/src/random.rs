use crate::Generator;
use linkstash_core::{ShortCode, ALPHABET, CODE_LENGTH};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A short code generator drawing every position uniformly from [`ALPHABET`].
///
/// Each instance owns its random source, so stores and tests never share
/// generator state. The keyspace is 64^10; collisions are possible and are
/// handled by the store that consumes the codes.
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a generator with a fixed seed, producing a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws the next random code.
    pub fn next_code(&self) -> ShortCode {
        let mut rng = self.rng.lock();
        let code: String = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RandomGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomGenerator").finish_non_exhaustive()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        self.next_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_have_fixed_length_and_alphabet() {
        let generator = RandomGenerator::new();

        for _ in 0..1_000 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.is_well_formed(), "unexpected code {code}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = RandomGenerator::seeded(42);
        let b = RandomGenerator::seeded(42);

        for _ in 0..100 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = RandomGenerator::seeded(1);
        let b = RandomGenerator::seeded(2);

        let left: Vec<_> = (0..10).map(|_| a.generate()).collect();
        let right: Vec<_> = (0..10).map(|_| b.generate()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn every_symbol_gets_drawn() {
        let generator = RandomGenerator::seeded(7);
        let mut seen = HashSet::new();

        for _ in 0..10_000 {
            seen.extend(generator.generate().as_str().bytes());
        }

        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn no_duplicates_in_small_sample() {
        let generator = RandomGenerator::new();
        let codes: HashSet<_> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}

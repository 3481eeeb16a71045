//! Secure random bytes for commitment keys and placement seeds.

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng, TryRngCore};

/// The random source could not deliver bytes; sessions treat this as fatal.
#[derive(Debug, thiserror::Error)]
#[error("secure random bytes unavailable: {0}")]
pub struct EntropyError(pub String);

/// Source of random bytes consumed by the core.
pub trait EntropySource: Send {
    /// Fill `buf` completely or fail.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating system randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

/// Deterministic bytes from a seeded `SmallRng`, for reproducible games
/// and tests. Not suitable for play against an untrusted opponent.
pub struct SeededEntropy {
    rng: SmallRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.fill_bytes(buf);
        Ok(())
    }
}

/// A placement/targeting RNG seeded from `entropy`.
pub fn seeded_rng(entropy: &mut dyn EntropySource) -> Result<SmallRng, EntropyError> {
    let mut seed = <SmallRng as SeedableRng>::Seed::default();
    entropy.fill(seed.as_mut())?;
    Ok(SmallRng::from_seed(seed))
}

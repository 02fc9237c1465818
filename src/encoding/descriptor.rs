use serde::{Deserialize, Serialize};

use crate::types::errors::DescriptorError;
use crate::types::identifiers::ContentDigest;

/// Default number of descriptor levels.
pub const DEFAULT_N_MAX: usize = 15;

/// Number of leading digest bytes used as seeds.
pub const SEED_BYTES: usize = 16;

/// Bytes charged for the digest when sizing a serialized descriptor.
pub const DIGEST_BYTES: usize = 32;

/// Bytes charged per level state when sizing a serialized descriptor.
pub const STATE_BYTES: usize = 4;

/// Hard ceiling on the level count accepted by the encoder.
pub const MAX_LEVELS: usize = 1024;

/// Fixed-length numeric fingerprint of a chunk.
///
/// Fully determined by `(content, n_max)`: `states[n - 1]` is
/// `seed[(n - 1) % 16] mod (capacity(n) + 1)` where the seed is the first
/// 16 bytes of the SHA-256 digest. Every state is therefore bounded by
/// `capacity(n)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub digest: ContentDigest,
    pub states: Vec<u32>,
    pub n_max: usize,
}

impl Descriptor {
    pub fn encode(content: &str, n_max: usize) -> Result<Self, DescriptorError> {
        // Rejected up front: capacity(0) would make every modulus below meaningless.
        if !(1..=MAX_LEVELS).contains(&n_max) {
            return Err(DescriptorError::InvalidLevelCount(n_max));
        }

        // SHA-256 is 32 bytes, so the 16 seed bytes always exist.
        let raw = ContentDigest::raw(content.as_bytes());
        let seeds = &raw[..SEED_BYTES];

        let states = (1..=n_max)
            .map(|n| {
                let seed = u64::from(seeds[(n - 1) % SEED_BYTES]);
                // Never exceeds the seed byte, so it always fits.
                (seed % (capacity(n) + 1)) as u32
            })
            .collect();

        Ok(Descriptor {
            digest: ContentDigest::from_raw(&raw),
            states,
            n_max,
        })
    }

    /// Modeled on-the-wire size: the digest plus four bytes per state.
    pub fn serialized_size(&self) -> usize {
        serialized_size(self.n_max)
    }
}

/// Upper bound of the state at level `n` (1-based).
pub fn capacity(n: usize) -> u64 {
    let n = n as u64;
    n.saturating_mul(n).saturating_mul(2)
}

pub fn serialized_size(n_max: usize) -> usize {
    DIGEST_BYTES + STATE_BYTES * n_max
}

/// Product of `capacity(n) + 1` over all levels.
///
/// Informational only. Reported as `f64` because the exact product no longer
/// fits in `u128` from 19 levels on.
pub fn total_addressable_states(n_max: usize) -> f64 {
    (1..=n_max).map(|n| capacity(n).saturating_add(1) as f64).product()
}

/// `log2` of [`total_addressable_states`], summed per level.
pub fn addressable_bits(n_max: usize) -> f64 {
    (1..=n_max).map(|n| (capacity(n).saturating_add(1) as f64).log2()).sum()
}

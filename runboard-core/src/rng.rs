//! Hash-derived deterministic randomness.
//!
//! Seeds come from BLAKE3 over the caller's input parts, so identical inputs
//! always expand into the same pseudo-random sequence. This is kept apart
//! from the platform randomness used for latency jitter and failure
//! injection, which is intentionally non-reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Separator written between parts so `["ab", "c"]` and `["a", "bc"]` differ.
const PART_SEPARATOR: &[u8] = b":";

/// Derive a `u64` seed from an ordered list of input parts.
pub fn seed_from_parts(parts: &[&str]) -> u64 {
    let mut hasher = blake3::Hasher::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(PART_SEPARATOR);
        }
        hasher.update(part.as_bytes());
    }
    let hash = hasher.finalize();
    let mut first = [0u8; 8];
    first.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(first)
}

/// Seeded generator for a derived seed.
pub fn rng_for(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

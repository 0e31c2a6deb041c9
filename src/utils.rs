//! Hashing helpers for the node table and the operation caches.
//!
//! Both tables are power-of-two sized and take the *high* bits of a
//! multiplicative hash, which spreads nearby handle values well.

/// Multipliers for the multiplicative hash (primes, as in CUDD).
const P1: u64 = 12_582_917;
const P2: u64 = 4_256_249;
const P3: u64 = 741_457;
/// Final avalanche multiplier (2^64 / golden ratio).
const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hash of a pair of `u32` values.
pub fn hash2(a: u32, b: u32) -> u64 {
    let h = (a as u64).wrapping_mul(P1).wrapping_add(b as u64);
    h.wrapping_mul(P2).wrapping_mul(GOLDEN)
}

/// Hash of a triple of `u32` values.
pub fn hash3(a: u32, b: u32, c: u32) -> u64 {
    let h = (a as u64).wrapping_mul(P1).wrapping_add(b as u64);
    let h = h.wrapping_mul(P2).wrapping_add(c as u64);
    h.wrapping_mul(P3).wrapping_mul(GOLDEN)
}

/// Folds a 64-bit hash into an index of a table with `2^bits` slots.
pub fn fold(hash: u64, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        (hash >> (64 - bits)) as usize
    }
}

pub trait MyHash {
    /// Hash used to pick the home slot.
    fn hash(&self) -> u64;
}

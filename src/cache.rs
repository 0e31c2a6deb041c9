//! Per-operator computed tables.
//!
//! Each operator owns a direct-mapped cache: every key hashes to exactly one
//! line and a collision overwrites the previous entry. Lines are stamped with
//! the manager's generation, so a restart invalidates all of them in O(1)
//! without touching memory.
//!
//! Caches are allocated lazily, on the first lookup of their operator, with
//! `2^(table_bits - log_ratio)` lines.

use std::fmt;

use log::debug;

use crate::reference::Ref;
use crate::utils::{fold, hash2};

/// Default `log_ratio`: a cache has a quarter as many lines as the node table.
pub const DEFAULT_CACHE_LOG_RATIO: u32 = 2;

/// Operators with their own computed table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    And,
    Exists,
}

impl Operation {
    pub const COUNT: usize = 2;
    pub const ALL: [Operation; Operation::COUNT] = [Operation::And, Operation::Exists];

    fn index(self) -> usize {
        match self {
            Operation::And => 0,
            Operation::Exists => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::And => write!(f, "and"),
            Operation::Exists => write!(f, "exists"),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Entry {
    stamp: u32,
    a: Ref,
    b: Ref,
    result: Ref,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            stamp: 0, // never a valid generation
            a: Ref::ONE,
            b: Ref::ONE,
            result: Ref::ONE,
        }
    }
}

/// Counters of one computed table.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheStats {
    pub lines: usize,
    pub hits: usize,
    pub misses: usize,
    /// Misses on a line holding a live entry for another key.
    pub faults: usize,
    pub inserts: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A direct-mapped cache keyed by an operand pair.
pub struct OpCache {
    entries: Vec<Entry>,
    bits: u32,
    stats: CacheStats,
}

impl OpCache {
    /// Creates a new cache with `2^bits` lines.
    pub fn new(bits: u32) -> Self {
        assert!(bits <= 31, "Cache bits must be in range 0..=31, got {}", bits);

        let size = 1usize << bits;
        Self {
            entries: vec![Entry::default(); size],
            bits,
            stats: CacheStats {
                lines: size,
                ..CacheStats::default()
            },
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[inline]
    fn index(&self, a: Ref, b: Ref) -> usize {
        fold(hash2(a.raw(), b.raw()), self.bits)
    }

    /// Looks up `(a, b)` among the entries of the given generation.
    #[inline]
    pub fn get(&mut self, a: Ref, b: Ref, generation: u32) -> Option<Ref> {
        let entry = self.entries[self.index(a, b)];

        if entry.stamp != generation {
            self.stats.misses += 1;
            return None;
        }

        if entry.a == a && entry.b == b {
            self.stats.hits += 1;
            Some(entry.result)
        } else {
            self.stats.misses += 1;
            self.stats.faults += 1;
            None
        }
    }

    /// Stores a result, overwriting whatever occupied the line.
    #[inline]
    pub fn insert(&mut self, a: Ref, b: Ref, result: Ref, generation: u32) {
        let idx = self.index(a, b);
        self.entries[idx] = Entry {
            stamp: generation,
            a,
            b,
            result,
        };
        self.stats.inserts += 1;
    }

    /// Forget every entry. Only needed when generations wrap around.
    pub fn clear(&mut self) {
        self.entries.fill(Entry::default());
    }
}

/// The computed tables of all operators, allocated on demand.
pub struct CacheSet {
    caches: [Option<OpCache>; Operation::COUNT],
    log_ratios: [u32; Operation::COUNT],
    table_bits: u32,
}

impl CacheSet {
    pub fn new(table_bits: u32, log_ratio: u32) -> Self {
        Self {
            caches: std::array::from_fn(|_| None),
            log_ratios: [log_ratio; Operation::COUNT],
            table_bits,
        }
    }

    /// Sets the relative size of an operator's cache.
    ///
    /// # Panics
    ///
    /// Panics if the cache of `op` was already allocated.
    pub fn configure(&mut self, op: Operation, log_ratio: u32) {
        assert!(
            self.caches[op.index()].is_none(),
            "Cache for '{}' is already in use and cannot be resized",
            op
        );
        self.log_ratios[op.index()] = log_ratio;
    }

    pub fn is_allocated(&self, op: Operation) -> bool {
        self.caches[op.index()].is_some()
    }

    fn cache_mut(&mut self, op: Operation) -> &mut OpCache {
        let bits = self.table_bits.saturating_sub(self.log_ratios[op.index()]);
        self.caches[op.index()].get_or_insert_with(|| {
            debug!("Allocating cache for '{}' with 2^{} lines", op, bits);
            OpCache::new(bits)
        })
    }

    pub fn get(&mut self, op: Operation, a: Ref, b: Ref, generation: u32) -> Option<Ref> {
        self.cache_mut(op).get(a, b, generation)
    }

    pub fn insert(&mut self, op: Operation, a: Ref, b: Ref, result: Ref, generation: u32) {
        self.cache_mut(op).insert(a, b, result, generation);
    }

    /// Counters of the operator's cache, `None` if it was never used.
    pub fn stats(&self, op: Operation) -> Option<CacheStats> {
        self.caches[op.index()].as_ref().map(OpCache::stats)
    }

    pub fn clear(&mut self) {
        for cache in self.caches.iter_mut().flatten() {
            cache.clear();
        }
    }
}

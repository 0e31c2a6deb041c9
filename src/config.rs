//! Manager configuration.

use crate::cache::DEFAULT_CACHE_LOG_RATIO;

/// Default table size in bits: 2^20 slots.
pub const DEFAULT_CAPACITY_BITS: u32 = 20;

/// Parameters fixed for the whole lifetime of a [`BddManager`][crate::manager::BddManager].
///
/// ```
/// use genbdd::config::BddConfig;
/// use genbdd::manager::BddManager;
///
/// let config = BddConfig::default()
///     .with_num_vars(5)
///     .with_capacity_bits(8)
///     .with_node_limit(50);
/// let mgr = BddManager::with_config(config);
/// assert_eq!(mgr.num_vars(), 5);
/// assert_eq!(mgr.node_limit(), 50);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// Number of variables, fixed at construction.
    pub num_vars: usize,
    /// The node table has `2^capacity_bits` slots.
    pub capacity_bits: u32,
    /// Maximum number of live nodes. `None` means "as many as the table can hold".
    pub node_limit: Option<usize>,
    /// Each operation cache has `2^(capacity_bits - cache_log_ratio)` lines.
    pub cache_log_ratio: u32,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            num_vars: 0,
            capacity_bits: DEFAULT_CAPACITY_BITS,
            node_limit: None,
            cache_log_ratio: DEFAULT_CACHE_LOG_RATIO,
        }
    }
}

impl BddConfig {
    pub fn new(num_vars: usize, capacity_bits: u32) -> Self {
        Self::default().with_num_vars(num_vars).with_capacity_bits(capacity_bits)
    }

    pub fn with_num_vars(mut self, num_vars: usize) -> Self {
        self.num_vars = num_vars;
        self
    }

    pub fn with_capacity_bits(mut self, bits: u32) -> Self {
        self.capacity_bits = bits;
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_cache_log_ratio(mut self, log_ratio: u32) -> Self {
        self.cache_log_ratio = log_ratio;
        self
    }

    /// Number of slots in the node table.
    pub fn capacity(&self) -> usize {
        1usize << self.capacity_bits
    }

    /// The node limit actually enforced.
    ///
    /// One slot always stays stale so that every probe sequence terminates,
    /// hence the limit never exceeds `capacity - 1`.
    pub fn effective_node_limit(&self) -> usize {
        let max = self.capacity() - 1;
        self.node_limit.map_or(max, |limit| limit.min(max))
    }
}

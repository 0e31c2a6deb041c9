//! The BDD manager: owner of the node table and the operation caches.
//!
//! Every diagram lives inside one [`BddManager`]. Handles ([`Ref`]) are only
//! meaningful together with the manager that produced them, and only until the
//! next [`restart`](BddManager::restart), which empties the table in O(1).
//!
//! # Example
//!
//! ```
//! use genbdd::manager::BddManager;
//!
//! let mgr = BddManager::new(3, 10);
//! let a = mgr.var(0);
//! let b = mgr.var(1);
//!
//! let f = mgr.apply_and(a, b)?;
//! let g = mgr.apply_and(b, a)?;
//! assert_eq!(f, g);
//!
//! mgr.restart();
//! // `f` and `g` are gone, the variables survive.
//! assert_eq!(mgr.var(0), a);
//! # Ok::<(), genbdd::error::CapacityExceeded>(())
//! ```

use std::cell::{Cell, RefCell};
use std::fmt::Debug;

use log::{debug, info, trace};

use crate::cache::{CacheSet, CacheStats, Operation};
use crate::config::BddConfig;
use crate::error::BddResult;
use crate::node::Node;
use crate::reference::Ref;
use crate::table::{NodeTable, TableStats};
use crate::types::Var;

pub struct BddManager {
    table: RefCell<NodeTable>,
    caches: RefCell<CacheSet>,
    /// Output buffer of `dag_collect`, allocated on first use.
    scratch: RefCell<Vec<Ref>>,
    config: BddConfig,
    restarts: Cell<usize>,
}

impl BddManager {
    /// Create a manager for `num_vars` variables with a table of `2^capacity_bits` slots.
    pub fn new(num_vars: usize, capacity_bits: u32) -> Self {
        Self::with_config(BddConfig::new(num_vars, capacity_bits))
    }

    /// Create a manager from a full configuration.
    ///
    /// # Panics
    ///
    /// Panics if the table is too small to hold the constant and all variables.
    pub fn with_config(config: BddConfig) -> Self {
        assert!(
            config.capacity_bits <= 31,
            "Capacity bits should be in the range 0..=31"
        );

        let limit = config.effective_node_limit();
        let table = NodeTable::new(config.capacity_bits, config.num_vars, limit);
        let caches = CacheSet::new(config.capacity_bits, config.cache_log_ratio);

        debug!("BddManager::with_config({:?})", config);

        Self {
            table: RefCell::new(table),
            caches: RefCell::new(caches),
            scratch: RefCell::new(Vec::new()),
            config,
            restarts: Cell::new(0),
        }
    }

    /// Tear the manager down, reporting its final statistics.
    pub fn shutdown(self) {
        info!("BddManager::shutdown: {}", self.stats());
    }
}

impl Debug for BddManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("BddManager")
            .field("num_vars", &table.num_vars())
            .field("capacity", &table.capacity())
            .field("limit", &table.limit())
            .field("live", &table.live())
            .field("generation", &table.generation())
            .finish()
    }
}

impl BddManager {
    pub fn config(&self) -> &BddConfig {
        &self.config
    }
    pub fn num_vars(&self) -> usize {
        self.config.num_vars
    }
    /// Number of slots in the node table.
    pub fn capacity(&self) -> usize {
        self.table.borrow().capacity()
    }
    /// Maximum number of live nodes.
    pub fn node_limit(&self) -> usize {
        self.table.borrow().limit()
    }
    /// Number of live nodes, constant and variables included.
    pub fn num_nodes(&self) -> usize {
        self.table.borrow().live()
    }
    pub fn generation(&self) -> u32 {
        self.table.borrow().generation()
    }
    pub fn num_restarts(&self) -> usize {
        self.restarts.get()
    }
    pub fn table_stats(&self) -> TableStats {
        self.table.borrow().stats()
    }
    /// Counters of an operator's cache, `None` if the operator was never used.
    pub fn cache_stats(&self, op: Operation) -> Option<CacheStats> {
        self.caches.borrow().stats(op)
    }

    pub fn zero(&self) -> Ref {
        Ref::ZERO
    }
    pub fn one(&self) -> Ref {
        Ref::ONE
    }
    pub fn is_zero(&self, f: Ref) -> bool {
        f == Ref::ZERO
    }
    pub fn is_one(&self, f: Ref) -> bool {
        f == Ref::ONE
    }
    pub fn is_constant(&self, f: Ref) -> bool {
        f.is_constant()
    }

    /// The elementary function of variable `index`.
    ///
    /// Valid across restarts.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_vars`.
    pub fn var(&self, index: usize) -> Ref {
        assert!(
            index < self.num_vars(),
            "Variable index {} out of range 0..{}",
            index,
            self.num_vars()
        );
        self.table.borrow().var(index)
    }

    /// Returns `true` if the handle still denotes a live node.
    ///
    /// A handle obtained before a restart is invalid even when its slot has
    /// since been claimed by a new node.
    pub fn is_valid(&self, f: Ref) -> bool {
        self.table.borrow().is_valid(f)
    }

    /// Fail fast on handles that died in a restart.
    pub(crate) fn check_live(&self, f: Ref) {
        assert!(
            self.is_valid(f),
            "Handle {} is stale: it was obtained before a restart",
            f
        );
    }

    pub(crate) fn node(&self, f: Ref) -> Node {
        *self.table.borrow().node(f.id())
    }

    /// Top variable of `f`, [`Var::CONST`] for the constants.
    pub fn variable(&self, f: Ref) -> Var {
        self.table.borrow().variable(f.id())
    }

    /// Then-cofactor of `f` with respect to its own top variable.
    pub fn high_node(&self, f: Ref) -> Ref {
        if f.is_constant() {
            return f;
        }
        self.node(f).high.not_cond(f.is_complemented())
    }

    /// Else-cofactor of `f` with respect to its own top variable.
    pub fn low_node(&self, f: Ref) -> Ref {
        if f.is_constant() {
            return f;
        }
        self.node(f).low.not_cond(f.is_complemented())
    }

    /// Cofactors `(else, then)` of `f` with respect to `v`, which must not be
    /// below the top variable of `f`.
    pub fn top_cofactors(&self, f: Ref, v: Var) -> (Ref, Ref) {
        let node = self.node(f);
        if v < node.variable {
            return (f, f);
        }
        assert_eq!(v, node.variable, "Variable {} is below the top of {}", v, f);
        let c = f.is_complemented();
        (node.low.not_cond(c), node.high.not_cond(c))
    }

    /// Get or create the node `(variable, high, low)`.
    ///
    /// Returns the shared child without allocating when `high == low`.
    ///
    /// # Panics
    ///
    /// Panics if `high` is complemented, if `variable` is out of range or not
    /// strictly above both children, or if a child is stale.
    pub fn make_node(&self, variable: usize, high: Ref, low: Ref) -> BddResult<Ref> {
        assert!(
            variable < self.num_vars(),
            "Variable index {} out of range 0..{}",
            variable,
            self.num_vars()
        );
        assert!(
            !high.is_complemented(),
            "Then-child {} must be regular",
            high
        );
        self.check_live(high);
        self.check_live(low);

        let v = Var::new(variable as u32);
        let tv = self.variable(high);
        let ev = self.variable(low);
        assert!(
            v < tv && v < ev,
            "Variable {} must be above both children ({}, {})",
            v,
            tv,
            ev
        );

        if high == low {
            return Ok(high);
        }
        self.table.borrow_mut().find_or_add(v, high, low)
    }

    /// Internal constructor of the engine: reduces and moves complement
    /// edges off the then-child.
    pub(crate) fn mk_node(&self, v: Var, high: Ref, low: Ref) -> BddResult<Ref> {
        if high == low {
            return Ok(high);
        }
        debug_assert!(v < self.variable(high) && v < self.variable(low));
        let c = high.is_complemented();
        let res = self
            .table
            .borrow_mut()
            .find_or_add(v, high.not_cond(c), low.not_cond(c))?;
        Ok(res.not_cond(c))
    }

    /// Invalidate every node except the constants and the variables.
    ///
    /// O(1) in the size of the table. All other handles obtained before must
    /// be discarded.
    pub fn restart(&self) {
        let mut table = self.table.borrow_mut();
        let before = table.generation();
        table.restart();
        if table.generation() < before {
            // Stamps wrapped around: stale lines could look live again.
            self.caches.borrow_mut().clear();
        }
        self.restarts.set(self.restarts.get() + 1);
        debug!(
            "BddManager::restart #{} (generation {})",
            self.restarts.get(),
            table.generation()
        );
    }

    /// Size the cache of `op` to `2^(capacity_bits - log_ratio)` lines.
    ///
    /// # Panics
    ///
    /// Panics if `op` has already been used.
    pub fn configure_cache(&self, op: Operation, log_ratio: u32) {
        debug!("configure_cache(op = {}, log_ratio = {})", op, log_ratio);
        self.caches.borrow_mut().configure(op, log_ratio);
    }

    pub(crate) fn cache_get(&self, op: Operation, a: Ref, b: Ref) -> Option<Ref> {
        let generation = self.generation();
        let res = self.caches.borrow_mut().get(op, a, b, generation);
        if let Some(r) = res {
            trace!("cache: {}({}, {}) -> {}", op, a, b, r);
        }
        res
    }

    pub(crate) fn cache_insert(&self, op: Operation, a: Ref, b: Ref, result: Ref) {
        let generation = self.generation();
        self.caches.borrow_mut().insert(op, a, b, result, generation);
    }

    pub(crate) fn table(&self) -> &RefCell<NodeTable> {
        &self.table
    }

    pub(crate) fn scratch(&self) -> &RefCell<Vec<Ref>> {
        &self.scratch
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::CapacityExceeded;

    #[test]
    fn test_var() {
        let mgr = BddManager::new(3, 8);
        let x = mgr.var(1);

        assert_eq!(mgr.variable(x), Var::new(1));
        assert_eq!(mgr.high_node(x), mgr.one());
        assert_eq!(mgr.low_node(x), mgr.zero());
    }

    #[test]
    fn test_not_var() {
        let mgr = BddManager::new(3, 8);
        let not_x = -mgr.var(1);

        assert_eq!(mgr.variable(not_x), Var::new(1));
        assert_eq!(mgr.high_node(not_x), mgr.zero());
        assert_eq!(mgr.low_node(not_x), mgr.one());
    }

    #[test]
    fn test_terminal() {
        let mgr = BddManager::new(1, 4);

        assert!(mgr.is_constant(mgr.zero()));
        assert!(mgr.is_zero(mgr.zero()));
        assert!(!mgr.is_one(mgr.zero()));
        assert!(mgr.is_one(mgr.one()));
        assert_eq!(mgr.variable(mgr.one()), Var::CONST);
        assert_eq!(mgr.num_nodes(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_var_out_of_range() {
        let mgr = BddManager::new(3, 8);
        mgr.var(3);
    }

    #[test]
    fn test_make_node_canonical() {
        let mgr = BddManager::new(3, 8);
        let b = mgr.var(1);
        let c = mgr.var(2);

        let f = mgr.make_node(0, b, c).unwrap();
        let g = mgr.make_node(0, b, c).unwrap();
        assert_eq!(f, g);
        assert_eq!(mgr.num_nodes(), 5);
    }

    #[test]
    fn test_make_node_reduction() {
        let mgr = BddManager::new(3, 8);
        let b = mgr.var(1);
        let before = mgr.num_nodes();

        assert_eq!(mgr.make_node(0, b, b).unwrap(), b);
        assert_eq!(mgr.num_nodes(), before);
    }

    #[test]
    fn test_make_node_finds_variable() {
        let mgr = BddManager::new(3, 8);
        let x = mgr.make_node(2, mgr.one(), mgr.zero()).unwrap();
        assert_eq!(x, mgr.var(2));
    }

    #[test]
    #[should_panic(expected = "must be regular")]
    fn test_make_node_complemented_then() {
        let mgr = BddManager::new(3, 8);
        let b = mgr.var(1);
        let _ = mgr.make_node(0, -b, mgr.one());
    }

    #[test]
    #[should_panic(expected = "must be above both children")]
    fn test_make_node_order_violation() {
        let mgr = BddManager::new(3, 8);
        let a = mgr.var(0);
        let _ = mgr.make_node(1, a, mgr.zero());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_make_node_variable_out_of_range() {
        let mgr = BddManager::new(3, 8);
        let _ = mgr.make_node(7, mgr.one(), mgr.zero());
    }

    #[test]
    fn test_make_node_capacity() {
        let mgr = BddManager::with_config(BddConfig::new(3, 4).with_node_limit(5));
        let b = mgr.var(1);
        let c = mgr.var(2);
        mgr.make_node(0, b, c).unwrap();
        assert_eq!(mgr.make_node(0, c, b), Err(CapacityExceeded));
    }

    #[test]
    fn test_restart_keeps_variables() {
        let mgr = BddManager::new(3, 8);
        let vars: Vec<_> = (0..3).map(|i| mgr.var(i)).collect();
        let f = mgr.make_node(0, vars[1], vars[2]).unwrap();

        mgr.restart();

        assert!(!mgr.is_valid(f));
        assert_eq!(mgr.num_nodes(), 4);
        assert_eq!(mgr.num_restarts(), 1);
        for (i, &v) in vars.iter().enumerate() {
            assert_eq!(mgr.var(i), v);
            assert!(mgr.is_valid(v));
        }
    }

    #[test]
    #[should_panic(expected = "is stale")]
    fn test_stale_child_panics() {
        let mgr = BddManager::new(3, 8);
        let f = mgr.make_node(1, mgr.var(2), mgr.zero()).unwrap();
        mgr.restart();
        let _ = mgr.make_node(0, f, mgr.zero());
    }

    #[test]
    fn test_reused_slot_rejects_old_handle() {
        let mgr = BddManager::new(3, 8);
        let c = mgr.var(2);
        let f = mgr.make_node(1, c, mgr.zero()).unwrap();

        mgr.restart();

        // Same node, same hash, same slot.
        let g = mgr.make_node(1, c, mgr.zero()).unwrap();
        assert_eq!(g.id(), f.id());
        assert!(mgr.is_valid(g));
        assert!(!mgr.is_valid(f));
        assert!(!mgr.is_valid(-f));
        assert!(mgr.make_node(0, g, mgr.zero()).is_ok());
    }

    #[test]
    #[should_panic(expected = "is stale")]
    fn test_reused_slot_panics() {
        let mgr = BddManager::new(3, 8);
        let c = mgr.var(2);
        let f = mgr.make_node(1, c, mgr.zero()).unwrap();
        mgr.restart();
        mgr.make_node(1, c, mgr.zero()).unwrap();

        let _ = mgr.make_node(0, f, mgr.zero());
    }

    #[test]
    fn test_full_table_reuses_old_slots() {
        // 16 slots, at most 15 live: refilling leaves a single stale slot.
        let mgr = BddManager::with_config(BddConfig::new(3, 4).with_node_limit(15));
        let (b, c) = (mgr.var(1), mgr.var(2));
        let f = mgr.make_node(0, b, c).unwrap();
        let g = mgr.make_node(1, c, -c).unwrap();

        mgr.restart();

        let mut pool = vec![mgr.one(), mgr.zero(), c, -c];
        let mut filled = false;
        'fill: for v in [1, 0] {
            let below = pool.clone();
            for &high in below.iter().filter(|h| !h.is_complemented()) {
                for &low in &below {
                    match mgr.make_node(v, high, low) {
                        Ok(r) => pool.extend([r, -r]),
                        Err(CapacityExceeded) => {
                            filled = true;
                            break 'fill;
                        }
                    }
                }
            }
        }
        assert!(filled);
        assert_eq!(mgr.num_nodes(), 15);

        let table = mgr.table().borrow();
        assert!(table.is_live(f.id()) || table.is_live(g.id()));
        drop(table);
        assert!(!mgr.is_valid(f));
        assert!(!mgr.is_valid(g));
    }

    #[test]
    fn test_top_cofactors() {
        let mgr = BddManager::new(3, 8);
        let b = mgr.var(1);
        let f = -mgr.make_node(0, b, mgr.zero()).unwrap();

        assert_eq!(mgr.top_cofactors(f, Var::new(0)), (mgr.one(), -b));
        assert_eq!(mgr.top_cofactors(b, Var::new(0)), (b, b));
    }

    #[test]
    fn test_configure_cache_before_use() {
        let mgr = BddManager::new(3, 10);
        mgr.configure_cache(Operation::And, 4);
        assert_eq!(mgr.cache_stats(Operation::And), None);
    }
}

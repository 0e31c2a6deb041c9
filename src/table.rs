//! The unique table: a fixed-capacity arena of node slots.
//!
//! Slots are found by open addressing with linear probing. Liveness is decided
//! by comparing a slot's stamp with the current generation, so the whole table
//! is emptied in O(1) by bumping the generation. Within one generation nothing
//! is ever removed, hence a probe sequence is a run of live slots ended by the
//! first stale one.

use log::{debug, trace, warn};

use crate::error::{BddResult, CapacityExceeded};
use crate::node::Node;
use crate::reference::Ref;
use crate::types::{NodeId, Var};
use crate::utils::{fold, MyHash};

/// Diagnostic counters of the unique table.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct TableStats {
    /// Lookups that found an existing node.
    pub hits: usize,
    /// Lookups that claimed a new slot.
    pub misses: usize,
    /// Probe steps over live, non-matching slots.
    pub steps: usize,
    /// Lookups refused because the node limit was reached.
    pub refused: usize,
    /// Largest number of live nodes seen.
    pub peak: usize,
}

pub struct NodeTable {
    nodes: Vec<Node>,
    bits: u32,
    bitmask: usize,
    generation: u32,
    /// Number of restarts so far, starting at 1. Unlike `generation` it never
    /// resets, so it orders handles against slot reuse.
    epoch: u32,
    /// Number of live slots, constant and variables included.
    live: usize,
    limit: usize,
    /// Regular handles of the elementary variable nodes.
    vars: Vec<Ref>,
    stats: TableStats,
}

impl NodeTable {
    /// Create a new table of size `2^bits` holding the constant node and
    /// `num_vars` elementary variables.
    ///
    /// # Panics
    ///
    /// Panics if the table cannot hold the constant and all variables.
    pub fn new(bits: u32, num_vars: usize, limit: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let capacity = 1usize << bits;
        assert!(
            limit < capacity,
            "Node limit {} must be below the table capacity {}",
            limit,
            capacity
        );
        assert!(
            limit > num_vars,
            "Node limit {} cannot hold the constant and {} variables",
            limit,
            num_vars
        );

        let mut nodes = Vec::with_capacity(capacity);
        nodes.resize_with(capacity, Node::default);

        let mut table = Self {
            nodes,
            bits,
            bitmask: capacity - 1,
            generation: 1,
            epoch: 1,
            live: 0,
            limit,
            vars: Vec::with_capacity(num_vars),
            stats: TableStats::default(),
        };

        // The constant node owns slot 0 and is never hashed.
        table.nodes[0] = Node {
            stamp: table.generation,
            ..Node::default()
        };
        table.live = 1;

        for v in 0..num_vars {
            let var = Var::new(v as u32);
            match table.find_or_add(var, Ref::ONE, Ref::ZERO) {
                Ok(r) => table.vars.push(r),
                Err(CapacityExceeded) => unreachable!("limit was checked to hold all variables"),
            }
        }

        debug!(
            "NodeTable::new(bits = {}, vars = {}, limit = {})",
            bits, num_vars, limit
        );
        table
    }
}

impl NodeTable {
    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }
    pub fn bits(&self) -> u32 {
        self.bits
    }
    pub fn generation(&self) -> u32 {
        self.generation
    }
    /// Number of live nodes, constant and variables included.
    pub fn live(&self) -> usize {
        self.live
    }
    pub fn limit(&self) -> usize {
        self.limit
    }
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Regular handle of the elementary node of variable `v`.
    pub fn var(&self, v: usize) -> Ref {
        self.vars[v]
    }

    /// Returns `true` if the slot is live in the current generation.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index())
            .is_some_and(|node| node.is_live(self.generation))
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Regular handle of slot `id`, issued at the current epoch.
    pub fn handle(&self, id: NodeId) -> Ref {
        Ref::positive(id).with_epoch(self.epoch)
    }

    /// Returns `true` if `r` still denotes the node it was issued for.
    ///
    /// The slot must be live, and it must not have been reclaimed after the
    /// handle was issued.
    pub fn is_valid(&self, r: Ref) -> bool {
        self.nodes
            .get(r.id().index())
            .is_some_and(|node| node.is_live(self.generation) && node.born <= r.epoch())
    }

    /// Get the node at the given slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is stale: the handle was obtained before a restart.
    pub fn node(&self, id: NodeId) -> &Node {
        let node = &self.nodes[id.index()];
        assert!(
            node.is_live(self.generation),
            "Slot {} is stale (stamp {}, generation {})",
            id,
            node.stamp,
            self.generation
        );
        node
    }

    pub fn variable(&self, id: NodeId) -> Var {
        self.node(id).variable
    }

    pub fn is_marked(&self, id: NodeId) -> bool {
        self.nodes[id.index()].mark
    }
    pub fn set_mark(&mut self, id: NodeId) {
        self.nodes[id.index()].mark = true;
    }
    pub fn clear_mark(&mut self, id: NodeId) {
        self.nodes[id.index()].mark = false;
    }

    /// Find the node `(variable, high, low)` or claim a slot for it.
    ///
    /// The caller is responsible for the ordering, reduction and complement
    /// invariants.
    pub fn find_or_add(&mut self, variable: Var, high: Ref, low: Ref) -> BddResult<Ref> {
        let key = Node {
            stamp: self.generation,
            variable,
            high,
            low,
            mark: false,
            born: self.epoch,
        };
        let mut index = fold(key.hash(), self.bits);

        loop {
            let slot = &self.nodes[index];
            if !slot.is_live(self.generation) {
                break;
            }
            if slot.matches(variable, high, low) {
                self.stats.hits += 1;
                return Ok(self.handle(NodeId::new(index as u32)));
            }
            self.stats.steps += 1;
            index = (index + 1) & self.bitmask;
        }

        if self.live >= self.limit {
            self.stats.refused += 1;
            warn!(
                "Node limit {} reached while adding ({}, {}, {})",
                self.limit, variable, high, low
            );
            return Err(CapacityExceeded);
        }

        trace!("claim slot {} for ({}, {}, {})", index, variable, high, low);
        self.nodes[index] = key;
        self.live += 1;
        self.stats.misses += 1;
        self.stats.peak = self.stats.peak.max(self.live);
        Ok(self.handle(NodeId::new(index as u32)))
    }

    /// Invalidate every node except the constant and the variables.
    pub fn restart(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.generation = self.generation.wrapping_add(1);
        if self.generation == Node::NEVER {
            // Old stamps would come back to life after wrap-around.
            debug!("NodeTable: generation wrapped, clearing all stamps");
            for node in self.nodes.iter_mut() {
                node.stamp = Node::NEVER;
            }
            self.generation = 1;
        }

        self.nodes[0].stamp = self.generation;
        for r in &self.vars {
            self.nodes[r.id().index()].stamp = self.generation;
        }
        self.live = 1 + self.vars.len();

        debug!("NodeTable::restart -> generation {}", self.generation);
    }

    /// Iterate over all live slots in slot order.
    pub fn live_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let generation = self.generation;
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.is_live(generation))
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }
}

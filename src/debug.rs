//! Diagnostics: counters, table dumps and invariant checks.
//!
//! Nothing here is part of the functional contract; these helpers exist for
//! tests, tuning and bug hunting.

use std::fmt;
use std::io::{self, Write};

use crate::cache::{CacheStats, Operation};
use crate::manager::BddManager;
use crate::reference::Ref;
use crate::table::TableStats;
use crate::types::Lit;

/// Snapshot of all counters of a manager.
#[derive(Debug, Clone)]
pub struct ManagerStats {
    pub num_vars: usize,
    pub capacity: usize,
    pub node_limit: usize,
    pub live: usize,
    pub generation: u32,
    pub restarts: usize,
    pub table: TableStats,
    pub caches: Vec<(Operation, CacheStats)>,
}

impl fmt::Display for ManagerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "vars = {}, capacity = {}, limit = {}, live = {}, peak = {}",
            self.num_vars, self.capacity, self.node_limit, self.live, self.table.peak
        )?;
        writeln!(f, "generation = {}, restarts = {}", self.generation, self.restarts)?;
        let lookups = self.table.hits + self.table.misses;
        writeln!(
            f,
            "unique: hits = {}, misses = {}, refused = {}, steps = {} ({:.2} per lookup)",
            self.table.hits,
            self.table.misses,
            self.table.refused,
            self.table.steps,
            if lookups == 0 {
                0.0
            } else {
                self.table.steps as f64 / lookups as f64
            }
        )?;
        for (op, cache) in &self.caches {
            writeln!(
                f,
                "cache '{}': lines = {}, hits = {}, misses = {}, faults = {}, hit rate = {:.1}%",
                op,
                cache.lines,
                cache.hits,
                cache.misses,
                cache.faults,
                100.0 * cache.hit_rate()
            )?;
        }
        Ok(())
    }
}

impl BddManager {
    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            num_vars: self.num_vars(),
            capacity: self.capacity(),
            node_limit: self.node_limit(),
            live: self.num_nodes(),
            generation: self.generation(),
            restarts: self.num_restarts(),
            table: self.table_stats(),
            caches: Operation::ALL
                .iter()
                .filter_map(|&op| self.cache_stats(op).map(|s| (op, s)))
                .collect(),
        }
    }

    /// Write the counters of the manager.
    pub fn print_info(&self, w: &mut impl Write) -> io::Result<()> {
        write!(w, "{}", self.stats())
    }

    /// Write the occupancy map of the unique table and every live node.
    ///
    /// The map has one character per slot: `#` for live, `.` for stale.
    pub fn print_table(&self, w: &mut impl Write) -> io::Result<()> {
        let table = self.table().borrow();
        writeln!(
            w,
            "Unique table: {} of {} slots live (generation {})",
            table.live(),
            table.capacity(),
            table.generation()
        )?;

        let generation = table.generation();
        let mut row = String::with_capacity(64);
        let mut live = table.live_nodes().map(|(id, _)| id.index()).peekable();
        for i in 0..table.capacity() {
            if live.peek() == Some(&i) {
                live.next();
                row.push('#');
            } else {
                row.push('.');
            }
            if row.len() == 64 {
                writeln!(w, "{}", row)?;
                row.clear();
            }
        }
        if !row.is_empty() {
            writeln!(w, "{}", row)?;
        }

        for (id, node) in table.live_nodes() {
            debug_assert!(node.is_live(generation));
            if id.is_const() {
                writeln!(w, "{:>8}: const", id)?;
            } else {
                writeln!(w, "{:>8}: {} ? {} : {}", id, node.variable, node.high, node.low)?;
            }
        }
        Ok(())
    }

    /// Sum-of-products text of `f`, e.g. `x0 ~x1 + x2`.
    pub fn cover_string(&self, f: Ref) -> String {
        if f == Ref::ZERO {
            return "0".to_string();
        }
        if f == Ref::ONE {
            return "1".to_string();
        }
        self.cubes(f)
            .iter()
            .map(|cube| cube.iter().map(Lit::to_string).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Check the structural invariants of every live node.
    ///
    /// Returns a description of each violation; empty when the table is sound.
    pub fn invariant_violations(&self) -> Vec<String> {
        let table = self.table().borrow();
        let mut violations = Vec::new();

        for (id, node) in table.live_nodes() {
            if id.is_const() {
                continue;
            }
            if node.mark {
                violations.push(format!("{}: mark left set", id));
            }
            if node.high.is_complemented() {
                violations.push(format!("{}: then-child {} is complemented", id, node.high));
            }
            if node.high == node.low {
                violations.push(format!("{}: both children are {}", id, node.high));
            }
            for child in [node.high, node.low] {
                if !table.is_live(child.id()) {
                    violations.push(format!("{}: child {} is stale", id, child));
                } else if table.variable(child.id()) <= node.variable {
                    violations.push(format!(
                        "{}: child {} is not below {}",
                        id, child, node.variable
                    ));
                }
            }
        }

        // Hash-consing: no two live nodes with the same fields.
        let mut seen = std::collections::HashMap::new();
        for (id, node) in table.live_nodes() {
            if let Some(other) = seen.insert((node.variable, node.high, node.low), id) {
                violations.push(format!("{} duplicates {}", id, other));
            }
        }

        violations
    }
}

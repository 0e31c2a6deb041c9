//! # genbdd: generational Binary Decision Diagrams
//!
//! **`genbdd`** is a compact BDD engine with a fixed-capacity node arena and
//! generation-based bulk reclamation. It is meant to be embedded in logic
//! synthesis and verification tools that need equivalence checks, support
//! analysis and cube extraction on moderately sized functions.
//!
//! ## Key Features
//!
//! - **Complement edges**: negation is a flag flip on a [`Ref`][crate::reference::Ref] handle.
//! - **Hash-consing**: an open-addressing unique table keeps every function canonical,
//!   so equivalence is handle equality.
//! - **Generations**: [`restart`][crate::manager::BddManager::restart] invalidates every
//!   node except the constant and the variables in O(1), caches included.
//! - **Explicit exhaustion**: when the node limit is reached, operations return
//!   [`CapacityExceeded`][crate::error::CapacityExceeded] instead of growing.
//!
//! ## Basic Usage
//!
//! ```rust
//! use genbdd::manager::BddManager;
//!
//! // Three variables, a table of 2^10 slots.
//! let mgr = BddManager::new(3, 10);
//!
//! let a = mgr.var(0);
//! let b = mgr.var(1);
//! let c = mgr.var(2);
//!
//! // f = a & b | ~a & c
//! let f = mgr.apply_or(mgr.apply_and(a, b)?, mgr.apply_and(-a, c)?)?;
//!
//! assert_eq!(mgr.support_size(f), 3);
//! assert!(mgr.eval(f, &[true, true, false]));
//!
//! // Canonicity: the same function is the same handle.
//! let g = mgr.apply_or(mgr.apply_and(-a, c)?, mgr.apply_and(b, a)?)?;
//! assert_eq!(f, g);
//! # Ok::<(), genbdd::error::CapacityExceeded>(())
//! ```
//!
//! ## Running out of nodes
//!
//! ```rust
//! use genbdd::config::BddConfig;
//! use genbdd::manager::BddManager;
//!
//! let mgr = BddManager::with_config(BddConfig::new(8, 8).with_node_limit(12));
//! let vars: Vec<_> = (0..8).map(|i| mgr.var(i)).collect();
//!
//! let parity = vars.iter().try_fold(mgr.zero(), |acc, &v| mgr.apply_xor(acc, v));
//! assert!(parity.is_err());
//!
//! // Every handle except the constants and the variables is gone now.
//! mgr.restart();
//! let f = mgr.apply_and(vars[0], vars[7])?;
//! assert_eq!(mgr.dag_size(f), 3);
//! # Ok::<(), genbdd::error::CapacityExceeded>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`manager`]**: the [`BddManager`][crate::manager::BddManager] and its lifecycle.
//! - **[`table`]** and **[`cache`]**: the unique table and the operation caches.
//! - **[`apply`]**: AND, the derived operators and quantification.
//! - **[`traverse`]**: support, sizes and cube extraction.
//! - **[`sat`]**: evaluation, model counting and cube enumeration.
//! - **[`debug`]** and **[`dot`]**: diagnostics and Graphviz export.

pub mod apply;
pub mod cache;
pub mod config;
pub mod debug;
pub mod dot;
pub mod error;
pub mod manager;
pub mod node;
pub mod reference;
pub mod sat;
pub mod table;
pub mod traverse;
pub mod types;
pub mod utils;

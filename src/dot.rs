//! DOT (Graphviz) export.
//!
//! Conventions of the generated graph:
//! - the constant is drawn as two square terminals `0` and `1` (sink rank),
//! - variable nodes are circles grouped by variable,
//! - then-edges are solid, else-edges dashed,
//! - complemented else-edges are dotted with a hollow circle,
//! - roots are rectangles at the top (source rank).
//!
//! # Examples
//!
//! ```
//! use genbdd::manager::BddManager;
//!
//! let mgr = BddManager::new(2, 8);
//! let f = mgr.apply_and(mgr.var(0), mgr.var(1))?;
//!
//! let dot = mgr.to_dot(&[f]).unwrap();
//! // Render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("graph {"));
//! # Ok::<(), genbdd::error::CapacityExceeded>(())
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::manager::BddManager;
use crate::reference::Ref;
use crate::types::Var;

/// Visual options for [`BddManager::to_dot_with_config`].
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for variable nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for then-edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for else-edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Style for complemented edges (default: "dotted")
    pub negated_edge_style: &'static str,
    /// Whether to use HTML labels for subscripts (default: true)
    pub use_html_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            negated_edge_style: "dotted",
            use_html_labels: true,
        }
    }
}

impl BddManager {
    /// DOT representation of the diagrams rooted at `roots`, with shared
    /// nodes drawn once.
    pub fn to_dot(&self, roots: &[Ref]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, roots: &[Ref], config: &DotConfig) -> Result<String, std::fmt::Error> {
        for &r in roots {
            self.check_live(r);
        }

        let mut nodes = Vec::new();
        self.collect_post_order(roots, &mut nodes);

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.terminal_shape)?;
        writeln!(dot, "1 [shape={}, label=\"1\"];", config.terminal_shape)?;
        writeln!(dot, "}}")?;

        let mut levels = BTreeMap::<Var, Vec<Ref>>::new();
        for &n in nodes.iter().filter(|n| !n.is_constant()) {
            levels.entry(self.variable(n)).or_default().push(n);
        }

        for (var, level) in levels.iter() {
            writeln!(dot, "{{ rank=same")?;
            for &n in level.iter() {
                let label = if config.use_html_labels {
                    format!("<x<SUB>{}</SUB>>", var.index())
                } else {
                    format!("\"{}\"", var)
                };
                writeln!(dot, "n{} [label={}];", n.id().raw(), label)?;
            }
            writeln!(dot, "}}")?;
        }

        for &n in nodes.iter().filter(|n| !n.is_constant()) {
            let id = n.id().raw();

            let high = self.high_node(n);
            debug_assert!(!high.is_complemented());
            writeln!(dot, "n{} -- {} [style={}];", id, target(high), config.high_edge_style)?;

            let low = self.low_node(n);
            if low.is_complemented() && !low.is_constant() {
                writeln!(
                    dot,
                    "n{} -- {} [style={}, dir=forward, arrowhead=odot];",
                    id,
                    target(low),
                    config.negated_edge_style
                )?;
            } else {
                writeln!(dot, "n{} -- {} [style={}];", id, target(low), config.low_edge_style)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;

        for (i, &root) in roots.iter().enumerate() {
            if root.is_complemented() && !root.is_constant() {
                writeln!(dot, "r{} -- {} [dir=forward, arrowhead=odot];", i, target(root))?;
            } else {
                writeln!(dot, "r{} -- {};", i, target(root))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

/// DOT node name of the node behind `r`; constants map to the two terminals.
fn target(r: Ref) -> String {
    if r == Ref::ONE {
        "1".to_string()
    } else if r == Ref::ZERO {
        "0".to_string()
    } else {
        format!("n{}", r.id().raw())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_to_dot_basic() {
        let mgr = BddManager::new(3, 8);
        let f = mgr.var_cube([0, 1, 2]).unwrap();

        let dot = mgr.to_dot(&[f]).unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert_eq!(dot.matches("rank=same").count(), 3);
    }

    #[test]
    fn test_to_dot_complemented_edges() {
        let mgr = BddManager::new(2, 8);
        let f = mgr.apply_xor(mgr.var(0), mgr.var(1)).unwrap();

        let dot = mgr.to_dot(&[f, -f]).unwrap();
        // The x1 node is reached both directly and complemented.
        assert!(dot.contains("arrowhead=odot"), "{}", dot);
        assert!(dot.contains("r0 --"));
        assert!(dot.contains("r1 --"));
    }

    #[test]
    fn test_to_dot_constants() {
        let mgr = BddManager::new(1, 4);
        let dot = mgr.to_dot(&[mgr.zero(), mgr.one()]).unwrap();
        assert!(dot.contains("r0 -- 0;"));
        assert!(dot.contains("r1 -- 1;"));
        assert!(!dot.contains("rank=same"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let mgr = BddManager::new(2, 8);
        let x = mgr.var(1);

        let config = DotConfig {
            use_html_labels: false,
            ..DotConfig::default()
        };
        let dot = mgr.to_dot_with_config(&[x], &config).unwrap();
        assert!(dot.contains("label=\"x1\""), "{}", dot);
    }

    #[test]
    fn test_to_dot_leaves_no_marks() {
        let mgr = BddManager::new(3, 8);
        let f = mgr.apply_or(mgr.var(0), mgr.var(2)).unwrap();
        mgr.to_dot(&[f]).unwrap();
        assert!(mgr.invariant_violations().is_empty());
    }
}

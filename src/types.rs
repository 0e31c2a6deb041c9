//! Type-safe wrappers for variables, node identifiers and literals.
//!
//! These newtypes keep slot indices, variable indices and literals apart,
//! so a slot number is never mistaken for a variable.

use std::fmt;
use std::ops::Neg;

/// A variable index (0-indexed).
///
/// Variables are totally ordered by their index: a smaller index is closer
/// to the root of every diagram. The order is fixed when the manager is
/// created and never changes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Sentinel index carried by the constant node.
    ///
    /// It compares greater than every real variable, so the ordering
    /// invariant `var(node) < var(child)` holds for constant children too.
    pub const CONST: Var = Var(u32::MAX);

    /// Creates a variable with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` equals the constant sentinel.
    pub const fn new(index: u32) -> Self {
        assert!(index != u32::MAX, "Variable index is reserved for the constant node");
        Var(index)
    }

    /// Returns the raw variable index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns `true` for the sentinel carried by the constant node.
    pub const fn is_const(self) -> bool {
        self.0 == u32::MAX
    }

    /// Positive literal of this variable.
    pub const fn pos(self) -> Lit {
        Lit::new(self, false)
    }

    /// Negative literal of this variable.
    pub const fn neg(self) -> Lit {
        Lit::new(self, true)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const() {
            write!(f, "const")
        } else {
            write!(f, "x{}", self.0)
        }
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

impl From<Var> for usize {
    fn from(var: Var) -> Self {
        var.0 as usize
    }
}

/// Index of a slot in the node table.
///
/// Slot 0 always holds the constant node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The slot of the constant node.
    pub const CONST: NodeId = NodeId(0);

    /// Largest slot index that still fits into a [`Ref`][crate::reference::Ref].
    pub const MAX: u32 = 0x7FFF_FFFF;

    /// Creates a new node id.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit into 31 bits.
    pub const fn new(index: u32) -> Self {
        assert!(index <= Self::MAX, "Node index does not fit into 31 bits");
        NodeId(index)
    }

    /// Returns the raw slot index.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the slot index for array access.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the slot of the constant node.
    pub const fn is_const(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        NodeId::new(index)
    }
}

/// A literal: a variable together with a polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    var: Var,
    negated: bool,
}

impl Lit {
    pub const fn new(var: Var, negated: bool) -> Self {
        Self { var, negated }
    }

    pub const fn var(self) -> Var {
        self.var
    }

    pub const fn is_negated(self) -> bool {
        self.negated
    }

    pub const fn is_positive(self) -> bool {
        !self.negated
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit::new(self.var, !self.negated)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "~{}", self.var)
        } else {
            write!(f, "{}", self.var)
        }
    }
}

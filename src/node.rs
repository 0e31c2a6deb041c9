use crate::reference::Ref;
use crate::types::Var;
use crate::utils::{hash3, MyHash};

/// A slot of the node table.
///
/// A slot is live iff `stamp` equals the manager's current generation.
/// Stale slots are reclaimed by simply overwriting them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub stamp: u32,
    pub variable: Var,
    pub high: Ref,
    pub low: Ref,
    /// Spare bit for traversals. Whoever sets it must clear it.
    pub mark: bool,
    /// Table epoch at which the slot was last claimed.
    pub born: u32,
}

impl Node {
    /// Stamp of a slot that was never claimed.
    pub const NEVER: u32 = 0;

    pub fn is_live(&self, generation: u32) -> bool {
        self.stamp == generation
    }

    /// Structural equality of the decision part, ignoring stamp and mark.
    pub fn matches(&self, variable: Var, high: Ref, low: Ref) -> bool {
        self.variable == variable && self.high == high && self.low == low
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            stamp: Node::NEVER,
            variable: Var::CONST,
            high: Ref::ONE,
            low: Ref::ONE,
            mark: false,
            born: 0,
        }
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        hash3(self.variable.index(), self.high.raw(), self.low.raw())
    }
}

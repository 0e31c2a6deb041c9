use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Neg, Not};

use crate::types::NodeId;

/// A handle to a node of the table, possibly complemented.
///
/// The least significant bit of `raw` is the complement flag, the remaining
/// bits store the slot index. Complementing a handle is a bit flip and never
/// touches the table.
///
/// `epoch` records the restart count of the table when the handle was issued.
/// It lets the manager reject a handle whose slot was reclaimed and reused by
/// a later generation. Equality, ordering and hashing look at `raw` only.
#[derive(Debug, Copy, Clone)]
pub struct Ref {
    raw: u32,
    epoch: u32,
}

impl Ref {
    /// The constant-true function: the regular handle of the constant node.
    pub const ONE: Self = Self::positive(NodeId::CONST);

    /// The constant-false function: the complemented handle of the constant node.
    pub const ZERO: Self = Self::negative(NodeId::CONST);

    /// Creates a new handle with the given slot and complement flag.
    pub const fn new(id: NodeId, complemented: bool) -> Self {
        Self {
            raw: (id.raw() << 1) | (complemented as u32),
            epoch: 0,
        }
    }

    /// Creates a regular (non-complemented) handle.
    pub const fn positive(id: NodeId) -> Self {
        Self::new(id, false)
    }

    /// Creates a complemented handle.
    pub const fn negative(id: NodeId) -> Self {
        Self::new(id, true)
    }

    /// The same handle, issued at `epoch`.
    #[inline]
    pub const fn with_epoch(self, epoch: u32) -> Self {
        Self { raw: self.raw, epoch }
    }

    /// Restart count of the table when this handle was issued.
    #[inline]
    pub const fn epoch(self) -> u32 {
        self.epoch
    }

    /// Returns the slot this handle points to.
    #[inline]
    pub const fn id(self) -> NodeId {
        NodeId::new(self.raw >> 1)
    }

    /// Returns `true` if this handle is complemented.
    #[inline]
    pub const fn is_complemented(self) -> bool {
        (self.raw & 1) != 0
    }

    /// Strips the complement flag.
    #[inline]
    pub const fn regular(self) -> Self {
        Self {
            raw: self.raw & !1,
            epoch: self.epoch,
        }
    }

    /// Complements the handle iff `cond` holds.
    #[inline]
    pub const fn not_cond(self, cond: bool) -> Self {
        Self {
            raw: self.raw ^ (cond as u32),
            epoch: self.epoch,
        }
    }

    /// Returns `true` if this handle points to the constant node.
    #[inline]
    pub const fn is_constant(self) -> bool {
        (self.raw >> 1) == 0
    }

    /// Returns the raw underlying value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.raw
    }
}

impl PartialEq for Ref {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Ref {}

impl PartialOrd for Ref {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ref {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl Hash for Ref {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.not_cond(true)
    }
}

impl Not for Ref {
    type Output = Self;

    fn not(self) -> Self::Output {
        -self
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Ref::ONE {
            write!(f, "1")
        } else if *self == Ref::ZERO {
            write!(f, "0")
        } else if self.is_complemented() {
            write!(f, "~{}", self.id())
        } else {
            write!(f, "{}", self.id())
        }
    }
}

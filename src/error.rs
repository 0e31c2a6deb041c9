//! Error types.
//!
//! The engine has exactly one recoverable failure: the node table ran out of
//! slots. Malformed input (an out-of-range variable, a complemented then-child,
//! a stale handle) is a bug in the caller and panics instead.

use std::fmt;

/// Out of node slots.
///
/// Returned when creating a node would push the number of live nodes past
/// the configured limit. The only way forward is
/// [`BddManager::restart`][crate::manager::BddManager::restart], which
/// invalidates every handle except the constants and the variables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CapacityExceeded;

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("node table capacity exceeded")
    }
}

impl std::error::Error for CapacityExceeded {}

impl From<CapacityExceeded> for std::io::Error {
    fn from(_: CapacityExceeded) -> Self {
        std::io::ErrorKind::OutOfMemory.into()
    }
}

/// Result type with [`CapacityExceeded`] error.
pub type BddResult<T> = Result<T, CapacityExceeded>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CapacityExceeded.to_string(), "node table capacity exceeded");
    }

    #[test]
    fn test_into_io_error() {
        let err: std::io::Error = CapacityExceeded.into();
        assert_eq!(err.kind(), std::io::ErrorKind::OutOfMemory);
    }
}

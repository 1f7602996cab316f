//! Errors for favorite-list mutations.

use thiserror::Error;

/// Local invariant violations. State is left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The value is already in the favorites list.
    #[error("{value} is already a favorite")]
    AlreadyFavorited { value: i64 },

    /// The value is not in the favorites list.
    #[error("{value} is not a favorite")]
    NotFavorited { value: i64 },

    /// The position does not exist in the favorites list.
    #[error("Index {index} out of range for {len} favorites")]
    IndexOutOfRange { index: usize, len: usize },
}

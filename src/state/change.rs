//! Change notifications published by [`AppState`](super::AppState).

/// A single observable mutation of the root state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The counter moved to this value.
    Count(i64),
    FavoriteAdded(i64),
    FavoriteRemoved(i64),
    PendingPrimeResult(Option<i64>),
    DetailSheetVisible(bool),
}

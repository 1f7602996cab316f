//! Favorites-only view over the root state.

use super::activity::ActivityEntry;
use super::app::AppState;
use super::error::StateError;

/// Narrowed read/write view onto the favorites and the activity log.
///
/// Holds a handle to the root state, not a copy. Every read returns the
/// root's current value and every write performs the root's own mutation,
/// activity entry included. Projections carry no state of their own and can
/// be created and dropped freely.
#[derive(Clone)]
pub struct FavoritesProjection {
    state: AppState,
}

impl FavoritesProjection {
    pub(super) fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn favorites(&self) -> Vec<i64> {
        self.state.favorites()
    }

    pub fn activity_log(&self) -> Vec<ActivityEntry> {
        self.state.activity_log()
    }

    pub fn is_favorite(&self, value: i64) -> bool {
        self.state.is_favorite(value)
    }

    pub fn add_favorite(&self, value: i64) -> Result<(), StateError> {
        self.state.add_favorite(value)
    }

    pub fn remove_favorite(&self, value: i64) -> Result<(), StateError> {
        self.state.remove_favorite(value)
    }

    pub fn remove_favorite_at(&self, index: usize) -> Result<(), StateError> {
        self.state.remove_favorite_at(index)
    }

    pub fn remove_favorites_at(&self, indices: &[usize]) -> Result<(), StateError> {
        self.state.remove_favorites_at(indices)
    }
}

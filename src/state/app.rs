//! Root application state.
//!
//! `AppState` is a cheap, cloneable handle. Every clone shares the same
//! storage, and every compound mutation runs under one lock so observers
//! never see a favorites change without its activity entry.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::prime::is_prime;

use super::activity::{ActivityEntry, ActivityKind, ActivityLog};
use super::change::StateChange;
use super::error::StateError;
use super::favorites::FavoritesProjection;

/// Capacity of the change notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Point-in-time copy of every field in [`AppState`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub count: i64,
    pub favorites: Vec<i64>,
    pub activity_log: Vec<ActivityEntry>,
    pub pending_prime_result: Option<i64>,
    pub is_detail_sheet_visible: bool,
}

/// Single source of truth for the counter session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
    changes: broadcast::Sender<StateChange>,
}

#[derive(Default)]
struct AppStateInner {
    count: i64,
    /// Insertion-ordered, duplicate-free.
    favorites: Vec<i64>,
    activity_log: ActivityLog,
    pending_prime_result: Option<i64>,
    is_detail_sheet_visible: bool,
}

impl AppStateInner {
    fn insert_favorite(&mut self, value: i64) -> Result<(), StateError> {
        if self.favorites.contains(&value) {
            return Err(StateError::AlreadyFavorited { value });
        }
        self.favorites.push(value);
        self.activity_log
            .append(ActivityEntry::now(ActivityKind::FavoriteAdded(value)));
        Ok(())
    }

    fn delete_favorite(&mut self, value: i64) -> Result<(), StateError> {
        let position = self
            .favorites
            .iter()
            .position(|&v| v == value)
            .ok_or(StateError::NotFavorited { value })?;
        self.favorites.remove(position);
        self.activity_log
            .append(ActivityEntry::now(ActivityKind::FavoriteRemoved(value)));
        Ok(())
    }

    fn favorite_at(&self, index: usize) -> Result<i64, StateError> {
        self.favorites
            .get(index)
            .copied()
            .ok_or(StateError::IndexOutOfRange {
                index,
                len: self.favorites.len(),
            })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create an empty session state (count 0, no favorites).
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(AppStateInner::default())),
            changes,
        }
    }

    /// Subscribe to state changes.
    ///
    /// Changes are published while the state lock is held, so a subscriber
    /// receives them in mutation order.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn publish(&self, change: StateChange) {
        // No subscribers is not an error.
        let _ = self.changes.send(change);
    }

    // -- Reads ---------------------------------------------------------------

    pub fn count(&self) -> i64 {
        self.inner.lock().count
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> Vec<i64> {
        self.inner.lock().favorites.clone()
    }

    pub fn is_favorite(&self, value: i64) -> bool {
        self.inner.lock().favorites.contains(&value)
    }

    /// Activity entries in chronological order.
    pub fn activity_log(&self) -> Vec<ActivityEntry> {
        self.inner.lock().activity_log.entries().to_vec()
    }

    pub fn pending_prime_result(&self) -> Option<i64> {
        self.inner.lock().pending_prime_result
    }

    pub fn is_detail_sheet_visible(&self) -> bool {
        self.inner.lock().is_detail_sheet_visible
    }

    /// Copy every field under a single lock acquisition.
    pub fn snapshot(&self) -> AppSnapshot {
        let state = self.inner.lock();
        AppSnapshot {
            count: state.count,
            favorites: state.favorites.clone(),
            activity_log: state.activity_log.entries().to_vec(),
            pending_prime_result: state.pending_prime_result,
            is_detail_sheet_visible: state.is_detail_sheet_visible,
        }
    }

    // -- Counter -------------------------------------------------------------

    pub fn increment(&self) {
        self.step_count(1);
    }

    pub fn decrement(&self) {
        self.step_count(-1);
    }

    fn step_count(&self, delta: i64) {
        let mut state = self.inner.lock();
        state.count = state.count.wrapping_add(delta);
        tracing::debug!(count = state.count, "Count changed");
        self.publish(StateChange::Count(state.count));
    }

    /// Test the current count for primality.
    ///
    /// A prime count opens the detail sheet.
    pub fn check_count_is_prime(&self) -> bool {
        let mut state = self.inner.lock();
        let prime = is_prime(state.count);
        if prime && !state.is_detail_sheet_visible {
            state.is_detail_sheet_visible = true;
            self.publish(StateChange::DetailSheetVisible(true));
        }
        prime
    }

    // -- Favorites -----------------------------------------------------------

    /// Append `value` to the favorites and log the addition.
    ///
    /// # Errors
    /// Returns `AlreadyFavorited` if the value is present. State is unchanged on error.
    pub fn add_favorite(&self, value: i64) -> Result<(), StateError> {
        let mut state = self.inner.lock();
        state.insert_favorite(value)?;
        tracing::debug!(value, favorites = state.favorites.len(), "Favorite added");
        self.publish(StateChange::FavoriteAdded(value));
        Ok(())
    }

    /// Remove `value` from the favorites and log the removal.
    ///
    /// # Errors
    /// Returns `NotFavorited` if the value is absent. State is unchanged on error.
    pub fn remove_favorite(&self, value: i64) -> Result<(), StateError> {
        let mut state = self.inner.lock();
        state.delete_favorite(value)?;
        tracing::debug!(value, favorites = state.favorites.len(), "Favorite removed");
        self.publish(StateChange::FavoriteRemoved(value));
        Ok(())
    }

    /// Remove the favorite at `index`.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if there is no favorite at that position.
    pub fn remove_favorite_at(&self, index: usize) -> Result<(), StateError> {
        let mut state = self.inner.lock();
        let value = state.favorite_at(index)?;
        state.delete_favorite(value)?;
        tracing::debug!(index, value, "Favorite removed by position");
        self.publish(StateChange::FavoriteRemoved(value));
        Ok(())
    }

    /// Remove the favorites at every position in `indices`.
    ///
    /// All positions are resolved against the list as it is before the call,
    /// and all are validated before anything is removed. Repeated positions
    /// remove their value once.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` for the first invalid position. State is unchanged on error.
    pub fn remove_favorites_at(&self, indices: &[usize]) -> Result<(), StateError> {
        let mut state = self.inner.lock();

        let mut values = Vec::with_capacity(indices.len());
        for &index in indices {
            let value = state.favorite_at(index)?;
            if !values.contains(&value) {
                values.push(value);
            }
        }

        for value in values {
            state.delete_favorite(value)?;
            tracing::debug!(value, "Favorite removed by position");
            self.publish(StateChange::FavoriteRemoved(value));
        }
        Ok(())
    }

    /// Save the current count as a favorite.
    pub fn add_count_to_favorites(&self) -> Result<(), StateError> {
        let mut state = self.inner.lock();
        let value = state.count;
        state.insert_favorite(value)?;
        tracing::debug!(value, "Current count added to favorites");
        self.publish(StateChange::FavoriteAdded(value));
        Ok(())
    }

    /// Remove the current count from the favorites.
    pub fn remove_count_from_favorites(&self) -> Result<(), StateError> {
        let mut state = self.inner.lock();
        let value = state.count;
        state.delete_favorite(value)?;
        tracing::debug!(value, "Current count removed from favorites");
        self.publish(StateChange::FavoriteRemoved(value));
        Ok(())
    }

    /// Narrow view exposing only favorites and the activity log.
    pub fn project_favorites(&self) -> FavoritesProjection {
        FavoritesProjection::new(self.clone())
    }

    // -- Alert & sheet -------------------------------------------------------

    /// Overwrite the result awaiting acknowledgment. Last writer wins.
    pub fn set_pending_prime_result(&self, value: Option<i64>) {
        let mut state = self.inner.lock();
        state.pending_prime_result = value;
        tracing::debug!(?value, "Pending prime result set");
        self.publish(StateChange::PendingPrimeResult(value));
    }

    /// Acknowledge the pending result: return it and clear the slot.
    pub fn take_pending_prime_result(&self) -> Option<i64> {
        let mut state = self.inner.lock();
        let value = state.pending_prime_result.take();
        if value.is_some() {
            self.publish(StateChange::PendingPrimeResult(None));
        }
        value
    }

    pub fn set_detail_sheet_visible(&self, visible: bool) {
        let mut state = self.inner.lock();
        if state.is_detail_sheet_visible != visible {
            state.is_detail_sheet_visible = visible;
            self.publish(StateChange::DetailSheetVisible(visible));
        }
    }

    /// Flip sheet visibility and return the new value.
    pub fn toggle_detail_sheet(&self) -> bool {
        let mut state = self.inner.lock();
        state.is_detail_sheet_visible = !state.is_detail_sheet_visible;
        let visible = state.is_detail_sheet_visible;
        self.publish(StateChange::DetailSheetVisible(visible));
        visible
    }
}

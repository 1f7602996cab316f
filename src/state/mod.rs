//! Root session state and its narrowed projections.
//!
//! Provides a single source of truth for the counter, the favorite primes,
//! the favorites activity log, and the pending nth-prime alert.

mod activity;
mod app;
mod change;
mod error;
mod favorites;

pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use app::{AppSnapshot, AppState};
pub use change::StateChange;
pub use error::StateError;
pub use favorites::FavoritesProjection;

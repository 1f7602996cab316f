//! Reducer trait.

use super::intent::Intent;
use super::state::ModelState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: ModelState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

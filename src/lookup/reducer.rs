//! Reducer for the nth-prime lookup.

use crate::mvi::Reducer;

use super::intent::LookupIntent;
use super::state::LookupPhase;

/// Single-flight lookup transitions.
///
/// Intents that are not legal in the current phase leave it unchanged.
pub struct LookupReducer;

impl Reducer for LookupReducer {
    type State = LookupPhase;
    type Intent = LookupIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (LookupPhase::Idle, LookupIntent::Request { n }) => {
                LookupPhase::InFlight { for_count: n }
            }

            (LookupPhase::InFlight { .. }, LookupIntent::Resolve { value }) => {
                LookupPhase::Completed { result: value }
            }

            (LookupPhase::InFlight { .. }, LookupIntent::Fail) => LookupPhase::Idle,

            (LookupPhase::Completed { .. }, LookupIntent::Acknowledge) => LookupPhase::Idle,

            (other, _) => other,
        }
    }
}

//! Phase of the nth-prime lookup.

use crate::mvi::ModelState;

/// Where a single-flight lookup currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupPhase {
    /// No lookup running; a new request may start.
    #[default]
    Idle,

    /// A lookup is outstanding.
    InFlight {
        /// The `n` that was requested.
        for_count: i64,
    },

    /// The service answered; the result is being published.
    Completed { result: Option<i64> },
}

impl ModelState for LookupPhase {}

impl LookupPhase {
    /// Whether the triggering control should be enabled.
    pub fn accepts_requests(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// The `n` being looked up, if any.
    pub fn pending_count(&self) -> Option<i64> {
        match self {
            Self::InFlight { for_count } => Some(*for_count),
            _ => None,
        }
    }
}

//! Intents for the nth-prime lookup.

use crate::mvi::Intent;

/// Events that drive [`LookupPhase`](super::LookupPhase) transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupIntent {
    /// Caller asked for the `n`th prime.
    Request { n: i64 },

    /// The service answered.
    Resolve { value: Option<i64> },

    /// The service call failed.
    Fail,

    /// The completed result has been published.
    Acknowledge,
}

impl Intent for LookupIntent {}

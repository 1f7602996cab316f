//! Error types for prime lookups.

use thiserror::Error;

/// Errors that can occur while asking the external service for the nth prime.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport failure, timeout, or a non-success HTTP status.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered, but no integer could be extracted from the answer.
    #[error("Could not find an integer in the answer: {answer}")]
    Unparseable { answer: String },

    /// The answer was well formed but carried no primary result.
    #[error("Service returned no result: {reason}")]
    ServiceError { reason: String },
}

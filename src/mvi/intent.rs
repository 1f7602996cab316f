//! Base trait for intents in the reducer architecture.

/// Marker trait for intent objects.
///
/// Intents represent caller actions (a lookup request) and system events
/// (a service response arriving).
pub trait Intent: Send + 'static {}

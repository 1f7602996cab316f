//! Single-flight nth-prime lookup.
//!
//! # Architecture
//!
//! - `state.rs` - Lookup phase enum
//! - `intent.rs` - Requests and service events
//! - `reducer.rs` - Pure phase transitions
//! - `workflow.rs` - Async driver that publishes results into `AppState`

mod intent;
mod reducer;
mod state;
mod workflow;

pub use intent::LookupIntent;
pub use reducer::LookupReducer;
pub use state::LookupPhase;
pub use workflow::{LookupFailure, LookupHandle, NthPrimeWorkflow, RequestOutcome};

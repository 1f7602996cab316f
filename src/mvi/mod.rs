//! Model-Intent-Reducer primitives.
//!
//! State machines in this crate are expressed as pure reducers so their
//! transitions can be tested without a runtime.
//!
//! ```text
//! Intent ──→ Reducer ──→ State
//!    ↑                     │
//!    └─────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ModelState;

//! Reactive counter state core.
//!
//! A counter whose value can be tested for primality and looked up against
//! a remote nth-prime service, a list of favorite primes, and an audit log
//! of every change to that list.

pub mod config;
pub mod lookup;
pub mod mvi;
pub mod prime;
pub mod state;
pub mod telemetry;

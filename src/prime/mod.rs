//! Prime predicates and the external nth-prime lookup.

mod client;
mod error;
mod oracle;

pub use client::{PrimeLookup, WolframAlphaClient};
pub use error::LookupError;
pub use oracle::{extract_first_integer, is_prime, ordinal};

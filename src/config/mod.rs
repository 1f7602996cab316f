//! Configuration for the nth-prime lookup service.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LookupConfig, APP_ID_ENV_VAR};

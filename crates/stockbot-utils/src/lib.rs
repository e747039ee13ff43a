//! Shared utilities for stockbot
//!
//! Logging setup used by the `stock-bot` binary and anything else that wants
//! the same subscriber configuration.

pub mod logging;

pub use logging::{DEFAULT_DIRECTIVE, init_tracing};

//! # Observability
//!
//! Structured logging for the CredHub client.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig};
pub(crate) use logging::request_span;

//! # Error Handling
//!
//! Every failure surfaced by this crate is a [`CredHubError`]. Local
//! precondition failures are raised before any network call; remote failures
//! (non-2xx responses and 2xx bodies carrying `error_message`) are normalized
//! into [`CredHubError::Api`] with the exact HTTP status.

pub mod types;

pub use types::{CredHubError, ErrorBody, Result};

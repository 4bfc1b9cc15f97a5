//! # CredHub client
//!
//! Typed access to a CredHub server over its JSON HTTP API: storing,
//! generating and reading credentials, managing certificate rotation and
//! permissions, and resolving `credhub-ref` placeholders in Cloud Foundry
//! service bindings.
//!
//! ## Architecture
//!
//! ```text
//! CredHubClient ─┬─ credentials()     ─┐
//!                ├─ certificates()     │
//!                ├─ permissions()      ├─ HttpClient ── reqwest (mTLS, OAuth2 bearer)
//!                ├─ permissions_v2()   │
//!                ├─ interpolation()    │
//!                └─ info()            ─┘
//! ```
//!
//! The façades validate arguments locally, send one request and decode the
//! response into the models in [`credential`], [`permission`],
//! [`certificate`], [`interpolation`] and [`info`]. Every failure is a
//! [`CredHubError`]; anything CredHub rejects is [`CredHubError::Api`] with
//! the HTTP status and the server's message.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use credhub::credential::{CredentialName, PasswordParameters, ParametersRequest, WriteMode};
//! use credhub::{CredHubClient, CredHubProperties, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CredHubClient::new(&CredHubProperties::from_env())?;
//!
//!     let name = CredentialName::new("/my-app/db-password")?;
//!     let request = ParametersRequest::new(name.clone(), PasswordParameters::default().with_length(40))
//!         .with_mode(WriteMode::Converge);
//!     client.credentials().generate(&request).await?;
//!
//!     let current = client.credentials().get_by_name(&name).await?;
//!     println!("{} version {}", current.name, current.id);
//!     Ok(())
//! }
//! ```

pub mod certificate;
pub mod cli;
pub mod config;
pub mod credential;
pub mod errors;
pub mod http;
pub mod info;
pub mod interpolation;
pub mod observability;
pub mod operations;
pub mod permission;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export commonly used types and traits
pub use config::{ClientTlsConfig, CredHubProperties, OAuth2Properties};
pub use credential::{CredentialName, CredentialType, CredentialValue, SecretString};
pub use errors::{CredHubError, Result};
pub use http::{HttpClient, StaticTokenProvider, TokenProvider};
pub use operations::CredHubClient;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

//! # Configuration Management
//!
//! Client settings, loaded from the environment or built in code and checked
//! with the `validator` crate before a client is constructed.

pub mod settings;

pub use settings::{
    ClientTlsConfig, CredHubProperties, OAuth2Properties, DEFAULT_CONNECT_TIMEOUT_SECONDS,
    DEFAULT_CREDHUB_URL, DEFAULT_READ_TIMEOUT_SECONDS,
};

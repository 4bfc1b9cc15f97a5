//! HTTP plumbing: client construction, bearer tokens and response handling.

pub mod client;
pub mod factory;
pub mod oauth2;

pub use client::HttpClient;
pub use factory::{ClientFactory, USER_AGENT};
pub use oauth2::{
    ClientCredentialsTokenProvider, StaticTokenProvider, TokenProvider, TOKEN_EXPIRY_SKEW,
};

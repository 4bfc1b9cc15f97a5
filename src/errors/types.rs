//! # Error Types
//!
//! Error types for the CredHub client using `thiserror`.


/// Result type for CredHub operations.
pub type Result<T> = std::result::Result<T, CredHubError>;

/// Main error type for the CredHub client.
#[derive(thiserror::Error, Debug)]
pub enum CredHubError {
    /// A required argument was missing or malformed. No request was sent.
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// CredHub answered with an error status, or with an in-body error message.
    #[error("Error response from CredHub (status {status}): {}", .message.as_deref().unwrap_or("no error message"))]
    Api { status: u16, message: Option<String> },

    /// Transport-level failure (connection refused, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from CredHub: {0}")]
    UnexpectedResponse(String),

    /// OAuth2 token acquisition failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading key material, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CredHubError {
    /// Create an invalid argument error
    pub fn invalid_argument<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::InvalidArgument { field: field.into(), reason: reason.into() }
    }

    /// Create an API error for the given status
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Create an unexpected response error
    pub fn unexpected_response<S: Into<String>>(message: S) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Build an API error from a response status and its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::api(status, ErrorBody::parse(body).and_then(ErrorBody::into_message))
    }

    /// HTTP status carried by a remote failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-supplied error message, when one was returned.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True for a 404 from CredHub.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<validator::ValidationErrors> for CredHubError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Config(errors.to_string())
    }
}

/// Error fields CredHub and its UAA place in JSON bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub error_message: Option<String>,
    pub error_description: Option<String>,
}

impl ErrorBody {
    /// Parse an error body; anything that is not a JSON object yields `None`.
    /// Fields that are not strings are ignored.
    pub fn parse(body: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        let object = value.as_object()?;
        let field = |key: &str| object.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Some(Self {
            error: field("error"),
            error_message: field("error_message"),
            error_description: field("error_description"),
        })
    }

    /// The most specific non-empty message available.
    pub fn into_message(self) -> Option<String> {
        let non_empty = |m: Option<String>| m.filter(|m| !m.is_empty());
        non_empty(self.error_message)
            .or_else(|| non_empty(self.error_description))
            .or_else(|| non_empty(self.error))
    }
}

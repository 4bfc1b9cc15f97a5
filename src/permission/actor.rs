//! Actor identities used in permissions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CredHubError, Result};

/// Kind of principal an actor string identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    /// An application authenticated with its instance identity certificate.
    App,
    /// A UAA user.
    User,
    /// A UAA OAuth2 client.
    Client,
}

impl ActorType {
    pub fn prefix(&self) -> &'static str {
        match self {
            ActorType::App => "mtls-app",
            ActorType::User => "uaa-user",
            ActorType::Client => "uaa-client",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "mtls-app" => Some(ActorType::App),
            "uaa-user" => Some(ActorType::User),
            "uaa-client" => Some(ActorType::Client),
            _ => None,
        }
    }
}

/// An actor identity rendered as `{prefix}:{id}`, e.g. `mtls-app:<app-guid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    actor_type: ActorType,
    primary_identifier: String,
}

impl Actor {
    pub fn new(actor_type: ActorType, primary_identifier: impl Into<String>) -> Self {
        Self { actor_type, primary_identifier: primary_identifier.into() }
    }

    pub fn app(app_guid: impl Into<String>) -> Self {
        Self::new(ActorType::App, app_guid)
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self::new(ActorType::User, user_id)
    }

    pub fn client(client_id: impl Into<String>) -> Self {
        Self::new(ActorType::Client, client_id)
    }

    pub fn actor_type(&self) -> ActorType {
        self.actor_type
    }

    pub fn primary_identifier(&self) -> &str {
        &self.primary_identifier
    }

    /// The `{prefix}:{id}` string CredHub expects.
    pub fn identity(&self) -> String {
        format!("{}:{}", self.actor_type.prefix(), self.primary_identifier)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.actor_type.prefix(), self.primary_identifier)
    }
}

impl FromStr for Actor {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        let (prefix, id) = s.split_once(':').ok_or_else(|| {
            CredHubError::invalid_argument("actor", format!("'{}' is not of the form prefix:id", s))
        })?;

        let actor_type = ActorType::from_prefix(prefix).ok_or_else(|| {
            CredHubError::invalid_argument(
                "actor",
                format!("unknown actor prefix '{}'; use mtls-app, uaa-user or uaa-client", prefix),
            )
        })?;

        if id.is_empty() {
            return Err(CredHubError::invalid_argument("actor", "actor id must not be empty"));
        }

        Ok(Self::new(actor_type, id))
    }
}

impl Serialize for Actor {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Actor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

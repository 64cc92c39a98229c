//! Skill session
//!
//! The platform owns the session. It sends it with every turn and expects
//! the attributes back in the reply while the conversation stays open.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application the request was addressed to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// The user behind the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<String>,

    /// Present only once account linking has completed
    #[serde(default)]
    pub access_token: Option<String>,
}

/// One conversation, as delivered by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// True on the first turn of the conversation
    #[serde(default)]
    pub new: bool,

    pub session_id: String,

    #[serde(default)]
    pub application: Application,

    /// Key-value attributes round-tripped by the platform
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Map<String, Value>,

    #[serde(default)]
    pub user: User,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let map: Option<Map<String, Value>> = Option::deserialize(deserializer)?;
    Ok(map.unwrap_or_default())
}

impl Session {
    /// Create a session with the given id, addressed to `application_id`
    pub fn new(session_id: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            new: true,
            session_id: session_id.into(),
            application: Application {
                application_id: application_id.into(),
            },
            attributes: Map::new(),
            user: User::default(),
        }
    }

    /// Set the linked-account access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.user.access_token = Some(token.into());
        self
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the application ID the request was addressed to
    pub fn application_id(&self) -> &str {
        &self.application.application_id
    }

    /// Access token, if the account is linked
    ///
    /// An empty token counts as missing.
    pub fn access_token(&self) -> Option<&str> {
        self.user
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Set an attribute value
    pub fn set_attribute<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }
}

//! Identity types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Verified caller identity returned by the user-info endpoint
///
/// `profile` carries the linked secondary contact address (the doctor's
/// email in this skill). Every other claim is kept in `claims`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub profile: String,

    #[serde(flatten)]
    pub claims: HashMap<String, Value>,
}

impl Identity {
    /// Create an identity from its three core claims
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            profile: profile.into(),
            claims: HashMap::new(),
        }
    }

    /// Get any other claim by name
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }
}

/// Errors from identity resolution
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Endpoint answered with a non-2xx status
    #[error("User info request rejected ({status}): {path}")]
    RemoteAuth { status: u16, path: String },

    /// Request never got an answer
    #[error("User info transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not a valid identity payload
    #[error("User info decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// No answer within the deadline
    #[error("User info request timed out after {0}ms")]
    Timeout(u64),
}

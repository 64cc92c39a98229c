//! Skill error types

use thiserror::Error;

use crate::identity::IdentityError;

/// Errors that abort a turn
///
/// Recoverable conditions (unknown intent, missing slot, missing access
/// token, data gateway failures) never surface here: handlers turn them
/// into spoken replies.
#[derive(Error, Debug)]
pub enum SkillError {
    /// Request came from an application other than the configured one
    #[error("Invalid Application ID: {0}")]
    InvalidApplication(String),

    /// Request type this skill does not route
    #[error("Unsupported request type for request {0}")]
    UnsupportedRequest(String),

    /// Request is missing data its type requires
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Identity resolution failed
    #[error("Identity resolution failed")]
    Identity(#[from] IdentityError),

    /// A handler gave up on the turn
    #[error("Handler failed: {0}")]
    Handler(String),

    /// IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl SkillError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        SkillError::Other(msg.into())
    }

    /// Create a handler error
    pub fn handler(msg: impl Into<String>) -> Self {
        SkillError::Handler(msg.into())
    }

    /// Message reported to the platform when this error aborts a turn
    ///
    /// The source chain stands in for a stack trace.
    pub fn failure_message(&self) -> String {
        if let SkillError::InvalidApplication(_) = self {
            return "Invalid Application ID".to_string();
        }

        let mut msg = format!("Exception: {}", self);
        let mut source = std::error::Error::source(self);
        if source.is_some() {
            msg.push_str("\nCaused by:");
        }
        while let Some(err) = source {
            msg.push_str("\n    ");
            msg.push_str(&err.to_string());
            source = err.source();
        }
        msg
    }
}

/// Result type alias for skill operations
pub type SkillResult<T> = Result<T, SkillError>;

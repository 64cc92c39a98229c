//! Inbound request types
//!
//! One `RequestEnvelope` arrives per turn. Field names follow the
//! platform's camelCase wire format.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Kind of request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    /// Any request type this skill does not route
    #[serde(other)]
    Unsupported,
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestType::LaunchRequest => write!(f, "LaunchRequest"),
            RequestType::IntentRequest => write!(f, "IntentRequest"),
            RequestType::SessionEndedRequest => write!(f, "SessionEndedRequest"),
            RequestType::Unsupported => write!(f, "Unsupported"),
        }
    }
}

/// A single slot as sent by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

impl Slot {
    /// Create a filled slot
    pub fn filled(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Create a slot the user did not fill
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }
}

/// The intent recognized from the utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Create an intent with no slots
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Add a slot with a value
    pub fn with_slot(mut self, name: &str, value: impl Into<String>) -> Self {
        self.slots.insert(name.to_string(), Slot::filled(name, value));
        self
    }

    /// Add a slot without a value
    pub fn with_empty_slot(mut self, name: &str) -> Self {
        self.slots.insert(name.to_string(), Slot::empty(name));
        self
    }
}

/// One immutable unit of conversational input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: RequestType,

    pub request_id: String,

    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub locale: Option<String>,

    /// Present on intent requests
    #[serde(default)]
    pub intent: Option<Intent>,

    /// Present on session-ended requests
    #[serde(default)]
    pub reason: Option<String>,
}

impl Request {
    fn with_kind(kind: RequestType, request_id: impl Into<String>) -> Self {
        Self {
            kind,
            request_id: request_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            locale: None,
            intent: None,
            reason: None,
        }
    }

    /// Create a launch request
    pub fn launch(request_id: impl Into<String>) -> Self {
        Self::with_kind(RequestType::LaunchRequest, request_id)
    }

    /// Create an intent request
    pub fn intent(request_id: impl Into<String>, intent: Intent) -> Self {
        let mut request = Self::with_kind(RequestType::IntentRequest, request_id);
        request.intent = Some(intent);
        request
    }

    /// Create a session-ended request
    pub fn session_ended(request_id: impl Into<String>) -> Self {
        Self::with_kind(RequestType::SessionEndedRequest, request_id)
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Intent name, if this is an intent request
    pub fn intent_name(&self) -> Option<&str> {
        self.intent.as_ref().map(|i| i.name.as_str())
    }
}

/// Everything the platform sends for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,

    pub session: Session,

    pub request: Request,
}

impl RequestEnvelope {
    /// Pair a session with a request
    pub fn new(session: Session, request: Request) -> Self {
        Self {
            version: Some("1.0".to_string()),
            session,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(serde_json::json!({
            "session": {
                "new": false,
                "sessionId": "s1",
                "application": { "applicationId": "app" },
                "user": { "userId": "u1" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "r1",
                "timestamp": "2026-10-19T09:30:00Z",
                "locale": "en-US",
                "intent": {
                    "name": "DataRecordIntent",
                    "slots": {
                        "Parameter": { "name": "Parameter", "value": "heart rate" },
                        "value": { "name": "value" }
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.request.kind, RequestType::IntentRequest);
        assert_eq!(envelope.request.intent_name(), Some("DataRecordIntent"));
        let intent = envelope.request.intent.unwrap();
        assert_eq!(
            intent.slots["Parameter"].value.as_deref(),
            Some("heart rate")
        );
        assert_eq!(intent.slots["value"].value, None);
    }

    #[test]
    fn test_unknown_request_type() {
        let request: Request = serde_json::from_value(serde_json::json!({
            "type": "AudioPlayer.PlaybackStarted",
            "requestId": "r2"
        }))
        .unwrap();

        assert_eq!(request.kind, RequestType::Unsupported);
        assert!(request.intent.is_none());
        assert_eq!(request.timestamp, "");
    }

    #[test]
    fn test_builders() {
        let request = Request::intent(
            "r3",
            Intent::new("DataRecordIntent")
                .with_slot("Parameter", "heart rate")
                .with_empty_slot("unit"),
        )
        .with_locale("en-IN");

        assert_eq!(request.kind, RequestType::IntentRequest);
        assert_eq!(request.locale.as_deref(), Some("en-IN"));
        assert_eq!(request.intent.unwrap().slots.len(), 2);
        assert_eq!(RequestType::SessionEndedRequest.to_string(), "SessionEndedRequest");
    }
}

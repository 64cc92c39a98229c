//! Hook Types
//!
//! - `LifecycleEvent` - The session lifecycle point being observed
//! - `LifecycleContext` - Mutable context passed to hooks

use serde_json::Value;

use crate::session::Session;
use crate::skill::Request;

/// Session lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// First turn of a new session, before routing
    SessionStarted,
    /// Platform reported the session closed
    SessionEnded,
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::SessionStarted => write!(f, "SessionStarted"),
            LifecycleEvent::SessionEnded => write!(f, "SessionEnded"),
        }
    }
}

/// Mutable context passed to hooks
///
/// Hooks may read the request and change session attributes. Changes made
/// on `SessionStarted` are visible to the handler of the same turn.
pub struct LifecycleContext<'a> {
    /// The hook event type
    pub event: LifecycleEvent,

    /// The request that triggered the event
    pub request: &'a Request,

    /// The session, attributes included
    pub session: &'a mut Session,
}

impl<'a> LifecycleContext<'a> {
    /// Create context for a SessionStarted hook
    pub fn session_started(request: &'a Request, session: &'a mut Session) -> Self {
        Self {
            event: LifecycleEvent::SessionStarted,
            request,
            session,
        }
    }

    /// Create context for a SessionEnded hook
    pub fn session_ended(request: &'a Request, session: &'a mut Session) -> Self {
        Self {
            event: LifecycleEvent::SessionEnded,
            request,
            session,
        }
    }

    /// Text that hook patterns are matched against
    ///
    /// The end reason (e.g. `USER_INITIATED`, `ERROR`) for SessionEnded,
    /// the request type for SessionStarted.
    pub fn subject(&self) -> String {
        match self.event {
            LifecycleEvent::SessionEnded => self.request.reason.clone().unwrap_or_default(),
            LifecycleEvent::SessionStarted => self.request.kind.to_string(),
        }
    }

    /// Get request ID
    pub fn request_id(&self) -> &str {
        &self.request.request_id
    }

    /// Get session ID
    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    /// Set a session attribute
    pub fn set_attribute(&mut self, key: &str, value: Value) {
        self.session.set_attribute(key, value);
    }
}

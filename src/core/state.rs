//! Turn state types

use serde::{Deserialize, Serialize};

/// Where a single turn is in the dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnState {
    /// Request accepted, new-session hooks may run
    Started,

    /// Request type inspected
    Routed,

    /// Launch handler running
    Launch,

    /// Intent handler running
    Intent {
        /// Name of the intent being handled
        name: String,
    },

    /// Session-ended hooks running
    SessionEnded,

    /// Turn finished, with or without a reply body
    Completed,

    /// Turn aborted
    Failed {
        /// Error message
        message: String,
    },
}

impl TurnState {
    /// Check if the turn is in a terminal state (Completed or Failed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Completed | TurnState::Failed { .. })
    }

    /// Check if a handler is running
    pub fn is_handling(&self) -> bool {
        matches!(
            self,
            TurnState::Launch | TurnState::Intent { .. } | TurnState::SessionEnded
        )
    }

    /// Create an intent state
    pub fn intent(name: impl Into<String>) -> Self {
        TurnState::Intent { name: name.into() }
    }

    /// Create a failed state
    pub fn failed(msg: impl Into<String>) -> Self {
        TurnState::Failed {
            message: msg.into(),
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::Started
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Started => write!(f, "Started"),
            TurnState::Routed => write!(f, "Routed"),
            TurnState::Launch => write!(f, "Launch"),
            TurnState::Intent { name } => write!(f, "Intent: {}", name),
            TurnState::SessionEnded => write!(f, "SessionEnded"),
            TurnState::Completed => write!(f, "Completed"),
            TurnState::Failed { message } => write!(f, "Failed: {}", message),
        }
    }
}

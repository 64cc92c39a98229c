//! Core types for the skill
//!
//! This module provides the fundamental types used throughout the crate:
//! - `SkillConfig` - Process-wide configuration
//! - `TurnState` - Where a turn is in the dispatcher
//! - `SkillError` - Error types

pub mod config;
pub mod error;
pub mod state;

pub use config::SkillConfig;
pub use error::{SkillError, SkillResult};
pub use state::TurnState;

//! Intent handling
//!
//! This module provides:
//! - `IntentHandler` trait - Interface for implementing intent handlers
//! - `IntentRegistry` - Registry mapping intent names to handlers

mod handler;
mod registry;

pub use handler::IntentHandler;
pub use registry::IntentRegistry;

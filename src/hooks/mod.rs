//! Hooks Module
//!
//! Run code at session lifecycle points.
//!
//! # Overview
//!
//! Hooks let you:
//! - Seed session attributes when a conversation starts
//! - Clean up or audit when the platform closes a session
//!
//! # Hook Events
//!
//! | Event | When | Pattern subject |
//! |-------|------|-----------------|
//! | `SessionStarted` | First turn of a new session, before routing | request type |
//! | `SessionEnded` | `SessionEndedRequest` received | end reason |
//!
//! Every registry logs each event at debug level, hooks or not.

mod registry;
mod types;

pub use registry::{ArcHook, Hook, HookMatcher, LifecycleHooks};
pub use types::{LifecycleContext, LifecycleEvent};

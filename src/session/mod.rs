//! Session model
//!
//! This module provides `Session`, the per-conversation state delivered by
//! the voice platform on every turn. Nothing here is kept in process
//! memory between turns.

pub mod session;

pub use session::{Application, Session, User};

pub mod core;
pub mod session;
pub mod skill;
pub mod intents;

// Outbound collaborators
pub mod identity;
pub mod gateway;

// Session lifecycle hooks
pub mod hooks;

// The Docs health skill built on the runtime above
pub mod health;

// Line-delimited stdin/stdout front end
pub mod driver;

pub mod logging;

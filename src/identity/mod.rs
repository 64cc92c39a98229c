//! Identity resolution
//!
//! Turns a linked-account bearer token into the caller's verified
//! identity (email, display name, profile).

mod client;
mod identity;

pub use client::{resolver_fn, FnIdentityResolver, IdentityResolver, UserInfoClient, USER_INFO_PATH};
pub use identity::{Identity, IdentityError};

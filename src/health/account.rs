//! Account-linking gate shared by the data intents

use std::sync::LazyLock;

use regex::Regex;

use crate::skill::{FinalResponse, Response, ResponseOptions, TurnContext};

use super::messages::{ACCOUNT_SETUP_TITLE, NOT_LOGGED_IN};

/// A single address with something on either side of the `@`
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

/// Access token for a linked account, or `None` if the user must link first
pub(crate) fn linked_token(turn: &TurnContext<'_>) -> Option<String> {
    turn.access_token().map(str::to_owned)
}

/// Reply asking the user to link their account; ends the session
pub(crate) fn link_account(mut response: Response) -> FinalResponse {
    response.link_account_card(ACCOUNT_SETUP_TITLE);
    response.done(
        ResponseOptions::new()
            .speech(NOT_LOGGED_IN)
            .end_session(true),
    )
}

/// Whether `address` looks like an email address
pub fn is_email(address: &str) -> bool {
    EMAIL_RE.is_match(address.trim())
}

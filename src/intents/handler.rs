//! Intent handler trait definition
//!
//! All handlers implement this trait to provide a consistent interface.

use async_trait::async_trait;

use crate::core::SkillResult;
use crate::skill::{FinalResponse, Response, TurnContext};

/// Trait for intent handlers
///
/// A handler receives the turn and a fresh `Response`. It must either
/// consume the response (`done`/`finish`) and return the result, or return
/// an error to abort the turn. Recoverable conditions should be spoken,
/// not returned as errors.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Intent name this handler answers, matched exactly
    fn name(&self) -> &str;

    /// Handle one turn
    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse>;
}

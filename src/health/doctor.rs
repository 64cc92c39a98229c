//! Doctor's email address: read it back, or ask for it to be updated

use async_trait::async_trait;

use crate::core::SkillResult;
use crate::gateway::{report, OutboundEmail};
use crate::intents::IntentHandler;
use crate::skill::{FinalResponse, Response, ResponseOptions, TurnContext};

use super::account::{is_email, link_account, linked_token};
use super::intent::BuiltinIntent;
use super::messages;

/// "what is my doctor's email"
pub struct DoctorsEmailHandler;

#[async_trait]
impl IntentHandler for DoctorsEmailHandler {
    fn name(&self) -> &str {
        BuiltinIntent::DoctorsEmail.as_str()
    }

    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse> {
        let Some(token) = linked_token(turn) else {
            return Ok(link_account(response));
        };

        let identity = turn.resolve_identity(&token).await?;

        if !is_email(&identity.profile) {
            return Ok(response.done(
                ResponseOptions::new()
                    .speech(messages::NO_DOCTOR_EMAIL)
                    .reprompt(messages::NO_DOCTOR_EMAIL_REPROMPT)
                    .ssml(true)
                    .end_session(false),
            ));
        }

        Ok(response.done(
            ResponseOptions::new()
                .speech(messages::doctor_email(identity.profile.trim()))
                .end_session(true),
        ))
    }
}

/// "I want to update my doctor's email"
///
/// The address lives with the identity provider, so this only mails the
/// user a notice that a developer will follow up.
pub struct UpdateDocEmailHandler;

#[async_trait]
impl IntentHandler for UpdateDocEmailHandler {
    fn name(&self) -> &str {
        BuiltinIntent::UpdateDocEmail.as_str()
    }

    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse> {
        let Some(token) = linked_token(turn) else {
            return Ok(link_account(response));
        };

        let identity = turn.resolve_identity(&token).await?;

        let notice = OutboundEmail::new(
            &identity.email,
            report::UPDATE_NOTICE_SUBJECT,
            report::render_update_notice(&identity.name),
        );

        let speech = match turn.services.mailer.send(&notice).await {
            Ok(()) => messages::update_ack(turn.locale()),
            Err(err) => {
                tracing::error!("Failed to send update notice to {}: {}", identity.email, err);
                messages::UPDATE_NOTICE_FAILED
            }
        };

        Ok(response.done(ResponseOptions::new().speech(speech).end_session(true)))
    }
}

//! Launch, stop, cancel and help

use async_trait::async_trait;

use crate::core::SkillResult;
use crate::intents::IntentHandler;
use crate::skill::{FinalResponse, Response, ResponseOptions, TurnContext};

use super::intent::BuiltinIntent;
use super::messages;

/// Welcome on launch; keeps the session open
pub struct LaunchHandler;

#[async_trait]
impl IntentHandler for LaunchHandler {
    fn name(&self) -> &str {
        "LaunchRequest"
    }

    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse> {
        tracing::debug!(
            "onLaunch requestId={} sessionId={}",
            turn.request.request_id,
            turn.session.session_id()
        );
        Ok(response.done(
            ResponseOptions::new()
                .speech(messages::WELCOME)
                .reprompt(messages::WELCOME_REPROMPT)
                .end_session(false),
        ))
    }
}

/// Fixed reply for the built-in navigation intents
pub struct ControlHandler {
    intent: BuiltinIntent,
    speech: &'static str,
    reprompt: Option<&'static str>,
}

impl ControlHandler {
    pub fn stop() -> Self {
        Self {
            intent: BuiltinIntent::Stop,
            speech: messages::GOOD_BYE,
            reprompt: None,
        }
    }

    pub fn cancel() -> Self {
        Self {
            intent: BuiltinIntent::Cancel,
            speech: messages::CANCELLED,
            reprompt: None,
        }
    }

    pub fn help() -> Self {
        Self {
            intent: BuiltinIntent::Help,
            speech: messages::HELP,
            reprompt: Some(messages::HELP_REPROMPT),
        }
    }
}

#[async_trait]
impl IntentHandler for ControlHandler {
    fn name(&self) -> &str {
        self.intent.as_str()
    }

    async fn handle(
        &self,
        _turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse> {
        let mut options = ResponseOptions::new().speech(self.speech);
        options = match self.reprompt {
            Some(reprompt) => options.reprompt(reprompt).end_session(false),
            None => options.end_session(true),
        };
        Ok(response.done(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::fakes::{linked_session, Harness};
    use crate::skill::{Intent, Request};

    #[tokio::test]
    async fn test_launch_welcomes() {
        let harness = Harness::signed_in();

        let reply = harness
            .run(&LaunchHandler, Request::launch("r1"), linked_session())
            .await;

        assert_eq!(reply.speech_text(), messages::WELCOME);
        assert!(!reply.should_end_session());
        assert!(reply.response.reprompt.is_some());
        assert_eq!(harness.outbound_calls(), 0);
    }

    #[tokio::test]
    async fn test_stop_and_cancel_end_session() {
        let harness = Harness::signed_in();

        for (handler, speech) in [
            (ControlHandler::stop(), messages::GOOD_BYE),
            (ControlHandler::cancel(), messages::CANCELLED),
        ] {
            let request = Request::intent("r1", Intent::new(handler.name()));
            let reply = harness.run(&handler, request, linked_session()).await;

            assert_eq!(reply.speech_text(), speech);
            assert!(reply.should_end_session());
            assert!(reply.response.reprompt.is_none());
        }
    }

    #[tokio::test]
    async fn test_help_continues_with_reprompt() {
        let harness = Harness::signed_in();
        let handler = ControlHandler::help();

        let reply = harness
            .run(&handler, Request::intent("r1", Intent::new("AMAZON.HelpIntent")), linked_session())
            .await;

        assert_eq!(reply.speech_text(), messages::HELP);
        assert!(!reply.should_end_session());
        assert_eq!(
            reply.response.reprompt.unwrap().output_speech.text(),
            messages::HELP_REPROMPT
        );
    }
}

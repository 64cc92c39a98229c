//! Intent dispatcher
//!
//! `Skill` owns the handler registry, the lifecycle hooks and the outbound
//! collaborators, and runs one turn at a time per call. It is `Send + Sync`
//! and meant to be shared behind an `Arc` across concurrent turns.

use std::sync::Arc;

use serde_json::Value;

use crate::core::{SkillConfig, SkillError, SkillResult, TurnState};
use crate::hooks::{LifecycleContext, LifecycleHooks};
use crate::intents::{IntentHandler, IntentRegistry};
use crate::session::Session;

use super::context::{Services, TurnContext};
use super::request::{Request, RequestEnvelope, RequestType};
use super::response::{Response, ResponseOptions, SkillResponse};
use super::slots::{extract_slots, Slots};

/// Speech for intents with no registered handler
pub const UNKNOWN_INTENT_SPEECH: &str = "Unknown intent";

/// Result of one turn at the platform boundary
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Turn completed; `None` when the platform expects no body
    Succeed(Option<SkillResponse>),
    /// Turn aborted with the reported message
    Fail(String),
}

impl TurnOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Succeed(_))
    }

    /// Rendered reply, if the turn produced one
    pub fn reply(&self) -> Option<&SkillResponse> {
        match self {
            TurnOutcome::Succeed(reply) => reply.as_ref(),
            TurnOutcome::Fail(_) => None,
        }
    }

    /// JSON written back to the platform
    ///
    /// `null` for a bodiless success, `{"errorMessage": ..}` for a failure.
    pub fn to_json(&self) -> SkillResult<Value> {
        match self {
            TurnOutcome::Succeed(Some(reply)) => Ok(serde_json::to_value(reply)?),
            TurnOutcome::Succeed(None) => Ok(Value::Null),
            TurnOutcome::Fail(message) => Ok(serde_json::json!({ "errorMessage": message })),
        }
    }
}

/// The skill: request routing and reply rendering
pub struct Skill {
    config: SkillConfig,
    launch: Arc<dyn IntentHandler>,
    intents: Arc<IntentRegistry>,
    hooks: Arc<LifecycleHooks>,
    services: Services,
}

impl Skill {
    /// Create a skill with no lifecycle hooks
    pub fn new<L: IntentHandler + 'static>(
        config: SkillConfig,
        services: Services,
        launch: L,
        intents: IntentRegistry,
    ) -> Self {
        tracing::info!(
            "Skill ready with {} intent handlers",
            intents.len()
        );
        Self {
            config,
            launch: Arc::new(launch),
            intents: Arc::new(intents),
            hooks: Arc::new(LifecycleHooks::new()),
            services,
        }
    }

    /// Set the lifecycle hooks
    pub fn with_hooks(mut self, hooks: LifecycleHooks) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn intents(&self) -> &IntentRegistry {
        &self.intents
    }

    /// Platform boundary: parse one raw event and run the turn
    ///
    /// Exactly one outcome is produced per event.
    pub async fn invoke(&self, event: &str) -> TurnOutcome {
        match serde_json::from_str::<RequestEnvelope>(event) {
            Ok(envelope) => self.invoke_envelope(envelope).await,
            Err(err) => Self::fail(err.into()),
        }
    }

    /// Platform boundary for an already-parsed event
    pub async fn invoke_envelope(&self, envelope: RequestEnvelope) -> TurnOutcome {
        match self.handle(envelope).await {
            Ok(reply) => TurnOutcome::Succeed(reply),
            Err(err) => Self::fail(err),
        }
    }

    fn fail(err: SkillError) -> TurnOutcome {
        let message = err.failure_message();
        tracing::error!("{}", message);
        TurnOutcome::Fail(message)
    }

    /// Run one turn
    ///
    /// Returns `Ok(None)` for session-ended requests. Any error means the
    /// turn was aborted and no reply body should be sent.
    pub async fn handle(&self, envelope: RequestEnvelope) -> SkillResult<Option<SkillResponse>> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string_pretty(&envelope) {
                tracing::debug!("Incoming request:\n{}", json);
            }
        }

        let RequestEnvelope {
            mut session,
            request,
            ..
        } = envelope;

        tracing::info!(
            "applicationId={} requestId={} type={}",
            session.application_id(),
            request.request_id,
            request.kind
        );

        if !self.config.accepts_application(session.application_id()) {
            return Err(SkillError::InvalidApplication(
                session.application_id().to_string(),
            ));
        }

        let mut state = TurnState::Started;
        if session.new {
            self.hooks
                .run(&mut LifecycleContext::session_started(&request, &mut session));
        }

        advance(&mut state, TurnState::Routed);
        let result = self.route(&request, &mut session, &mut state).await;

        match &result {
            Ok(_) => advance(&mut state, TurnState::Completed),
            Err(err) => advance(&mut state, TurnState::failed(err.to_string())),
        }

        result
    }

    async fn route(
        &self,
        request: &Request,
        session: &mut Session,
        state: &mut TurnState,
    ) -> SkillResult<Option<SkillResponse>> {
        match request.kind {
            RequestType::LaunchRequest => {
                advance(state, TurnState::Launch);
                let finished = {
                    let mut turn =
                        TurnContext::new(request, session, Slots::default(), &self.services);
                    self.launch.handle(&mut turn, Response::continuing()).await?
                };
                Ok(Some(finished.render(&session.attributes)))
            }
            RequestType::IntentRequest => {
                let intent = request.intent.as_ref().ok_or_else(|| {
                    SkillError::MalformedRequest(format!(
                        "intent request {} carries no intent",
                        request.request_id
                    ))
                })?;
                advance(state, TurnState::intent(&intent.name));

                let finished = match self.intents.get(&intent.name) {
                    Some(handler) => {
                        let mut turn = TurnContext::new(
                            request,
                            session,
                            extract_slots(intent),
                            &self.services,
                        );
                        handler.handle(&mut turn, Response::new()).await?
                    }
                    None => {
                        tracing::warn!("No handler for intent '{}'", intent.name);
                        Response::new().done(
                            ResponseOptions::new()
                                .speech(UNKNOWN_INTENT_SPEECH)
                                .end_session(true),
                        )
                    }
                };
                Ok(Some(finished.render(&session.attributes)))
            }
            RequestType::SessionEndedRequest => {
                advance(state, TurnState::SessionEnded);
                self.hooks
                    .run(&mut LifecycleContext::session_ended(request, session));
                Ok(None)
            }
            RequestType::Unsupported => {
                Err(SkillError::UnsupportedRequest(request.request_id.clone()))
            }
        }
    }
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("application_id", &self.config.application_id)
            .field("intents", &self.intents)
            .field("hooks", &self.hooks)
            .finish()
    }
}

fn advance(state: &mut TurnState, next: TurnState) {
    tracing::debug!("Turn state: {} -> {}", state, next);
    *state = next;
}

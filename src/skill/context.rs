//! Per-turn context passed to handlers
//!
//! Everything a handler needs for one turn travels through `TurnContext`.
//! Nothing per-user lives anywhere else, so concurrent turns never see
//! each other's identity.

use std::fmt;
use std::sync::Arc;

use crate::core::SkillConfig;
use crate::gateway::{DataGateway, GraphQlGateway, HttpMailer, Mailer};
use crate::identity::{Identity, IdentityError, IdentityResolver, UserInfoClient};
use crate::session::Session;

use super::request::Request;
use super::slots::Slots;

/// Outbound collaborators shared by all turns
#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityResolver>,
    pub data: Arc<dyn DataGateway>,
    pub mailer: Arc<dyn Mailer>,
}

impl Services {
    /// Bundle explicit collaborators
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        data: Arc<dyn DataGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            identity,
            data,
            mailer,
        }
    }

    /// Build the HTTP-backed collaborators described by `config`
    pub fn from_config(config: &SkillConfig) -> Self {
        let identity = UserInfoClient::new(&config.user_info_base_url)
            .with_timeout(config.identity_timeout());

        let mut data = GraphQlGateway::new(&config.data_endpoint);
        if let Some(secret) = &config.data_admin_secret {
            data = data.with_admin_secret(secret);
        }

        let mailer = HttpMailer::new(&config.mail_endpoint, &config.sender_address);

        Self::new(Arc::new(identity), Arc::new(data), Arc::new(mailer))
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// What a handler sees of the current turn
pub struct TurnContext<'a> {
    /// The immutable request
    pub request: &'a Request,

    /// The session; attribute changes are echoed back on continuing replies
    pub session: &'a mut Session,

    /// Flattened intent slots (empty for launch requests)
    pub slots: Slots,

    /// Outbound collaborators
    pub services: &'a Services,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        request: &'a Request,
        session: &'a mut Session,
        slots: Slots,
        services: &'a Services,
    ) -> Self {
        Self {
            request,
            session,
            slots,
            services,
        }
    }

    /// Access token, if the user has linked their account
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    /// Request locale, if sent
    pub fn locale(&self) -> Option<&str> {
        self.request.locale.as_deref()
    }

    /// Resolve the caller's identity with `access_token`
    pub async fn resolve_identity(&self, access_token: &str) -> Result<Identity, IdentityError> {
        self.services.identity.resolve(access_token).await
    }
}

impl fmt::Debug for TurnContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnContext")
            .field("request_id", &self.request.request_id)
            .field("session_id", &self.session.session_id)
            .field("slots", &self.slots)
            .finish()
    }
}

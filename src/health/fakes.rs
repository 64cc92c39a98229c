//! In-memory collaborators that record every call

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::gateway::{
    DataGateway, GatewayError, GatewayResult, HealthRecord, Mailer, OutboundEmail, RecordEntry,
};
use crate::identity::{Identity, IdentityError, IdentityResolver};
use crate::intents::IntentHandler;
use crate::session::Session;
use crate::skill::{
    extract_slots, Request, Response, Services, SkillResponse, TurnContext,
};

pub struct FakeResolver {
    identity: Option<Identity>,
    pub tokens: Mutex<Vec<String>>,
}

#[async_trait]
impl IdentityResolver for FakeResolver {
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityError> {
        self.tokens.lock().unwrap().push(access_token.to_string());
        self.identity.clone().ok_or(IdentityError::RemoteAuth {
            status: 401,
            path: "/oauth2/userInfo".into(),
        })
    }
}

#[derive(Default)]
pub struct FakeData {
    pub fail: bool,
    pub entries: Vec<RecordEntry>,
    pub inserted: Mutex<Vec<HealthRecord>>,
    pub queried: Mutex<Vec<String>>,
}

#[async_trait]
impl DataGateway for FakeData {
    async fn insert_record(&self, record: &HealthRecord) -> GatewayResult<()> {
        if self.fail {
            return Err(GatewayError::GraphQl("insert rejected".into()));
        }
        self.inserted.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn query_records(&self, email: &str) -> GatewayResult<Vec<RecordEntry>> {
        self.queried.lock().unwrap().push(email.to_string());
        if self.fail {
            return Err(GatewayError::GraphQl("query rejected".into()));
        }
        Ok(self.entries.clone())
    }
}

/// Mailer that rejects messages to the listed addresses
#[derive(Default)]
pub struct FakeMailer {
    pub reject: Vec<String>,
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: &OutboundEmail) -> GatewayResult<()> {
        if self.reject.contains(&email.to) {
            return Err(GatewayError::Http {
                status: 400,
                body: "address rejected".into(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Fakes bundled with the `Services` built from them
pub struct Harness {
    pub resolver: Arc<FakeResolver>,
    pub data: Arc<FakeData>,
    pub mailer: Arc<FakeMailer>,
    pub services: Services,
}

impl Harness {
    pub fn new(identity: Option<Identity>, data: FakeData, mailer: FakeMailer) -> Self {
        let resolver = Arc::new(FakeResolver {
            identity,
            tokens: Mutex::new(Vec::new()),
        });
        let data = Arc::new(data);
        let mailer = Arc::new(mailer);
        let services = Services::new(resolver.clone(), data.clone(), mailer.clone());
        Self {
            resolver,
            data,
            mailer,
            services,
        }
    }

    /// Signed-in user with a valid doctor address and working backends
    pub fn signed_in() -> Self {
        Self::new(Some(ana()), FakeData::default(), FakeMailer::default())
    }

    pub fn outbound_calls(&self) -> usize {
        self.resolver.tokens.lock().unwrap().len()
            + self.data.inserted.lock().unwrap().len()
            + self.data.queried.lock().unwrap().len()
            + self.mailer.sent.lock().unwrap().len()
    }

    /// Run `handler` the way the dispatcher does for an intent request
    pub async fn run<H: IntentHandler>(
        &self,
        handler: &H,
        request: Request,
        mut session: Session,
    ) -> SkillResponse {
        let slots = request
            .intent
            .as_ref()
            .map(extract_slots)
            .unwrap_or_default();
        let finished = {
            let mut turn = TurnContext::new(&request, &mut session, slots, &self.services);
            handler.handle(&mut turn, Response::new()).await.unwrap()
        };
        finished.render(&session.attributes)
    }
}

pub fn ana() -> Identity {
    Identity::new("ana@example.com", "Ana", "doc@clinic.com")
}

pub fn linked_session() -> Session {
    Session::new("s1", "app").with_access_token("token-1")
}

pub fn anonymous_session() -> Session {
    Session::new("s1", "app")
}

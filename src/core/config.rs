//! Skill configuration
//!
//! Everything here is supplied at process start, either built in code or
//! read from `SKILL_*` environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default deadline for the user-info call
const DEFAULT_IDENTITY_TIMEOUT_MS: u64 = 5_000;

/// Process-wide skill configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Expected application id on every request (empty disables the check)
    pub application_id: String,

    /// Base URL of the OAuth user-info host (e.g. "https://auth.example.com")
    pub user_info_base_url: String,

    /// GraphQL endpoint of the data service
    pub data_endpoint: String,

    /// Optional admin secret sent to the data service
    #[serde(default)]
    pub data_admin_secret: Option<String>,

    /// Mail relay endpoint used for transactional email
    pub mail_endpoint: String,

    /// Sender address on outbound email
    pub sender_address: String,

    /// Deadline for identity resolution in milliseconds
    #[serde(default = "default_identity_timeout_ms")]
    pub identity_timeout_ms: u64,
}

fn default_identity_timeout_ms() -> u64 {
    DEFAULT_IDENTITY_TIMEOUT_MS
}

impl SkillConfig {
    /// Create a configuration for the given application id
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            user_info_base_url: String::new(),
            data_endpoint: String::new(),
            data_admin_secret: None,
            mail_endpoint: String::new(),
            sender_address: String::new(),
            identity_timeout_ms: DEFAULT_IDENTITY_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads from:
    /// - `SKILL_APPLICATION_ID` (required, may be empty)
    /// - `SKILL_USER_INFO_URL` (required)
    /// - `SKILL_DATA_ENDPOINT` (required)
    /// - `SKILL_DATA_ADMIN_SECRET` (optional)
    /// - `SKILL_MAIL_ENDPOINT` (required)
    /// - `SKILL_SENDER_ADDRESS` (required)
    /// - `SKILL_IDENTITY_TIMEOUT_MS` (optional, defaults to 5000)
    pub fn from_env() -> Result<Self> {
        tracing::info!("Loading skill configuration from environment");

        let application_id = env::var("SKILL_APPLICATION_ID")
            .context("SKILL_APPLICATION_ID environment variable not set")?;
        let user_info_base_url = env::var("SKILL_USER_INFO_URL")
            .context("SKILL_USER_INFO_URL environment variable not set")?;
        let data_endpoint = env::var("SKILL_DATA_ENDPOINT")
            .context("SKILL_DATA_ENDPOINT environment variable not set")?;
        let mail_endpoint = env::var("SKILL_MAIL_ENDPOINT")
            .context("SKILL_MAIL_ENDPOINT environment variable not set")?;
        let sender_address = env::var("SKILL_SENDER_ADDRESS")
            .context("SKILL_SENDER_ADDRESS environment variable not set")?;

        let data_admin_secret = env::var("SKILL_DATA_ADMIN_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let identity_timeout_ms =
            parse_timeout_ms(env::var("SKILL_IDENTITY_TIMEOUT_MS").ok().as_deref())?;

        if application_id.is_empty() {
            tracing::warn!("SKILL_APPLICATION_ID is empty, application id check disabled");
        }
        tracing::info!("User info host: {}", user_info_base_url);
        tracing::info!("Data endpoint: {}", data_endpoint);

        Ok(Self {
            application_id,
            user_info_base_url,
            data_endpoint,
            data_admin_secret,
            mail_endpoint,
            sender_address,
            identity_timeout_ms,
        })
    }

    /// Set the user-info base URL
    pub fn with_user_info_base_url(mut self, url: impl Into<String>) -> Self {
        self.user_info_base_url = url.into();
        self
    }

    /// Set the data service endpoint
    pub fn with_data_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.data_endpoint = endpoint.into();
        self
    }

    /// Set the data service admin secret
    pub fn with_data_admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.data_admin_secret = Some(secret.into());
        self
    }

    /// Set the mail relay endpoint and sender address
    pub fn with_mail(mut self, endpoint: impl Into<String>, sender: impl Into<String>) -> Self {
        self.mail_endpoint = endpoint.into();
        self.sender_address = sender.into();
        self
    }

    /// Set the identity deadline
    pub fn with_identity_timeout(mut self, timeout_ms: u64) -> Self {
        self.identity_timeout_ms = timeout_ms;
        self
    }

    /// Get identity deadline as Duration
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(self.identity_timeout_ms)
    }

    /// Whether a request's application id is acceptable
    pub fn accepts_application(&self, application_id: &str) -> bool {
        self.application_id.is_empty() || self.application_id == application_id
    }
}

/// Absent or blank means the default; anything else must be whole milliseconds
fn parse_timeout_ms(raw: Option<&str>) -> Result<u64> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_IDENTITY_TIMEOUT_MS),
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("SKILL_IDENTITY_TIMEOUT_MS is not a number of milliseconds: {}", value)),
    }
}

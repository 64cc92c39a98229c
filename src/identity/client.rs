//! Identity resolvers
//!
//! `UserInfoClient` exchanges a bearer token for an `Identity` with one
//! GET against the OAuth user-info endpoint. There are no retries; the
//! caller decides what a failure means for the turn.
//!
//! # Example
//!
//! ```ignore
//! use docs_skill::identity::{IdentityResolver, UserInfoClient};
//!
//! let client = UserInfoClient::new("https://auth.example.com")
//!     .with_timeout(Duration::from_secs(3));
//! let identity = client.resolve(token).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::identity::{Identity, IdentityError};

/// Path of the user-info endpoint on the auth host
pub const USER_INFO_PATH: &str = "/oauth2/userInfo";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for anything that can turn an access token into an identity
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the identity behind `access_token`
    ///
    /// The token is assumed to be present; callers handle the
    /// unauthenticated case before getting here.
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityError>;
}

/// Wrapper to implement IdentityResolver for async closures
pub struct FnIdentityResolver<F> {
    func: F,
}

#[async_trait]
impl<F, Fut> IdentityResolver for FnIdentityResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Identity, IdentityError>> + Send + 'static,
{
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityError> {
        (self.func)(access_token.to_string()).await
    }
}

/// Create an identity resolver from an async closure
///
/// # Example
///
/// ```ignore
/// let resolver = resolver_fn(|token| async move {
///     Ok(Identity::new("a@b.com", "Ana", "doc@clinic.com"))
/// });
/// ```
pub fn resolver_fn<F, Fut>(func: F) -> FnIdentityResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Identity, IdentityError>> + Send + 'static,
{
    FnIdentityResolver { func }
}

/// HTTP client for the OAuth user-info endpoint
#[derive(Debug, Clone)]
pub struct UserInfoClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl UserInfoClient {
    /// Create a client for the given auth host (scheme included)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the deadline for a single resolution
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the user-info endpoint
    pub fn user_info_url(&self) -> String {
        format!("{}{}", self.base_url, USER_INFO_PATH)
    }

    async fn fetch(&self, access_token: &str) -> Result<Identity, IdentityError> {
        let url = self.user_info_url();
        tracing::debug!("[Identity] GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("[Identity] User info rejected: {}", status);
            return Err(IdentityError::RemoteAuth {
                status: status.as_u16(),
                path: response.url().path().to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("[Identity] Response body: {}", body);

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl IdentityResolver for UserInfoClient {
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityError> {
        match tokio::time::timeout(self.timeout, self.fetch(access_token)).await {
            Ok(result) => result,
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                tracing::error!("[Identity] User info request timed out after {}ms", ms);
                Err(IdentityError::Timeout(ms))
            }
        }
    }
}

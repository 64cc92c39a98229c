//! Transactional email
//!
//! `HttpMailer` hands messages to a mail relay as JSON:
//! `{"from", "to": [..], "subject", "html"}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{GatewayError, GatewayResult};

/// One outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl OutboundEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Email delivery used by the intent handlers
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> GatewayResult<()>;
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Mail relay client
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    sender: String,
}

impl HttpMailer {
    /// Create a mailer posting to `endpoint`, sending as `sender`
    pub fn new(endpoint: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            sender: sender.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> GatewayResult<()> {
        tracing::info!("[Mailer] Sending \"{}\"", email.subject);

        let message = RelayMessage {
            from: &self.sender,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self.client.post(&self.endpoint).json(&message).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("[Mailer] Relay rejected message: {} - {}", status, body);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("[Mailer] Relay accepted message ({})", status);
        Ok(())
    }
}

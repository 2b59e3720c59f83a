//! LINE Messaging API HTTP client.

use crate::error::LineError;
use crate::types::{OutgoingMessage, ReplyRequest};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_URL: &str = "https://api.line.me";

/// Reply-message client.
///
/// The channel access token is held as a `SecretString` so it never
/// leaks through debug output.
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    base_url: String,
    channel_access_token: SecretString,
}

impl LineClient {
    /// Create a client against the production API host.
    pub fn new(channel_access_token: impl Into<String>) -> Result<Self, LineError> {
        Self::with_base_url(channel_access_token, DEFAULT_API_URL)
    }

    /// Create a client against a custom host (used by the tests).
    pub fn with_base_url(
        channel_access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            channel_access_token: SecretString::new(channel_access_token.into()),
        })
    }

    /// Send reply messages for a webhook event's reply token.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn reply(
        &self,
        reply_token: &str,
        messages: Vec<OutgoingMessage>,
    ) -> Result<(), LineError> {
        let request = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/v2/bot/message/reply", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.channel_access_token.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Reply delivered");
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(LineError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

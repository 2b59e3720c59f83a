//! Qiita v2 HTTP client.

use crate::error::QiitaError;
use crate::types::{Item, Tag};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Qiita v2 API client.
///
/// The access token is optional; without one the remote side applies a
/// lower rate limit but every operation still works. The token is held
/// as a `SecretString` so it never leaks through debug output.
#[derive(Clone)]
pub struct QiitaClient {
    client: Client,
    base_url: String,
    access_token: Option<SecretString>,
}

impl QiitaClient {
    /// Create a new Qiita client.
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, QiitaError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.map(SecretString::new),
        })
    }

    /// Fetch the most recent items across the whole service.
    #[instrument(skip(self))]
    pub async fn recent_items(&self, per_page: u32) -> Result<Vec<Item>, QiitaError> {
        self.get_json(format!(
            "{}/api/v2/items?per_page={}",
            self.base_url, per_page
        ))
        .await
    }

    /// Fetch a user's most recent items. `user_name` is taken verbatim
    /// and URL-encoded here.
    #[instrument(skip(self))]
    pub async fn user_items(
        &self,
        user_name: &str,
        per_page: u32,
    ) -> Result<Vec<Item>, QiitaError> {
        self.get_json(format!(
            "{}/api/v2/users/{}/items?per_page={}",
            self.base_url,
            encode(user_name),
            per_page
        ))
        .await
    }

    /// Fetch the most recent items under a tag.
    #[instrument(skip(self))]
    pub async fn tag_items(&self, tag_name: &str, per_page: u32) -> Result<Vec<Item>, QiitaError> {
        self.get_json(format!(
            "{}/api/v2/tags/{}/items?per_page={}",
            self.base_url,
            encode(tag_name),
            per_page
        ))
        .await
    }

    /// Fetch a single tag's metadata.
    #[instrument(skip(self))]
    pub async fn tag(&self, tag_name: &str) -> Result<Tag, QiitaError> {
        self.get_json(format!("{}/api/v2/tags/{}", self.base_url, encode(tag_name)))
            .await
    }

    /// Perform a GET and deserialize the body.
    ///
    /// Retries exactly once on transient connect/timeout failures;
    /// API-level and parse failures are never retried.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, QiitaError> {
        match self.send(self.request(&url)).await {
            Ok(response) => self.handle_response(response).await,
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!("Transient error, retrying once: {}", e);
                let response = self.send(self.request(&url)).await?;
                self.handle_response(response).await
            }
            Err(e) => Err(e.into()),
        }
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, reqwest::Error> {
        request.send().await
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, QiitaError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", truncate_on_char_boundary(&body, 200));
            serde_json::from_str(&body).map_err(QiitaError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(QiitaError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Longest prefix of `body` that fits in `max` bytes and ends on a
/// char boundary. Qiita bodies are mostly multi-byte text, so a plain
/// byte slice would panic mid-character.
pub(crate) fn truncate_on_char_boundary(body: &str, max: usize) -> &str {
    let mut end = body.len().min(max);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

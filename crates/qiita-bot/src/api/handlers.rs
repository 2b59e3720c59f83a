//! HTTP request handlers.

use super::AppState;
use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use line_client::{verify_signature, MessageContent, OutgoingMessage, WebhookEvent, WebhookRequest};
use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

/// Fixed reply when no command pattern matches.
pub const FALLBACK_TEXT: &str = "Sorry, I didn't understand that.";

/// Fixed reply when a matched handler fails.
pub const ERROR_TEXT: &str = "Sorry, something went wrong.";

/// Health check endpoint.
pub async fn index() -> &'static str {
    "It worked!"
}

/// LINE webhook endpoint.
///
/// Verifies the delivery signature over the raw body, then dispatches
/// every text-message event through the command router.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !verify_signature(state.channel_secret.expose_secret(), &body, signature) {
        warn!(
            "Webhook signature verification failed (signature: {})",
            if signature.is_empty() { "missing" } else { "invalid" }
        );
        return Err(AppError::InvalidSignature);
    }

    debug!("Request body: {}", String::from_utf8_lossy(&body));

    let request: WebhookRequest = serde_json::from_slice(&body)?;

    for event in request.events {
        if let WebhookEvent::Message {
            reply_token,
            message: MessageContent::Text { text, .. },
            ..
        } = event
        {
            handle_text_message(&state, &reply_token, &text).await?;
        }
    }

    Ok("OK")
}

/// Dispatch one inbound text and send the reply.
///
/// No match sends the fixed fallback text. A handler failure sends the
/// fixed error text first and then propagates the original error, so
/// the user always gets a reply and the operator still sees the cause.
pub async fn handle_text_message(
    state: &AppState,
    reply_token: &str,
    text: &str,
) -> AppResult<()> {
    match state.router.dispatch(text).await {
        Ok(Some(message)) => {
            state.line.reply(reply_token, vec![message]).await?;
        }
        Ok(None) => {
            info!(%text, "No command matched, sending fallback reply");
            state
                .line
                .reply(reply_token, vec![OutgoingMessage::text(FALLBACK_TEXT)])
                .await?;
        }
        Err(e) => {
            error!("Command handler failed: {}", e);
            if let Err(send_err) = state
                .line
                .reply(reply_token, vec![OutgoingMessage::text(ERROR_TEXT)])
                .await
            {
                error!("Failed to send error reply: {}", send_err);
            }
            return Err(e);
        }
    }

    Ok(())
}

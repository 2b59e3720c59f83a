//! LINE Messaging API surface: webhook events, flex messages, signature
//! verification, and the reply client.

mod client;
mod error;
pub mod flex;
mod signature;
mod types;

pub use client::LineClient;
pub use error::LineError;
pub use signature::{sign, verify_signature};
pub use types::{
    EventSource, MessageContent, OutgoingMessage, ReplyRequest, WebhookEvent, WebhookRequest,
};

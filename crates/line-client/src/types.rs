//! LINE Messaging API types.

use crate::flex::FlexContainer;
use serde::{Deserialize, Serialize};

/// Webhook request envelope: the platform delivers a batch of events
/// per HTTP call.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event. Only message events are acted on; every
/// other event type deserializes into `Other` so an unknown event never
/// fails the whole delivery.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: String,
        message: MessageContent,
        timestamp: i64,
        #[serde(default)]
        source: Option<EventSource>,
    },
    #[serde(other)]
    Other,
}

/// Message payload of a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    #[serde(other)]
    Other,
}

/// The sender of an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
}

/// An outbound reply message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: FlexContainer,
    },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingMessage::Text { text: text.into() }
    }

    pub fn flex(alt_text: impl Into<String>, contents: FlexContainer) -> Self {
        OutgoingMessage::Flex {
            alt_text: alt_text.into(),
            contents,
        }
    }
}

/// Reply API request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<OutgoingMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::{Bubble, Carousel, FlexContainer};

    #[test]
    fn parses_text_message_event() {
        let body = serde_json::json!({
            "destination": "U0000",
            "events": [{
                "type": "message",
                "replyToken": "token-1",
                "timestamp": 1700000000000i64,
                "source": {"type": "user", "userId": "U1234"},
                "message": {"type": "text", "id": "m1", "text": "items"}
            }]
        });

        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.events.len(), 1);
        match &request.events[0] {
            WebhookEvent::Message {
                reply_token,
                message: MessageContent::Text { text, .. },
                ..
            } => {
                assert_eq!(reply_token, "token-1");
                assert_eq!(text, "items");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_event_types_do_not_fail_parsing() {
        let body = serde_json::json!({
            "events": [
                {"type": "follow", "replyToken": "t", "timestamp": 1},
                {
                    "type": "message",
                    "replyToken": "t2",
                    "timestamp": 2,
                    "message": {"type": "sticker", "packageId": "1", "stickerId": "2"}
                }
            ]
        });

        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(request.events[0], WebhookEvent::Other));
        assert!(matches!(
            request.events[1],
            WebhookEvent::Message {
                message: MessageContent::Other,
                ..
            }
        ));
    }

    #[test]
    fn flex_reply_wire_shape() {
        let message = OutgoingMessage::flex(
            "items",
            FlexContainer::Carousel(Carousel::new(vec![Bubble::new()])),
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "flex",
                "altText": "items",
                "contents": {"type": "carousel", "contents": [{"type": "bubble"}]}
            })
        );
    }
}

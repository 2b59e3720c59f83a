//! `users/<name>` command - a user's most recent items.

use crate::cards;
use crate::commands::CommandHandler;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use line_client::flex::FlexContainer;
use line_client::OutgoingMessage;
use qiita_client::QiitaClient;
use std::sync::Arc;
use tracing::info;

const PER_PAGE: u32 = 3;

pub struct UserHandler {
    qiita: Arc<QiitaClient>,
}

impl UserHandler {
    /// The capture is verbatim, slashes and all; the Qiita client
    /// URL-encodes it.
    pub const PATTERN: &'static str = "^users/(.+)$";

    pub fn new(qiita: Arc<QiitaClient>) -> Self {
        Self { qiita }
    }
}

#[async_trait]
impl CommandHandler for UserHandler {
    fn name(&self) -> &str {
        "user"
    }

    async fn execute(&self, _text: &str, args: &[String]) -> AppResult<OutgoingMessage> {
        let user_name = args.first().ok_or(AppError::MissingCapture("users"))?;

        let items = self.qiita.user_items(user_name, PER_PAGE).await?;

        // The user record rides along on the items, so an item-less
        // user has nothing to build a card from.
        let Some(first) = items.first() else {
            info!(%user_name, "User has no items");
            return Ok(OutgoingMessage::text(format!(
                "{user_name} has no items yet."
            )));
        };

        Ok(OutgoingMessage::flex(
            "user",
            FlexContainer::Bubble(cards::user_bubble(&first.user, &items)),
        ))
    }
}

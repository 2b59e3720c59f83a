//! `tags/<name>` command - tag metadata and its top items.

use crate::cards;
use crate::commands::CommandHandler;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use line_client::flex::FlexContainer;
use line_client::OutgoingMessage;
use qiita_client::QiitaClient;
use std::sync::Arc;

const PER_PAGE: u32 = 5;

pub struct TagHandler {
    qiita: Arc<QiitaClient>,
}

impl TagHandler {
    pub const PATTERN: &'static str = "^tags/(.+)$";

    pub fn new(qiita: Arc<QiitaClient>) -> Self {
        Self { qiita }
    }
}

#[async_trait]
impl CommandHandler for TagHandler {
    fn name(&self) -> &str {
        "tag"
    }

    async fn execute(&self, _text: &str, args: &[String]) -> AppResult<OutgoingMessage> {
        let tag_name = args.first().ok_or(AppError::MissingCapture("tags"))?;

        let tag = self.qiita.tag(tag_name).await?;
        let items = self.qiita.tag_items(tag_name, PER_PAGE).await?;

        Ok(OutgoingMessage::flex(
            "tag",
            FlexContainer::Carousel(cards::tag_carousel(&tag, &items)),
        ))
    }
}

//! `items` command - recent items across the whole service.

use crate::cards;
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use line_client::flex::FlexContainer;
use line_client::OutgoingMessage;
use qiita_client::QiitaClient;
use std::sync::Arc;

const PER_PAGE: u32 = 10;

pub struct ItemsHandler {
    qiita: Arc<QiitaClient>,
}

impl ItemsHandler {
    /// Exact-match only: "items2" or "xitems" must not trigger this.
    pub const PATTERN: &'static str = "^items$";

    pub fn new(qiita: Arc<QiitaClient>) -> Self {
        Self { qiita }
    }
}

#[async_trait]
impl CommandHandler for ItemsHandler {
    fn name(&self) -> &str {
        "items"
    }

    async fn execute(&self, _text: &str, _args: &[String]) -> AppResult<OutgoingMessage> {
        let items = self.qiita.recent_items(PER_PAGE).await?;

        Ok(OutgoingMessage::flex(
            "items",
            FlexContainer::Carousel(cards::items_carousel(&items)),
        ))
    }
}

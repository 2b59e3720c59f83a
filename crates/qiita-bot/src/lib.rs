//! Qiita LINE bot: webhook endpoint, command router, and card builders.

pub mod api;
pub mod cards;
pub mod commands;
pub mod config;
pub mod error;
pub mod router;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use router::TextRouter;

use commands::{ItemsHandler, TagHandler, UserHandler};
use qiita_client::QiitaClient;
use std::sync::Arc;

/// Build the command route table. Registration order is significant:
/// the first matching pattern wins.
pub fn build_router(qiita: Arc<QiitaClient>) -> Result<TextRouter, regex::Error> {
    let mut router = TextRouter::new();
    router.register(ItemsHandler::PATTERN, Arc::new(ItemsHandler::new(qiita.clone())))?;
    router.register(UserHandler::PATTERN, Arc::new(UserHandler::new(qiita.clone())))?;
    router.register(TagHandler::PATTERN, Arc::new(TagHandler::new(qiita)))?;
    Ok(router)
}

//! Bot command handlers.

mod items;
mod tag;
mod user;

pub use items::ItemsHandler;
pub use tag::TagHandler;
pub use user::UserHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use line_client::OutgoingMessage;

/// A command handler invoked by the router.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name (e.g., "items", "user").
    fn name(&self) -> &str;

    /// Execute the command. `text` is the full matched input, `args`
    /// the capture groups in order, verbatim.
    async fn execute(&self, text: &str, args: &[String]) -> AppResult<OutgoingMessage>;
}

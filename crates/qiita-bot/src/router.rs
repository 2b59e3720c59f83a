//! Ordered pattern router for inbound text commands.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use line_client::OutgoingMessage;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

struct Route {
    pattern: Regex,
    handler: Arc<dyn CommandHandler>,
}

/// Maps free-text input to command handlers.
///
/// Routes are scanned in registration order and the first pattern whose
/// match is anchored at the start of the text wins; later routes are
/// never tried. The table is populated once at startup and is immutable
/// afterwards, so concurrent dispatches share it freely.
#[derive(Default)]
pub struct TextRouter {
    routes: Vec<Route>,
}

impl TextRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append it with its handler. Registration
    /// order is the tie-break when several patterns could match.
    pub fn register(
        &mut self,
        pattern: &str,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<(), regex::Error> {
        let pattern = Regex::new(pattern)?;
        self.routes.push(Route { pattern, handler });
        Ok(())
    }

    /// Dispatch `text` to the first matching handler.
    ///
    /// Returns `Ok(None)` when no pattern matched; handler failures
    /// propagate to the caller. Matching is a prefix match: a pattern
    /// that only matches mid-string does not count.
    pub async fn dispatch(&self, text: &str) -> AppResult<Option<OutgoingMessage>> {
        for route in &self.routes {
            let Some(captures) = route.pattern.captures(text) else {
                continue;
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.start() != 0 {
                continue;
            }

            debug!(command = route.handler.name(), %text, "Dispatching command");

            let args: Vec<String> = captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect();

            let reply = route.handler.execute(text, &args).await?;
            return Ok(Some(reply));
        }

        Ok(None)
    }
}

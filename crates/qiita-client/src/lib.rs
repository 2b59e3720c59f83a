//! Qiita v2 content API client.

mod client;
mod error;
mod types;

pub use client::QiitaClient;
pub use error::QiitaError;
pub use types::{Item, ItemTag, Tag, User};

//! Qiita v2 API records.
//!
//! Every record is deserialized in one explicit step; a missing or
//! malformed required field fails the whole fetch with a typed error
//! rather than producing a partially constructed record.

use serde::Deserialize;

/// A Qiita article.
///
/// `user` and every element of `tags` are fully resolved by the time an
/// item is handed to the card builders.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub body: String,
    pub rendered_body: String,
    /// ISO 8601 timestamp, kept as a string.
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
    pub likes_count: u64,
    pub comments_count: u64,
    pub reactions_count: u64,
    /// Only populated for authenticated requests by the item owner.
    pub page_views_count: Option<u64>,
    pub coediting: bool,
    pub private: bool,
    /// Opaque group payload for team-restricted items.
    pub group: Option<serde_json::Value>,
    pub user: User,
    pub tags: Vec<ItemTag>,
}

/// A Qiita account.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Non-empty handle, unique within the service. Used both for
    /// display and for constructing follow-up commands.
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub profile_image_url: String,
    pub followers_count: u64,
    pub followees_count: u64,
    pub items_count: u64,
    pub permanent_id: u64,
    pub facebook_id: Option<String>,
    pub github_login_name: Option<String>,
    pub linkedin_id: Option<String>,
    pub twitter_screen_name: Option<String>,
    pub website_url: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
}

/// A tag attached to an item. `versions` may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemTag {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// Tag metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: String,
    pub icon_url: Option<String>,
    pub items_count: u64,
    pub followers_count: u64,
}

//! # Domain Models
//!
//! Wire-compatible entities shared by the server, the plugins and the
//! polling client. Field names serialize in camelCase to match the browser
//! front-end; optional fields are omitted when absent.

use serde::{Deserialize, Serialize};

/// A single chat line. `id` is assigned by the message store on append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub username: String,
    /// Milliseconds since the Unix epoch, as reported by the sender.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    /// Target username of a direct message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Set by the client together with `recipient`; never enforced server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

impl ChatMessage {
    pub fn is_private(&self) -> bool {
        self.is_private.unwrap_or(false)
    }
}

/// One presence entry, keyed by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUser {
    pub username: String,
    pub last_seen: i64,
}

/// Status tier derived from time since the last heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Inactive,
    Offline,
}

/// Open Graph metadata scraped from a linked page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
}

impl LinkPreview {
    pub fn is_empty(&self) -> bool {
        self.og_image.is_none() && self.og_title.is_none()
    }
}

/// A GIF search hit: full-size `url` plus a small `preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifResult {
    pub url: String,
    pub preview: String,
}

/// A DEX trade as reported by the XRPL exchanges feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub base_amount: f64,
    pub counter_amount: f64,
    pub rate: f64,
    pub executed_time: String,
    pub buyer: String,
    pub seller: String,
    pub tx_hash: String,
}

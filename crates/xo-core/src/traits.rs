//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! Stores are async so a persistent backend can replace the in-memory one
//! without touching call sites.

use async_trait::async_trait;
#[cfg(feature = "testing")]
use mockall::automock;

use crate::models::{ChatMessage, GifResult, LinkPreview, OnlineUser, Trade};

/// Ordered chat history.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends a message, assigning an id when it has none, and returns the stored copy.
    async fn append(&self, message: ChatMessage) -> anyhow::Result<ChatMessage>;
    /// Snapshot in insertion order.
    async fn list_all(&self) -> anyhow::Result<Vec<ChatMessage>>;
    /// Removes the first message with `id`. Unknown ids are not an error.
    async fn delete_by_id(&self, id: &str) -> anyhow::Result<()>;
    async fn clear_all(&self) -> anyhow::Result<()>;
}

/// Heartbeat-driven presence. `now_ms` is passed in by the caller.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Sweeps stale entries, then upserts `username` with `last_seen = timestamp`.
    async fn heartbeat(&self, username: &str, timestamp: i64, now_ms: i64) -> anyhow::Result<()>;
    /// Entries with `now_ms - last_seen < window_ms`, in insertion order.
    async fn list_active(&self, window_ms: i64, now_ms: i64) -> anyhow::Result<Vec<OnlineUser>>;
}

/// Per-URL click counters.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn increment(&self, url: &str) -> anyhow::Result<u64>;
    /// Returns 0 for a URL never clicked.
    async fn get(&self, url: &str) -> anyhow::Result<u64>;
}

/// Open Graph scraping for chat link previews.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait LinkPreviewer: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<LinkPreview>;
}

/// GIF search for the chat picker.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait GifSearch: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<GifResult>>;
}

/// Source of the "latest buy" ticker.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait TradeFeed: Send + Sync {
    async fn latest_buy(&self) -> anyhow::Result<Option<Trade>>;
}

/// Staff credential check for destructive operations.
#[cfg_attr(feature = "testing", automock)]
#[async_trait]
pub trait AdminAuth: Send + Sync {
    /// `false` when no credential is configured; admin-only routes are then open.
    fn is_enabled(&self) -> bool;

    /// Verifies a staff password against the configured credential.
    async fn verify_admin_password(&self, password: &str) -> bool;
}

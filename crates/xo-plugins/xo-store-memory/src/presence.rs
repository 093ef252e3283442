use std::sync::RwLock;

use async_trait::async_trait;
use xo_core::models::OnlineUser;
use xo_core::traits::PresenceStore;

use crate::poisoned;

/// Default age after which a heartbeat write sweeps an entry away.
pub const DEFAULT_SWEEP_MS: i64 = 10_000;

/// Username → last heartbeat, at most one entry per username.
///
/// Every heartbeat first sweeps entries older than `sweep_ms`, then upserts.
/// Both happen under one write lock, so concurrent heartbeats never observe
/// a half-swept list.
pub struct MemoryPresenceStore {
    users: RwLock<Vec<OnlineUser>>,
    sweep_ms: i64,
}

impl MemoryPresenceStore {
    pub fn new(sweep_ms: i64) -> Self {
        Self { users: RwLock::new(Vec::new()), sweep_ms }
    }
}

impl Default for MemoryPresenceStore {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_MS)
    }
}

#[async_trait]
impl PresenceStore for MemoryPresenceStore {
    async fn heartbeat(&self, username: &str, timestamp: i64, now_ms: i64) -> anyhow::Result<()> {
        let mut users = self.users.write().map_err(|_| poisoned("presence"))?;

        let before = users.len();
        users.retain(|u| now_ms.saturating_sub(u.last_seen) < self.sweep_ms);
        if users.len() != before {
            log::debug!("presence sweep removed {} user(s)", before - users.len());
        }

        match users.iter_mut().find(|u| u.username == username) {
            Some(user) => user.last_seen = timestamp,
            None => users.push(OnlineUser {
                username: username.to_string(),
                last_seen: timestamp,
            }),
        }
        Ok(())
    }

    async fn list_active(&self, window_ms: i64, now_ms: i64) -> anyhow::Result<Vec<OnlineUser>> {
        let users = self.users.read().map_err(|_| poisoned("presence"))?;
        Ok(users
            .iter()
            .filter(|u| now_ms.saturating_sub(u.last_seen) < window_ms)
            .cloned()
            .collect())
    }
}

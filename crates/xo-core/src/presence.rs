//! Status tiers derived from heartbeat age.

use crate::models::{OnlineUser, UserStatus};

/// Heartbeats younger than this mark a user online.
pub const ONLINE_WITHIN_MS: i64 = 10_000;
/// Heartbeats younger than this (but not online) mark a user inactive.
pub const INACTIVE_WITHIN_MS: i64 = 60_000;

/// Maps `now_ms - last_seen` onto online / inactive / offline.
pub fn derive_status(last_seen: i64, now_ms: i64) -> UserStatus {
    // last_seen is client-supplied and may sit anywhere in the i64 range
    let elapsed = now_ms.saturating_sub(last_seen);
    if elapsed < ONLINE_WITHIN_MS {
        UserStatus::Online
    } else if elapsed < INACTIVE_WITHIN_MS {
        UserStatus::Inactive
    } else {
        UserStatus::Offline
    }
}

/// Pairs every user with its derived status, keeping list order.
pub fn with_status(users: &[OnlineUser], now_ms: i64) -> Vec<(OnlineUser, UserStatus)> {
    users
        .iter()
        .map(|u| (u.clone(), derive_status(u.last_seen, now_ms)))
        .collect()
}

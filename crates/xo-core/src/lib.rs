//! xrponline/crates/xo-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the xrponline
//! chat backend.

pub mod models;
pub mod traits;
pub mod error;
pub mod presence;
pub mod view;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn test_message_wire_format() {
        let msg = ChatMessage {
            id: Some("1700000000000-abc123def".to_string()),
            text: "gm".to_string(),
            username: "alice".to_string(),
            timestamp: 1_700_000_000_000,
            og_image: None,
            og_title: Some("XPO".to_string()),
            recipient: Some("bob".to_string()),
            is_private: Some(true),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1700000000000-abc123def",
                "text": "gm",
                "username": "alice",
                "timestamp": 1_700_000_000_000_i64,
                "ogTitle": "XPO",
                "recipient": "bob",
                "isPrivate": true
            })
        );
    }

    #[test]
    fn test_message_accepts_sparse_body() {
        let msg: ChatMessage = serde_json::from_str(r#"{"text":""}"#).unwrap();
        assert_eq!(msg.username, "");
        assert!(msg.id.is_none());
        assert!(!msg.is_private());
    }

    #[test]
    fn test_online_user_wire_format() {
        let user: OnlineUser =
            serde_json::from_str(r#"{"username":"a","lastSeen":42}"#).unwrap();
        assert_eq!(user.last_seen, 42);
        assert_eq!(serde_json::to_string(&UserStatus::Inactive).unwrap(), "\"inactive\"");
    }
}

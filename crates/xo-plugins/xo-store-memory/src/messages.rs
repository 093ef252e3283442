use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;
use xo_core::models::ChatMessage;
use xo_core::traits::MessageStore;

use crate::poisoned;

/// Append-only chat history; insertion order is display order.
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: RwLock<Vec<ChatMessage>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `<epoch ms>-<9 random hex chars>`.
fn generate_id(now_ms: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now_ms, &suffix[..9])
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, mut message: ChatMessage) -> anyhow::Result<ChatMessage> {
        if message.id.is_none() {
            message.id = Some(generate_id(xo_core::now_ms()));
        }

        let mut messages = self.messages.write().map_err(|_| poisoned("message"))?;
        messages.push(message.clone());
        log::debug!("stored message {:?} ({} total)", message.id, messages.len());
        Ok(message)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<ChatMessage>> {
        let messages = self.messages.read().map_err(|_| poisoned("message"))?;
        Ok(messages.clone())
    }

    async fn delete_by_id(&self, id: &str) -> anyhow::Result<()> {
        let mut messages = self.messages.write().map_err(|_| poisoned("message"))?;
        if let Some(index) = messages.iter().position(|m| m.id.as_deref() == Some(id)) {
            messages.remove(index);
        }
        Ok(())
    }

    async fn clear_all(&self) -> anyhow::Result<()> {
        let mut messages = self.messages.write().map_err(|_| poisoned("message"))?;
        messages.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(username: &str, text: &str) -> ChatMessage {
        ChatMessage {
            text: text.to_string(),
            username: username.to_string(),
            timestamp: 1_700_000_000_000,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_append_keeps_call_order() {
        let store = MemoryMessageStore::new();
        for name in ["A", "B", "C"] {
            store.append(message(name, "gm")).await.unwrap();
        }

        let names: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.username)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        let store = MemoryMessageStore::new();
        let first = store.append(message("A", "one")).await.unwrap();
        let second = store.append(message("A", "two")).await.unwrap();

        let first_id = first.id.unwrap();
        let second_id = second.id.unwrap();
        assert_ne!(first_id, second_id);

        let (millis, suffix) = first_id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 9);
    }

    #[tokio::test]
    async fn test_append_keeps_existing_id_and_empty_fields() {
        let store = MemoryMessageStore::new();
        let stored = store
            .append(ChatMessage { id: Some("custom".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(stored.id.as_deref(), Some("custom"));
        assert_eq!(stored.text, "");
    }

    #[tokio::test]
    async fn test_delete_by_id_is_idempotent() {
        let store = MemoryMessageStore::new();
        let keep = store.append(message("A", "keep")).await.unwrap();
        let gone = store.append(message("B", "gone")).await.unwrap();
        let gone_id = gone.id.unwrap();

        store.delete_by_id(&gone_id).await.unwrap();
        store.delete_by_id(&gone_id).await.unwrap();
        store.delete_by_id("never-existed").await.unwrap();

        let remaining = store.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert!(remaining.iter().all(|m| m.id.as_deref() != Some(gone_id.as_str())));
    }

    #[tokio::test]
    async fn test_delete_removes_only_first_duplicate() {
        let store = MemoryMessageStore::new();
        for text in ["x", "y"] {
            store
                .append(ChatMessage { id: Some("dup".into()), text: text.into(), ..Default::default() })
                .await
                .unwrap();
        }

        store.delete_by_id("dup").await.unwrap();
        let remaining = store.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "y");
    }

    #[tokio::test]
    async fn test_clear_all() {
        let store = MemoryMessageStore::new();
        store.append(message("A", "gm")).await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use xo_core::traits::ClickStore;

use crate::poisoned;

/// URL → click count. URLs are used verbatim as keys.
#[derive(Default)]
pub struct MemoryClickStore {
    counts: Mutex<HashMap<String, u64>>,
}

impl MemoryClickStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickStore for MemoryClickStore {
    async fn increment(&self, url: &str) -> anyhow::Result<u64> {
        let mut counts = self.counts.lock().map_err(|_| poisoned("click"))?;
        let count = counts.entry(url.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn get(&self, url: &str) -> anyhow::Result<u64> {
        let counts = self.counts.lock().map_err(|_| poisoned("click"))?;
        Ok(counts.get(url).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_n_times() {
        let store = MemoryClickStore::new();
        for expected in 1..=5 {
            assert_eq!(store.increment("https://xpo.example").await.unwrap(), expected);
        }
        assert_eq!(store.get("https://xpo.example").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_unknown_url_is_zero() {
        let store = MemoryClickStore::new();
        assert_eq!(store.get("https://nowhere.example").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_urls_are_not_normalized() {
        let store = MemoryClickStore::new();
        store.increment("https://a.example/?x=1").await.unwrap();
        store.increment("https://A.example/?x=1").await.unwrap();
        assert_eq!(store.get("https://a.example/?x=1").await.unwrap(), 1);
        assert_eq!(store.get("https://a.example/").await.unwrap(), 0);
    }
}

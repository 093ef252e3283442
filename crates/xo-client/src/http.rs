//! Typed wrapper over the chat server's JSON endpoints.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use xo_core::models::{ChatMessage, GifResult, LinkPreview, OnlineUser};

const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Serialize)]
struct UrlBody<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct HeartbeatBody<'a> {
    username: &'a str,
    timestamp: i64,
}

/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ChatApi {
    client: reqwest::Client,
    base: Url,
}

impl ChatApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// `base_url` may carry a path prefix such as `https://host/api`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base.join(path)?)
    }

    pub async fn messages(&self) -> anyhow::Result<Vec<ChatMessage>> {
        let messages = self
            .client
            .get(self.url("messages")?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(messages)
    }

    pub async fn post_message(&self, message: &ChatMessage) -> anyhow::Result<()> {
        self.client
            .post(self.url("messages")?)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete_message(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url("messages")?)
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn clear_messages(&self, admin_password: Option<&str>) -> anyhow::Result<()> {
        let mut request = self.client.delete(self.url("messages")?);
        if let Some(password) = admin_password {
            request = request.header(ADMIN_PASSWORD_HEADER, password);
        }
        request.send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn heartbeat(&self, username: &str, timestamp: i64) -> anyhow::Result<()> {
        self.client
            .post(self.url("presence")?)
            .json(&HeartbeatBody { username, timestamp })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn online_users(&self) -> anyhow::Result<Vec<OnlineUser>> {
        let users = self
            .client
            .get(self.url("presence")?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    pub async fn link_preview(&self, url: &str) -> anyhow::Result<LinkPreview> {
        let preview = self
            .client
            .post(self.url("link-preview")?)
            .json(&UrlBody { url })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(preview)
    }

    pub async fn record_click(&self, url: &str) -> anyhow::Result<u64> {
        let body: CountResponse = self
            .client
            .post(self.url("clicks")?)
            .json(&UrlBody { url })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.count)
    }

    pub async fn click_count(&self, url: &str) -> anyhow::Result<u64> {
        let body: CountResponse = self
            .client
            .get(self.url("clicks")?)
            .query(&[("url", url)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.count)
    }

    pub async fn search_gifs(&self, query: &str) -> anyhow::Result<Vec<GifResult>> {
        let results = self
            .client
            .get(self.url("gifs")?)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(results)
    }
}

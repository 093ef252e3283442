//! A single user's chat session: join, poll, send, leave.
//!
//! The server never pushes. An active session runs two periodic tasks that
//! re-fetch the full message list and presence list and replace the local
//! view wholesale. A failed poll is logged and skipped; nothing is retried.

use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use xo_core::models::{ChatMessage, GifResult, LinkPreview, OnlineUser, UserStatus};
use xo_core::{presence, view};

use crate::http::ChatApi;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("username must not be blank")]
    BlankUsername,

    #[error("session already joined as {0}")]
    AlreadyJoined(String),

    #[error("join the chat before sending")]
    NotJoined,
}

#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    pub messages: Duration,
    pub presence: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            messages: Duration::from_secs(1),
            presence: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Default)]
struct LocalView {
    messages: Vec<ChatMessage>,
    users: Vec<OnlineUser>,
}

type SharedView = Arc<RwLock<LocalView>>;

/// A visible message with what a chat window needs to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// `You`, `bob`, `You → bob` or `alice → You`.
    pub label: String,
    /// Set when the message is a GIF post.
    pub gif_url: Option<String>,
    pub links: Vec<String>,
    /// Subset of `links` pointing at X / Twitter.
    pub x_links: Vec<String>,
    pub message: ChatMessage,
}

impl TimelineEntry {
    fn new(message: ChatMessage, viewer: &str) -> Self {
        let links: Vec<String> = view::urls(&message.text)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            label: view::sender_label(&message, viewer),
            gif_url: view::gif_url(&message.text).map(str::to_string),
            x_links: links.iter().filter(|l| view::is_x_link(l)).cloned().collect(),
            links,
            message,
        }
    }
}

pub struct ChatSession {
    api: ChatApi,
    intervals: PollIntervals,
    view: SharedView,
    username: Option<String>,
    recipient: Option<String>,
    shutdown: Option<watch::Sender<bool>>,
    pollers: Vec<JoinHandle<()>>,
}

impl ChatSession {
    pub fn new(api: ChatApi, intervals: PollIntervals) -> Self {
        Self {
            api,
            intervals,
            view: SharedView::default(),
            username: None,
            recipient: None,
            shutdown: None,
            pollers: Vec::new(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.username.is_some()
    }

    /// Becomes active as `username` and starts polling. Must be called from
    /// within a tokio runtime. The name is stored as typed; only an
    /// all-whitespace name is rejected.
    pub fn join(&mut self, username: &str) -> Result<(), SessionError> {
        if username.trim().is_empty() {
            return Err(SessionError::BlankUsername);
        }
        if let Some(current) = &self.username {
            return Err(SessionError::AlreadyJoined(current.clone()));
        }

        let (tx, rx) = watch::channel(false);
        self.pollers = vec![
            spawn_poller(self.intervals.messages, rx.clone(), {
                let api = self.api.clone();
                let view = Arc::clone(&self.view);
                move || poll_messages(api.clone(), Arc::clone(&view))
            }),
            spawn_poller(self.intervals.presence, rx, {
                let api = self.api.clone();
                let view = Arc::clone(&self.view);
                let username = username.to_string();
                move || poll_presence(api.clone(), Arc::clone(&view), username.clone())
            }),
        ];
        self.shutdown = Some(tx);
        self.username = Some(username.to_string());
        log::info!("joined chat as {username}");
        Ok(())
    }

    /// Stops both pollers and waits for them to finish. The server is not
    /// told; the presence entry simply ages out.
    pub async fn leave(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
        for poller in self.pollers.drain(..) {
            if let Err(e) = poller.await {
                log::warn!("poller ended abnormally: {e}");
            }
        }
        if let Some(name) = self.username.take() {
            log::info!("{name} left the chat");
        }
        self.recipient = None;
    }

    /// Direct-message target; `None` sends to the room.
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    /// Selecting the current target again deselects it.
    pub fn toggle_recipient(&mut self, username: &str) {
        if self.recipient.as_deref() == Some(username) {
            self.recipient = None;
        } else {
            self.recipient = Some(username.to_string());
        }
    }

    pub fn clear_recipient(&mut self) {
        self.recipient = None;
    }

    /// Builds the outgoing message for `text`, or `None` when it is blank.
    pub fn compose(
        &self,
        text: &str,
        preview: LinkPreview,
        now_ms: i64,
    ) -> Result<Option<ChatMessage>, SessionError> {
        let username = self.username.as_ref().ok_or(SessionError::NotJoined)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(ChatMessage {
            id: None,
            text: text.to_string(),
            username: username.clone(),
            timestamp: now_ms,
            og_image: preview.og_image,
            og_title: preview.og_title,
            recipient: self.recipient.clone(),
            is_private: Some(self.recipient.is_some()),
        }))
    }

    /// Sends `text`, attaching a preview of its first link when the server
    /// can produce one. Returns `false` for blank input.
    pub async fn send(&self, text: &str) -> anyhow::Result<bool> {
        let preview = match view::first_url(text) {
            Some(url) => self.api.link_preview(url).await.unwrap_or_else(|e| {
                log::warn!("Failed to fetch OG data for {url}: {e:#}");
                LinkPreview::default()
            }),
            None => LinkPreview::default(),
        };

        let Some(message) = self.compose(text, preview, xo_core::now_ms())? else {
            return Ok(false);
        };
        self.api.post_message(&message).await?;
        Ok(true)
    }

    /// GIFs always go to the whole room.
    pub async fn send_gif(&self, gif_url: &str) -> anyhow::Result<()> {
        let username = self.username.as_ref().ok_or(SessionError::NotJoined)?;
        let message = ChatMessage {
            text: view::gif_text(gif_url),
            username: username.clone(),
            timestamp: xo_core::now_ms(),
            ..Default::default()
        };
        self.api.post_message(&message).await
    }

    /// Clears the server history, then the local view.
    pub async fn clear(&self, admin_password: Option<&str>) -> anyhow::Result<()> {
        self.api.clear_messages(admin_password).await?;
        self.clear_local_messages();
        Ok(())
    }

    fn clear_local_messages(&self) {
        match self.view.write() {
            Ok(mut local) => local.messages.clear(),
            Err(_) => log::warn!("local view lock poisoned; local history left as is"),
        }
    }

    /// Removes one message on the server; the next poll drops it locally.
    pub async fn delete_message(&self, id: &str) -> anyhow::Result<()> {
        self.api.delete_message(id).await
    }

    /// Counts a click-through on `url` and returns the new total.
    pub async fn open_link(&self, url: &str) -> anyhow::Result<u64> {
        self.api.record_click(url).await
    }

    pub async fn link_clicks(&self, url: &str) -> anyhow::Result<u64> {
        self.api.click_count(url).await
    }

    /// GIF picker results; a blank query never reaches the server.
    pub async fn search_gifs(&self, query: &str) -> anyhow::Result<Vec<GifResult>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.api.search_gifs(query).await
    }

    /// Messages this user may see, in server order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let Some(me) = self.username.as_deref() else {
            return Vec::new();
        };
        match self.view.read() {
            Ok(local) => view::visible_messages(&local.messages, me)
                .into_iter()
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Visible messages with sender labels, GIF and link details.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let Some(me) = self.username.as_deref() else {
            return Vec::new();
        };
        self.messages()
            .into_iter()
            .map(|m| TimelineEntry::new(m, me))
            .collect()
    }

    /// Latest presence list with status tiers computed at `now_ms`.
    pub fn users(&self, now_ms: i64) -> Vec<(OnlineUser, UserStatus)> {
        match self.view.read() {
            Ok(local) => presence::with_status(&local.users, now_ms),
            Err(_) => Vec::new(),
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // pollers exit on their next select once the signal lands
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
    }
}

/// Runs `tick` immediately and then every `period` until `shutdown` flips
/// to `true` or its sender is dropped.
fn spawn_poller<F, Fut>(
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = interval.tick() => tick().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    })
}

async fn poll_messages(api: ChatApi, view: SharedView) {
    match api.messages().await {
        Ok(messages) => {
            if let Ok(mut view) = view.write() {
                view.messages = messages;
            }
        }
        Err(e) => log::warn!("Failed to fetch messages: {e:#}"),
    }
}

async fn poll_presence(api: ChatApi, view: SharedView, username: String) {
    let result = async {
        api.heartbeat(&username, xo_core::now_ms()).await?;
        api.online_users().await
    }
    .await;

    match result {
        Ok(users) => {
            if let Ok(mut view) = view.write() {
                view.users = users;
            }
        }
        Err(e) => log::warn!("Failed to update online status: {e:#}"),
    }
}

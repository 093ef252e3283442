//! Client-side view rules for the chat history: who may see a message,
//! how its sender is labelled, and what kind of content it carries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ChatMessage;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").unwrap());
static GIF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[GIF\]\((.*)\)$").unwrap());
static X_LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:x\.com|twitter\.com)").unwrap());

/// Public messages are visible to everyone; private ones only to the sender
/// and the recipient.
pub fn is_visible_to(message: &ChatMessage, viewer: &str) -> bool {
    !message.is_private()
        || message.username == viewer
        || message.recipient.as_deref() == Some(viewer)
}

pub fn visible_messages<'a>(messages: &'a [ChatMessage], viewer: &str) -> Vec<&'a ChatMessage> {
    messages.iter().filter(|m| is_visible_to(m, viewer)).collect()
}

/// Header shown above a message, e.g. `You`, `You → bob` or `alice → You`.
pub fn sender_label(message: &ChatMessage, viewer: &str) -> String {
    let own = message.username == viewer;
    if message.is_private() {
        if own {
            format!("You → {}", message.recipient.as_deref().unwrap_or_default())
        } else {
            format!("{} → You", message.username)
        }
    } else if own {
        "You".to_string()
    } else {
        message.username.clone()
    }
}

/// First http(s) URL in `text`; the only one a link preview is fetched for.
pub fn first_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| m.as_str())
}

pub fn urls(text: &str) -> Vec<&str> {
    URL_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Body used for GIF messages.
pub fn gif_text(url: &str) -> String {
    format!("[GIF]({url})")
}

/// The GIF URL when `text` is a GIF message.
pub fn gif_url(text: &str) -> Option<&str> {
    GIF_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Links to X / Twitter get a "raid" shortcut in the UI.
pub fn is_x_link(url: &str) -> bool {
    X_LINK_RE.is_match(url)
}

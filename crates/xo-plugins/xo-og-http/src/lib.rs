//! # xo-og-http
//!
//! Outbound HTTP adapters: Open Graph link previews, Tenor GIF search and
//! the XRPL "latest buy" trade feed. All of them share one `reqwest::Client`
//! so connection pools and the request timeout are configured once.

mod gifs;
mod preview;
mod trades;

use std::time::Duration;

pub use gifs::TenorGifSearch;
pub use preview::{extract_open_graph, HttpLinkPreviewer};
pub use trades::XrplTradeFeed;

const USER_AGENT: &str = concat!("xrponline/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by every adapter in this crate.
pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

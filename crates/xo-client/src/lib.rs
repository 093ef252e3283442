//! # xo-client
//!
//! Polling client for the xrponline chat API. [`ChatApi`] maps each endpoint
//! to a typed call; [`ChatSession`] keeps a user's view fresh by polling
//! messages every second and presence every five.

pub mod http;
pub mod session;

pub use http::ChatApi;
pub use session::{ChatSession, PollIntervals, SessionError, TimelineEntry};

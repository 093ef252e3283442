//! # xo-store-memory
//!
//! Process-local implementations of the xo-core store ports.
//! Nothing is persisted: state lives as long as the server process and is
//! not shared between instances.

mod clicks;
mod messages;
mod presence;

pub use clicks::MemoryClickStore;
pub use messages::MemoryMessageStore;
pub use presence::MemoryPresenceStore;

fn poisoned(store: &str) -> anyhow::Error {
    anyhow::anyhow!("{store} store lock poisoned")
}

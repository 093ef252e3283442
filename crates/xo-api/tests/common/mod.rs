#![allow(dead_code)]

use actix_web::web;
use xo_api::handlers::AppState;
use xo_core::traits::{MockAdminAuth, MockGifSearch, MockLinkPreviewer, MockTradeFeed};
use xo_store_memory::{MemoryClickStore, MemoryMessageStore, MemoryPresenceStore};

pub const PRESENCE_WINDOW_MS: i64 = 300_000;

/// Upstream and admin ports; defaults have no expectations except an
/// admin check that is switched off.
pub struct Ports {
    pub previews: MockLinkPreviewer,
    pub gifs: MockGifSearch,
    pub trades: MockTradeFeed,
    pub admin: MockAdminAuth,
}

impl Default for Ports {
    fn default() -> Self {
        let mut admin = MockAdminAuth::new();
        admin.expect_is_enabled().return_const(false);
        Self {
            previews: MockLinkPreviewer::new(),
            gifs: MockGifSearch::new(),
            trades: MockTradeFeed::new(),
            admin,
        }
    }
}

pub fn state_with(ports: Ports) -> web::Data<AppState> {
    web::Data::new(AppState {
        messages: Box::new(MemoryMessageStore::new()),
        presence: Box::new(MemoryPresenceStore::default()),
        clicks: Box::new(MemoryClickStore::new()),
        previews: Box::new(ports.previews),
        gifs: Box::new(ports.gifs),
        trades: Box::new(ports.trades),
        admin: Box::new(ports.admin),
        presence_window_ms: PRESENCE_WINDOW_MS,
        version: "test-1.0".to_string(),
    })
}

pub fn memory_state() -> web::Data<AppState> {
    state_with(Ports::default())
}

/// Builds the full application around `state`, wired like the binary.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .app_data(xo_api::middleware::json_config())
                .wrap(xo_api::middleware::cors_policy())
                .wrap(xo_api::middleware::cors_fallback_headers())
                .configure(xo_api::configure_routes),
        )
        .await
    };
}

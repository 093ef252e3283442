//! # xo-server
//!
//! Assembles the chat backend from the plugins enabled at compile time.
//!
//! `xo-server hash-password <password>` prints an Argon2 hash for
//! `XO__ADMIN__PASSWORD_HASH` and exits.

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use xo_api::handlers::AppState;
use xo_configs::Settings;

#[cfg(feature = "store-memory")]
use xo_store_memory::{MemoryClickStore, MemoryMessageStore, MemoryPresenceStore};

#[cfg(not(feature = "store-memory"))]
compile_error!("xo-server needs a store plugin; enable the `store-memory` feature");

#[cfg(feature = "og-http")]
use xo_og_http::{build_client, HttpLinkPreviewer, TenorGifSearch, XrplTradeFeed};

#[cfg(not(feature = "og-http"))]
compile_error!("xo-server needs an upstream plugin; enable the `og-http` feature");

#[cfg(feature = "auth-simple")]
use xo_auth_simple::{hash_password, SimpleAdminAuth};

#[cfg(not(feature = "auth-simple"))]
compile_error!("xo-server needs an admin auth plugin; enable the `auth-simple` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", hash_password(password)?);
            return Ok(());
        }
    }

    let settings = Settings::load()?;

    // 1. Upstream adapters share one HTTP client
    let client = build_client(Duration::from_millis(settings.upstream.timeout_ms))?;
    let previews = HttpLinkPreviewer::new(client.clone());
    let gifs = TenorGifSearch::new(client.clone(), settings.upstream.tenor_key.clone());
    let trades = XrplTradeFeed::new(
        client,
        settings.upstream.trades_url.clone(),
        settings.upstream.trades_seller.clone(),
    );

    // 2. Admin check; an unset hash leaves bulk clear open
    let admin = SimpleAdminAuth::new(settings.admin.password_hash.clone());

    // 3. In-memory state lives as long as the process
    let state = web::Data::new(AppState {
        messages: Box::new(MemoryMessageStore::new()),
        presence: Box::new(MemoryPresenceStore::new(settings.presence.sweep_ms)),
        clicks: Box::new(MemoryClickStore::new()),
        previews: Box::new(previews),
        gifs: Box::new(gifs),
        trades: Box::new(trades),
        admin: Box::new(admin),
        presence_window_ms: settings.presence.window_ms,
        version: settings.server.version.clone(),
    });

    let (host, port) = settings.bind_address();
    log::info!("xrponline chat server {} listening on http://{host}:{port}", settings.server.version);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(xo_api::middleware::json_config())
            .wrap(xo_api::middleware::standard_middleware())
            .wrap(xo_api::middleware::cors_policy())
            .wrap(xo_api::middleware::cors_fallback_headers())
            .configure(xo_api::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

//! # xo-api
//!
//! The web routing and orchestration layer for the xrponline chat backend.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::http::Method;
use actix_web::web;

/// Configures the JSON API routes.
///
/// # Developer Note
/// Routes are registered on the given config so the binary can mount them
/// at the root or under a prefix (e.g. `/api`). Every resource also answers
/// bare `OPTIONS`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let options = || web::method(Method::OPTIONS).to(handlers::preflight);

    cfg.service(
        web::resource("/messages")
            .route(web::get().to(handlers::list_messages))
            .route(web::post().to(handlers::create_message))
            .route(web::delete().to(handlers::delete_messages))
            .route(options()),
    )
    .service(
        web::resource("/presence")
            .route(web::get().to(handlers::list_presence))
            .route(web::post().to(handlers::heartbeat))
            .route(options()),
    )
    .service(
        web::resource("/clicks")
            .route(web::get().to(handlers::click_count))
            .route(web::post().to(handlers::record_click))
            .route(options()),
    )
    .service(
        web::resource("/link-preview")
            .route(web::post().to(handlers::link_preview))
            .route(options()),
    )
    .service(
        web::resource("/gifs")
            .route(web::get().to(handlers::search_gifs))
            .route(options()),
    )
    .service(
        web::resource("/latest-buy")
            .route(web::get().to(handlers::latest_buy))
            .route(options()),
    )
    .service(
        web::scope("/system")
            .route("/alive", web::get().to(handlers::alive))
            .route("/version", web::get().to(handlers::version)),
    );
}

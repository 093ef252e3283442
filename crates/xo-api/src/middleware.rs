//! xrponline/crates/xo-api/src/middleware.rs Middleware
//!
//! Request logging, CORS and body-parsing configuration shared by the
//! binary and the handler tests.

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Header carrying the staff password for admin-only operations.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

const ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "DELETE", "OPTIONS"];

// Returns a standard set of middleware for the xrponline API.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

// The chat front-end may be served from any host, so every origin is allowed
// and the wildcard is sent instead of echoing the origin.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_headers(["Content-Type", ADMIN_PASSWORD_HEADER])
        .max_age(3600)
}

// `Cors` only decorates requests that carry an `Origin` header; these
// defaults cover the rest. Headers already set by `Cors` are kept.
pub fn cors_fallback_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.join(", ")))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, X-Admin-Password"))
}

/// Malformed JSON bodies become `400 {"error": "Invalid request"}`.
/// Any content type is accepted as long as the body parses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::debug!("rejected request body: {err}");
            let response = HttpResponse::BadRequest().json(json!({ "error": "Invalid request" }));
            InternalError::from_response(err, response).into()
        })
}

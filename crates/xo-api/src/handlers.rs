//! # xo-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use xo_core::models::{ChatMessage, GifResult, Trade};
use xo_core::traits::{
    AdminAuth, ClickStore, GifSearch, LinkPreviewer, MessageStore, PresenceStore, TradeFeed,
};
use xo_core::AppError;

use crate::error::ApiError;
use crate::middleware::ADMIN_PASSWORD_HEADER;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub messages: Box<dyn MessageStore>,
    pub presence: Box<dyn PresenceStore>,
    pub clicks: Box<dyn ClickStore>,
    pub previews: Box<dyn LinkPreviewer>,
    pub gifs: Box<dyn GifSearch>,
    pub trades: Box<dyn TradeFeed>,
    pub admin: Box<dyn AdminAuth>,
    /// Read window for `GET /presence`, in milliseconds.
    pub presence_window_ms: i64,
    pub version: String,
}

type ApiResult = Result<HttpResponse, ApiError>;

fn success() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeartbeatRequest {
    pub username: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ClickQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GifQuery {
    pub q: Option<String>,
}

// ── Messages ────────────────────────────────────────────────────────────────

pub async fn list_messages(data: web::Data<AppState>) -> ApiResult {
    let messages = data.messages.list_all().await?;
    Ok(HttpResponse::Ok().json(messages))
}

pub async fn create_message(
    data: web::Data<AppState>,
    body: web::Json<ChatMessage>,
) -> ApiResult {
    let stored = data.messages.append(body.into_inner()).await?;
    log::debug!("message {:?} from {:?}", stored.id, stored.username);
    Ok(success())
}

/// `?id=` removes one message; without it (or with an empty one) the whole
/// history is cleared, which requires the admin password when one is
/// configured.
pub async fn delete_messages(
    data: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<DeleteQuery>,
) -> ApiResult {
    match query.into_inner().id.filter(|id| !id.is_empty()) {
        Some(id) => data.messages.delete_by_id(&id).await?,
        None => {
            require_admin(data.admin.as_ref(), &req).await?;
            data.messages.clear_all().await?;
            log::info!("chat history cleared");
        }
    }
    Ok(success())
}

async fn require_admin(admin: &dyn AdminAuth, req: &HttpRequest) -> xo_core::Result<()> {
    if !admin.is_enabled() {
        return Ok(());
    }
    let password = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if admin.verify_admin_password(password).await {
        Ok(())
    } else {
        log::warn!("rejected admin request from {:?}", req.peer_addr());
        Err(AppError::Unauthorized("admin password required".to_string()))
    }
}

// ── Presence ────────────────────────────────────────────────────────────────

pub async fn list_presence(data: web::Data<AppState>) -> ApiResult {
    let users = data
        .presence
        .list_active(data.presence_window_ms, xo_core::now_ms())
        .await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn heartbeat(
    data: web::Data<AppState>,
    body: web::Json<HeartbeatRequest>,
) -> ApiResult {
    let HeartbeatRequest { username, timestamp } = body.into_inner();
    data.presence
        .heartbeat(&username, timestamp, xo_core::now_ms())
        .await?;
    Ok(success())
}

// ── Clicks ──────────────────────────────────────────────────────────────────

pub async fn record_click(data: web::Data<AppState>, body: web::Json<UrlRequest>) -> ApiResult {
    let count = data.clicks.increment(&body.url).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

pub async fn click_count(data: web::Data<AppState>, query: web::Query<ClickQuery>) -> ApiResult {
    let url = query
        .into_inner()
        .url
        .ok_or_else(|| AppError::ValidationError("URL parameter is required".to_string()))?;
    let count = data.clicks.get(&url).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

// ── Upstream enrichments ────────────────────────────────────────────────────

/// Scrape failures answer `500 {}`; the client then sends the message
/// without a preview.
pub async fn link_preview(data: web::Data<AppState>, body: web::Json<UrlRequest>) -> HttpResponse {
    match data.previews.fetch(&body.url).await {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => {
            log::warn!("Error fetching OG data for {}: {e:#}", body.url);
            HttpResponse::InternalServerError().json(json!({}))
        }
    }
}

pub async fn search_gifs(data: web::Data<AppState>, query: web::Query<GifQuery>) -> HttpResponse {
    let term = query.into_inner().q.unwrap_or_default();
    let term = term.trim();
    if term.is_empty() {
        return HttpResponse::Ok().json(Vec::<GifResult>::new());
    }

    match data.gifs.search(term).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            log::warn!("GIF search for {term:?} failed: {e:#}");
            HttpResponse::Ok().json(Vec::<GifResult>::new())
        }
    }
}

pub async fn latest_buy(data: web::Data<AppState>) -> HttpResponse {
    match data.trades.latest_buy().await {
        Ok(trade) => HttpResponse::Ok().json(trade),
        Err(e) => {
            log::warn!("Error fetching latest buy: {e:#}");
            HttpResponse::Ok().json(None::<Trade>)
        }
    }
}

// ── System ──────────────────────────────────────────────────────────────────

/// GET /system/alive
pub async fn alive() -> &'static str {
    "OK"
}

/// GET /system/version
pub async fn version(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "version": data.version }))
}

/// Bare `OPTIONS` requests (no CORS preflight headers) still answer 200.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

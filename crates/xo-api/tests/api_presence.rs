#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use xo_core::models::OnlineUser;
use xo_core::traits::PresenceStore;

use common::{memory_state, PRESENCE_WINDOW_MS};

#[actix_web::test]
async fn test_heartbeat_upserts_single_entry() {
    let state = memory_state();
    let app = test_app!(state);
    let now = xo_core::now_ms();

    for timestamp in [now - 1_000, now] {
        let req = test::TestRequest::post()
            .uri("/presence")
            .set_json(json!({ "username": "alice", "timestamp": timestamp }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true }));
    }

    let req = test::TestRequest::get().uri("/presence").to_request();
    let users: Vec<OnlineUser> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users, vec![OnlineUser { username: "alice".into(), last_seen: now }]);
}

#[actix_web::test]
async fn test_read_window_filters_old_heartbeats() {
    let state = memory_state();
    let app = test_app!(state);
    let now = xo_core::now_ms();

    // written directly so the sweep on later writes does not interfere
    state
        .presence
        .heartbeat("gone", now - PRESENCE_WINDOW_MS - 1_000, now - PRESENCE_WINDOW_MS - 1_000)
        .await
        .unwrap();
    state.presence.heartbeat("idle", now - 30_000, now - PRESENCE_WINDOW_MS).await.unwrap();

    let req = test::TestRequest::get().uri("/presence").to_request();
    let users: Vec<OnlineUser> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["idle"]);
}

#[actix_web::test]
async fn test_malformed_heartbeat_is_bad_request() {
    let state = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/presence")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid request" }));
}

#[actix_web::test]
async fn test_extreme_timestamp_keeps_presence_working() {
    let state = memory_state();
    let app = test_app!(state);
    let now = xo_core::now_ms();

    for (username, timestamp) in [("evil", i64::MIN), ("alice", now)] {
        let req = test::TestRequest::post()
            .uri("/presence")
            .set_json(json!({ "username": username, "timestamp": timestamp }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "heartbeat from {username}");
    }

    let req = test::TestRequest::get().uri("/presence").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<OnlineUser> = test::read_body_json(resp).await;
    assert_eq!(users, vec![OnlineUser { username: "alice".into(), last_seen: now }]);
}

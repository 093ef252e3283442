#[macro_use]
mod common;

use actix_web::http::{header, Method, StatusCode};
use actix_web::test;
use serde_json::{json, Value};

use common::memory_state;

fn allow_origin<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[actix_web::test]
async fn test_wildcard_origin_on_cross_origin_get() {
    let state = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/messages")
        .insert_header((header::ORIGIN, "https://xrponline.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
}

#[actix_web::test]
async fn test_wildcard_origin_without_origin_header() {
    let state = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/presence").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
}

#[actix_web::test]
async fn test_browser_preflight() {
    let state = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/messages")
        .insert_header((header::ORIGIN, "https://xrponline.example"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
}

#[actix_web::test]
async fn test_bare_options_request() {
    let state = memory_state();
    let app = test_app!(state);

    for uri in ["/messages", "/presence", "/clicks", "/link-preview"] {
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri(uri)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "OPTIONS {uri}");
    }
}

#[actix_web::test]
async fn test_system_routes() {
    let state = memory_state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/system/alive").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(&body[..], b"OK");

    let req = test::TestRequest::get().uri("/system/version").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "version": "test-1.0" }));
}

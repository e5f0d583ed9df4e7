//! Tests for the operator-injection filter in isolation, mounted on a small
//! echo router so the rewritten request can be inspected.

use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rivals_api::middleware::sanitize::sanitize_input;
use rivals_core::sanitize::SanitizeOptions;

async fn echo(uri: Uri, body: String) -> Json<Value> {
    Json(json!({
        "query": uri.query(),
        "body": body,
    }))
}

fn echo_app(options: SanitizeOptions) -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route_layer(from_fn_with_state(options, sanitize_input))
}

async fn call(app: Router, uri: &str, content_type: &str, body: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn echoed_body(echo: &Value) -> Value {
    serde_json::from_str(echo["body"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn operator_keys_in_body_are_rewritten() {
    let app = echo_app(SanitizeOptions::default());
    let echo = call(
        app,
        "/echo",
        "application/json",
        r#"{"name": "Joker", "$where": "sleep(1000)"}"#,
    )
    .await;

    assert_eq!(
        echoed_body(&echo),
        json!({"name": "Joker", "_where": "sleep(1000)"})
    );
}

#[tokio::test]
async fn nested_operator_keys_are_rewritten() {
    let app = echo_app(SanitizeOptions::default());
    let echo = call(
        app,
        "/echo",
        "application/json; charset=utf-8",
        r#"{"name": {"$ne": null}, "list": [{"$gt": 1}, 2]}"#,
    )
    .await;

    assert_eq!(
        echoed_body(&echo),
        json!({"name": {"_ne": null}, "list": [{"_gt": 1}, 2]})
    );
}

#[tokio::test]
async fn json_suffix_and_mixed_case_content_types_are_sanitized() {
    for content_type in ["application/merge-patch+json", "Application/JSON"] {
        let app = echo_app(SanitizeOptions::default());
        let echo = call(app, "/echo", content_type, r#"{"$where": "x"}"#).await;
        assert_eq!(echoed_body(&echo), json!({"_where": "x"}), "{content_type}");
    }
}

#[tokio::test]
async fn values_and_inner_dollars_are_untouched() {
    let app = echo_app(SanitizeOptions::default());
    let body = r#"{"description":"costs $5","a$b":1}"#;
    let echo = call(app, "/echo", "application/json", body).await;

    // Nothing rewritten, so the bytes are forwarded as they came in.
    assert_eq!(echo["body"], body);
}

#[tokio::test]
async fn dots_are_kept_by_default() {
    let app = echo_app(SanitizeOptions::default());
    let echo = call(app, "/echo", "application/json", r#"{"a.b": 1}"#).await;
    assert_eq!(echoed_body(&echo), json!({"a.b": 1}));
}

#[tokio::test]
async fn dots_are_rewritten_when_disallowed() {
    let app = echo_app(SanitizeOptions {
        replace_with: '_',
        allow_dots: false,
    });
    let echo = call(app, "/echo", "application/json", r#"{"a.b": {"c.d": 1}}"#).await;
    assert_eq!(echoed_body(&echo), json!({"a_b": {"c_d": 1}}));
}

#[tokio::test]
async fn query_keys_are_rewritten() {
    let app = echo_app(SanitizeOptions::default());
    let echo = call(app, "/echo?$where=1&name=lex&%24gt=2", "text/plain", "").await;
    assert_eq!(echo["query"], "_where=1&name=lex&_gt=2");
}

#[tokio::test]
async fn clean_query_is_untouched() {
    let app = echo_app(SanitizeOptions::default());
    let echo = call(app, "/echo?name=lex&price=$5", "text/plain", "").await;
    assert_eq!(echo["query"], "name=lex&price=$5");
}

#[tokio::test]
async fn non_json_body_passes_through() {
    let app = echo_app(SanitizeOptions::default());
    let body = r#"{"$where": "x"}"#;
    let echo = call(app, "/echo", "text/plain", body).await;
    assert_eq!(echo["body"], body);
}

#[tokio::test]
async fn invalid_json_passes_through() {
    let app = echo_app(SanitizeOptions::default());
    let body = r#"{"$where": "#;
    let echo = call(app, "/echo", "application/json", body).await;
    assert_eq!(echo["body"], body);
}

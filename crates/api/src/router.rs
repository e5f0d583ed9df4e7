//! Application router: the resource trees, the `/mongo` input filter and the
//! HTTP middleware shared by every route.
//!
//! `main.rs` and the integration tests both build the app through
//! [`build_app_router`].

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::middleware::sanitize::sanitize_input;
use crate::routes;
use crate::state::AppState;

/// Assemble the application.
///
/// ```text
/// /, /health     unfiltered
/// /sql/...       heroes, bodies reach the handlers as sent
/// /mongo/...     villains, keys rewritten by `sanitize_input` first
/// ```
///
/// Outermost to innermost, every request passes CORS, gets an
/// `x-request-id`, is traced, has the id copied onto the response, is bounded
/// by the request timeout and has panics turned into 500s.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let villains = routes::villains::router()
        .route_layer(from_fn_with_state(config.sanitize.clone(), sanitize_input));

    let request_id = HeaderName::from_static("x-request-id");
    let http = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::new());

    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::heroes::router())
        .merge(villains)
        .layer(http)
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the four verbs the API serves.
///
/// With no configured origins any origin is allowed. Origins that are not
/// valid header values are skipped with a warning.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

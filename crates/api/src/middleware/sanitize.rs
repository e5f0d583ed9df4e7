//! Operator-injection filter for the document store routes.

use std::borrow::Cow;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::uri::{PathAndQuery, Uri};
use axum::middleware::Next;
use axum::response::Response;
use rivals_core::sanitize::{sanitize_query, sanitize_value, SanitizeOptions};

use crate::error::AppError;

/// Largest body the filter will buffer; matches axum's default JSON limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Rewrite offending keys in the query string and JSON body, then forward.
///
/// Apply with `axum::middleware::from_fn_with_state(options, sanitize_input)`.
/// Bodies that are not JSON, or not valid JSON, are forwarded untouched and
/// left for the handler's extractor to reject.
pub async fn sanitize_input(
    State(options): State<SanitizeOptions>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();

    let rewritten = parts
        .uri
        .query()
        .and_then(|q| match sanitize_query(q, &options) {
            Cow::Owned(query) => Some(query),
            Cow::Borrowed(_) => None,
        });
    if let Some(query) = rewritten {
        tracing::debug!(%query, "sanitized query string");
        parts.uri = with_query(&parts.uri, &query)?;
    }

    let is_json = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);
    if !is_json {
        return Ok(next.run(Request::from_parts(parts, body)).await);
    }

    let bytes = axum::body::to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    let bytes = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(mut value) => {
            if sanitize_value(&mut value, &options) {
                tracing::debug!("sanitized request body keys");
                parts.headers.remove(CONTENT_LENGTH);
                Bytes::from(value.to_string())
            } else {
                bytes
            }
        }
        Err(_) => bytes,
    };

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Same acceptance rule as axum's `Json` extractor: `application/json` or
/// `application/<anything>+json`, parameters ignored, case-insensitive.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    let subtype = subtype.to_ascii_lowercase();
    kind.eq_ignore_ascii_case("application") && (subtype == "json" || subtype.ends_with("+json"))
}

fn with_query(uri: &Uri, query: &str) -> Result<Uri, AppError> {
    let path_and_query: PathAndQuery = format!("{}?{query}", uri.path())
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid query string: {e}")))?;

    let mut uri_parts = uri.clone().into_parts();
    uri_parts.path_and_query = Some(path_and_query);
    Uri::from_parts(uri_parts).map_err(|e| AppError::BadRequest(format!("Invalid URI: {e}")))
}

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Welcome payload served at `/`.
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub hello: &'static str,
}

/// GET / -- greets the client.
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        hello: "Welcome to the heroes and villains API!",
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when both stores answer, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether PostgreSQL is reachable.
    pub sql_healthy: bool,
    /// Whether MongoDB is reachable.
    pub mongo_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (sql, mongo) = tokio::join!(state.heroes.health_check(), state.villains.health_check());

    if let Err(err) = &sql {
        tracing::warn!(error = %err, "PostgreSQL health check failed");
    }
    if let Err(err) = &mongo {
        tracing::warn!(error = %err, "MongoDB health check failed");
    }

    let sql_healthy = sql.is_ok();
    let mongo_healthy = mongo.is_ok();
    let status = if sql_healthy && mongo_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sql_healthy,
        mongo_healthy,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

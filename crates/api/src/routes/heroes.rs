//! Route definitions for the `/sql` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::heroes;
use crate::state::AppState;

/// Hero routes.
///
/// ```text
/// GET    /sql, /sql/      -> list
/// POST   /sql, /sql/      -> create
/// GET    /sql/{id}        -> get_by_id
/// PUT    /sql/{id}        -> update
/// DELETE /sql/{id}        -> retire
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sql", get(heroes::list).post(heroes::create))
        .route("/sql/", get(heroes::list).post(heroes::create))
        .route(
            "/sql/{id}",
            get(heroes::get_by_id)
                .put(heroes::update)
                .delete(heroes::retire),
        )
}

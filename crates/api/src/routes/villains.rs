//! Route definitions for the `/mongo` resource.
//!
//! The path segment under `/mongo/` means different things per verb, so the
//! verbs are bound to their operations explicitly here.

use axum::routing::get;
use axum::Router;

use crate::handlers::villains;
use crate::state::AppState;

/// Villain routes. The input filter is layered on by the app router.
///
/// ```text
/// GET    /mongo, /mongo/        -> list
/// POST   /mongo, /mongo/        -> create
/// GET    /mongo/{name_or_id}    -> find_by_name   (segment is a name fragment)
/// PUT    /mongo/{name_or_id}    -> update         (segment is an id)
/// DELETE /mongo/{name_or_id}    -> defeat         (segment is an id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mongo", get(villains::list).post(villains::create))
        .route("/mongo/", get(villains::list).post(villains::create))
        .route(
            "/mongo/{name_or_id}",
            get(villains::find_by_name)
                .put(villains::update)
                .delete(villains::defeat),
        )
}

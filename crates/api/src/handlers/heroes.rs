//! Handlers for the `/sql` resource (heroes in PostgreSQL).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use rivals_core::error::CoreError;
use rivals_core::types::HeroId;
use rivals_db::models::hero::{Hero, HeroFields};

use crate::error::AppResult;
use crate::response::{HeroUpdatedResponse, SuccessResponse};
use crate::state::AppState;

/// GET /sql
///
/// An empty table is reported as 404, not as an empty array.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Hero>>> {
    let heroes = state.heroes.list().await?;
    if heroes.is_empty() {
        return Err(CoreError::NotFound("No heroes found".into()).into());
    }
    Ok(Json(heroes))
}

/// GET /sql/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<HeroId>, PathRejection>,
) -> AppResult<Json<Hero>> {
    let Path(id) = path?;
    let hero = state
        .heroes
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Hero not found!".into()))?;
    Ok(Json(hero))
}

/// POST /sql
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<HeroFields>, JsonRejection>,
) -> AppResult<Json<Hero>> {
    let Json(input) = payload?;
    let input = input
        .require_all()
        .ok_or_else(|| CoreError::Validation("Please provide all required fields".into()))?;

    let hero = state.heroes.create(&input).await?;
    tracing::info!(id = hero.id, "hero created");
    Ok(Json(hero))
}

/// PUT /sql/{id}
///
/// Full overwrite: all three fields are required.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<HeroId>, PathRejection>,
    payload: Result<Json<HeroFields>, JsonRejection>,
) -> AppResult<Json<HeroUpdatedResponse>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let input = input
        .require_all()
        .ok_or_else(|| CoreError::Validation("Please provide all fields.".into()))?;

    let hero = state
        .heroes
        .update(id, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound("Hero not found".into()))?;

    Ok(Json(HeroUpdatedResponse {
        success: format!(
            "The hero, formerly known as {} {}, has been updated.",
            input.first_name, input.last_name
        ),
        hero,
    }))
}

/// DELETE /sql/{id}
///
/// Soft delete: the row stays, with `active = false`.
pub async fn retire(
    State(state): State<AppState>,
    path: Result<Path<HeroId>, PathRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let Path(id) = path?;
    let hero = state
        .heroes
        .retire(id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Hero not found".into()))?;

    tracing::info!(id = hero.id, "hero retired");
    Ok(Json(SuccessResponse {
        success: format!(
            "The hero {} {} has retired. Who will save us now?",
            hero.first_name, hero.last_name
        ),
    }))
}

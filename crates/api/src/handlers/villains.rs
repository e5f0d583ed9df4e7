//! Handlers for the `/mongo` resource (villains in MongoDB).
//!
//! Input reaching these handlers has already been through the key
//! sanitizer (see [`crate::middleware::sanitize`]). The single path segment
//! is a name fragment for GET and a document id for PUT and DELETE; each
//! handler interprets it on its own.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use rivals_core::error::CoreError;
use rivals_core::types::VillainId;
use rivals_db::models::villain::{Villain, VillainFields};

use crate::error::AppResult;
use crate::response::{SuccessResponse, VillainUpdatedResponse};
use crate::state::AppState;

const HIDING: &str = "Villain cannot be found. They must be hiding...";

/// GET /mongo
///
/// An empty collection is reported as 404, not as an empty array.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Villain>>> {
    let villains = state.villains.list().await?;
    if villains.is_empty() {
        return Err(CoreError::NotFound("There are no villains to be found!".into()).into());
    }
    Ok(Json(villains))
}

/// GET /mongo/{name}
///
/// Always answers with an array, even for a single match.
pub async fn find_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Vec<Villain>>> {
    let Path(name) = path?;
    let villains = state.villains.search_by_name(&name).await?;
    if villains.is_empty() {
        return Err(CoreError::NotFound("Villain not found".into()).into());
    }
    Ok(Json(villains))
}

/// POST /mongo
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<VillainFields>, JsonRejection>,
) -> AppResult<Json<Villain>> {
    let Json(input) = payload?;
    let input = input
        .require_all()
        .ok_or_else(|| CoreError::Validation("Please provide all fields!".into()))?;

    let villain = state.villains.create(&input).await?;
    tracing::info!(id = %villain.id, "villain created");
    Ok(Json(villain))
}

/// PUT /mongo/{id}
///
/// Partial update: fields missing from the body are left as they are.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<VillainFields>, JsonRejection>,
) -> AppResult<Json<VillainUpdatedResponse>> {
    let Path(raw_id) = path?;
    let id = VillainId::parse(&raw_id)?;
    let Json(patch) = payload?;
    if !patch.has_any() {
        return Err(
            CoreError::Validation("Please provide at least one field to update!".into()).into(),
        );
    }

    let villain = state
        .villains
        .update(&id, &patch)
        .await?
        .ok_or_else(|| CoreError::NotFound(HIDING.into()))?;

    Ok(Json(VillainUpdatedResponse {
        beware: format!(
            "The rival {} underwent changes! Careful - they may now be stronger than ever!",
            villain.name
        ),
        updated_villain: villain,
    }))
}

/// DELETE /mongo/{id}
///
/// Soft delete: the document stays, with `isRecovering = true`.
pub async fn defeat(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let Path(raw_id) = path?;
    let id = VillainId::parse(&raw_id)?;

    let villain = state
        .villains
        .defeat(&id)
        .await?
        .ok_or_else(|| CoreError::NotFound(HIDING.into()))?;

    tracing::info!(id = %villain.id, "villain defeated");
    Ok(Json(SuccessResponse {
        success: format!(
            "You would think this villain was dealt with for good, but that would be too easy! \
             The villain {} has been defeated for now, but will return eventually though...",
            villain.name
        ),
    }))
}

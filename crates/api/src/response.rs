//! Response bodies shared by the handlers.
//!
//! Created and fetched entities are returned bare; the confirmation
//! envelopes below are used for updates and state flips.

use rivals_db::models::hero::Hero;
use rivals_db::models::villain::Villain;
use serde::Serialize;

/// `{ "success": "..." }` confirmation.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: String,
}

/// `{ "hero": {...}, "success": "..." }` returned after a hero update.
#[derive(Debug, Serialize)]
pub struct HeroUpdatedResponse {
    pub hero: Hero,
    pub success: String,
}

/// `{ "beware": "...", "updatedVillain": {...} }` returned after a villain
/// update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VillainUpdatedResponse {
    pub beware: String,
    pub updated_villain: Villain,
}

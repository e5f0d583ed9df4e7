//! Hero entity model and DTOs.

use rivals_core::presence::is_filled;
use rivals_core::types::HeroId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `heroes` table. Field order follows the column order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Hero {
    pub id: HeroId,
    pub first_name: String,
    pub last_name: String,
    pub image: String,
    pub active: bool,
}

/// Hero fields as sent by a client. Any of them may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

impl HeroFields {
    /// All three fields, if every one of them is filled in.
    pub fn require_all(self) -> Option<NewHero> {
        let filled = is_filled(self.first_name.as_deref())
            && is_filled(self.last_name.as_deref())
            && is_filled(self.image.as_deref());
        if !filled {
            return None;
        }
        Some(NewHero {
            first_name: self.first_name?,
            last_name: self.last_name?,
            image: self.image?,
        })
    }
}

/// A complete set of writable hero fields, used for inserts and full
/// overwrites.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHero {
    pub first_name: String,
    pub last_name: String,
    pub image: String,
}

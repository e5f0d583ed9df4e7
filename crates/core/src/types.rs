use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// All relational primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Primary key of a row in the `heroes` table.
pub type HeroId = DbId;

/// Length of a document store identifier rendered as hex.
pub const VILLAIN_ID_LEN: usize = 24;

/// Identifier of a document in the `villains` collection.
///
/// Always exactly [`VILLAIN_ID_LEN`] hex characters, so a value of this type
/// can be handed to the document store without a round trip to find out it
/// was garbage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VillainId(String);

impl VillainId {
    /// Parse a client-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != VILLAIN_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::Validation("Malformed ID".into()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VillainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Villain document model and DTOs.
//!
//! Field names on the wire and in the collection are camelCase
//! (`personalDeadliness`, `isRecovering`). The document id is an `ObjectId`
//! in the store and a hex string everywhere else.

use bson::oid::ObjectId;
use rivals_core::presence::{is_filled, is_nonzero};
use rivals_core::types::VillainId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::StoreError;

/// A villain as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Villain {
    #[serde(rename = "_id")]
    pub id: VillainId,
    pub name: String,
    pub description: String,
    pub personal_deadliness: i32,
    pub influence: i32,
    pub is_recovering: bool,
    pub image: Option<String>,
}

/// Villain fields as sent by a client.
///
/// Doubles as the partial-update patch: `None` fields are left out of the
/// `$set` document entirely. The ranges are checked for every field that is
/// present.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VillainFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 25))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub personal_deadliness: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub influence: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl VillainFields {
    /// At least one field is filled in (empty strings and `0` don't count).
    pub fn has_any(&self) -> bool {
        is_filled(self.name.as_deref())
            || is_filled(self.description.as_deref())
            || is_nonzero(self.personal_deadliness)
            || is_nonzero(self.influence)
            || is_filled(self.image.as_deref())
    }

    /// All five fields, if every one of them is filled in.
    pub fn require_all(self) -> Option<NewVillain> {
        let filled = is_filled(self.name.as_deref())
            && is_filled(self.description.as_deref())
            && is_nonzero(self.personal_deadliness)
            && is_nonzero(self.influence)
            && is_filled(self.image.as_deref());
        if !filled {
            return None;
        }
        Some(NewVillain {
            name: self.name?,
            description: self.description?,
            personal_deadliness: self.personal_deadliness?,
            influence: self.influence?,
            image: self.image,
        })
    }
}

/// Everything needed to insert a villain.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewVillain {
    #[validate(length(min = 3, max = 25))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 1, max = 10))]
    pub personal_deadliness: i32,
    #[validate(range(min = 1, max = 10))]
    pub influence: i32,
    pub image: Option<String>,
}

/// Shape of a document in the `villains` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VillainDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub personal_deadliness: i32,
    pub influence: i32,
    #[serde(default)]
    pub is_recovering: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl VillainDocument {
    pub(crate) fn new(input: &NewVillain) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name.clone(),
            description: input.description.clone(),
            personal_deadliness: input.personal_deadliness,
            influence: input.influence,
            is_recovering: false,
            image: input.image.clone(),
        }
    }
}

impl TryFrom<VillainDocument> for Villain {
    type Error = StoreError;

    fn try_from(doc: VillainDocument) -> Result<Self, Self::Error> {
        let id = VillainId::parse(&doc.id.to_hex())
            .map_err(|e| StoreError::Document(format!("bad _id {}: {e}", doc.id)))?;
        Ok(Self {
            id,
            name: doc.name,
            description: doc.description,
            personal_deadliness: doc.personal_deadliness,
            influence: doc.influence,
            is_recovering: doc.is_recovering,
            image: doc.image,
        })
    }
}

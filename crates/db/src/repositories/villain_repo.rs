//! Repository for the `villains` collection.

use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};
use rivals_core::types::VillainId;
use validator::Validate;

use crate::models::villain::{NewVillain, Villain, VillainDocument, VillainFields};
use crate::store::StoreError;

pub const COLLECTION: &str = "villains";

/// Provides CRUD operations for villains. Documents are never deleted.
///
/// Every write is checked against the field constraints (name length,
/// 1..=10 ranges) before it is sent, so no write path can skip them.
pub struct VillainRepo;

impl VillainRepo {
    fn collection(database: &Database) -> Collection<VillainDocument> {
        database.collection(COLLECTION)
    }

    /// Every villain in natural order.
    pub async fn list(database: &Database) -> Result<Vec<Villain>, StoreError> {
        Self::find(database, None).await
    }

    /// Villains whose name contains `term`, ignoring case. The term is
    /// matched literally, not as a pattern.
    pub async fn search_by_name(database: &Database, term: &str) -> Result<Vec<Villain>, StoreError> {
        let filter = doc! {
            "name": { "$regex": regex::escape(term), "$options": "i" },
        };
        Self::find(database, Some(filter)).await
    }

    /// Insert a new villain, returning it with its generated id.
    pub async fn create(database: &Database, input: &NewVillain) -> Result<Villain, StoreError> {
        input.validate()?;

        let document = VillainDocument::new(input);
        Self::collection(database)
            .insert_one(&document, None)
            .await?;
        tracing::debug!(id = %document.id, "villain created");

        Villain::try_from(document)
    }

    /// Apply a partial update and return the document as it is afterwards.
    /// A patch with no fields is rejected without contacting the server.
    pub async fn update(
        database: &Database,
        id: &VillainId,
        patch: &VillainFields,
    ) -> Result<Option<Villain>, StoreError> {
        patch.validate()?;

        let changes = bson::to_document(patch)?;
        if changes.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }
        Self::set(database, id, changes).await
    }

    /// Flag a villain as recovering. Defeating twice is not an error.
    pub async fn defeat(database: &Database, id: &VillainId) -> Result<Option<Villain>, StoreError> {
        Self::set(database, id, doc! { "isRecovering": true }).await
    }

    async fn find(database: &Database, filter: Option<Document>) -> Result<Vec<Villain>, StoreError> {
        let cursor = Self::collection(database).find(filter, None).await?;
        let documents: Vec<VillainDocument> = cursor.try_collect().await?;
        documents.into_iter().map(Villain::try_from).collect()
    }

    async fn set(
        database: &Database,
        id: &VillainId,
        changes: Document,
    ) -> Result<Option<Villain>, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = Self::collection(database)
            .find_one_and_update(
                doc! { "_id": object_id(id)? },
                doc! { "$set": changes },
                options,
            )
            .await?;

        updated.map(Villain::try_from).transpose()
    }
}

fn object_id(id: &VillainId) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| StoreError::Document(e.to_string()))
}

//! Store seams the HTTP layer talks to.
//!
//! Handlers only see `Arc<dyn HeroStore>` / `Arc<dyn VillainStore>`, so the
//! real clients (a [`PgPool`] and a MongoDB [`Database`]) are owned by the
//! application state and can be swapped for doubles in tests. Every method is
//! exactly one store round trip.

use async_trait::async_trait;
use mongodb::Database;
use rivals_core::types::{HeroId, VillainId};
use sqlx::PgPool;

use crate::models::hero::{Hero, NewHero};
use crate::models::villain::{NewVillain, Villain, VillainFields};
use crate::repositories::{HeroRepo, VillainRepo};

/// Any failure raised while talking to a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Bson(#[from] bson::ser::Error),

    /// A villain write violated the collection's field constraints.
    #[error("Villain validation failed: {0}")]
    Schema(#[from] validator::ValidationErrors),

    #[error("Malformed document: {0}")]
    Document(String),

    #[error("Update contains no fields")]
    EmptyUpdate,
}

/// Access to the `heroes` table.
#[async_trait]
pub trait HeroStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Hero>, StoreError>;

    async fn find_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;

    async fn create(&self, input: &NewHero) -> Result<Hero, StoreError>;

    /// Overwrite all writable fields. `None` if no row has this id.
    async fn update(&self, id: HeroId, input: &NewHero) -> Result<Option<Hero>, StoreError>;

    /// Set `active = false`. `None` if no row has this id.
    async fn retire(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Access to the `villains` collection.
#[async_trait]
pub trait VillainStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Villain>, StoreError>;

    /// Case-insensitive substring match on `name`.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Villain>, StoreError>;

    async fn create(&self, input: &NewVillain) -> Result<Villain, StoreError>;

    /// Write only the fields present in `patch`. `None` if no document has
    /// this id.
    async fn update(
        &self,
        id: &VillainId,
        patch: &VillainFields,
    ) -> Result<Option<Villain>, StoreError>;

    /// Set `isRecovering = true`. `None` if no document has this id.
    async fn defeat(&self, id: &VillainId) -> Result<Option<Villain>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl HeroStore for PgPool {
    async fn list(&self) -> Result<Vec<Hero>, StoreError> {
        Ok(HeroRepo::list(self).await?)
    }

    async fn find_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(HeroRepo::find_by_id(self, id).await?)
    }

    async fn create(&self, input: &NewHero) -> Result<Hero, StoreError> {
        Ok(HeroRepo::create(self, input).await?)
    }

    async fn update(&self, id: HeroId, input: &NewHero) -> Result<Option<Hero>, StoreError> {
        Ok(HeroRepo::update(self, id, input).await?)
    }

    async fn retire(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(HeroRepo::retire(self, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(self).await?)
    }
}

#[async_trait]
impl VillainStore for Database {
    async fn list(&self) -> Result<Vec<Villain>, StoreError> {
        VillainRepo::list(self).await
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Villain>, StoreError> {
        VillainRepo::search_by_name(self, term).await
    }

    async fn create(&self, input: &NewVillain) -> Result<Villain, StoreError> {
        VillainRepo::create(self, input).await
    }

    async fn update(
        &self,
        id: &VillainId,
        patch: &VillainFields,
    ) -> Result<Option<Villain>, StoreError> {
        VillainRepo::update(self, id, patch).await
    }

    async fn defeat(&self, id: &VillainId) -> Result<Option<Villain>, StoreError> {
        VillainRepo::defeat(self, id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::mongo::health_check(self).await?)
    }
}

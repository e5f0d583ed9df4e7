//! Repository for the `heroes` table.

use rivals_core::types::HeroId;
use sqlx::PgPool;

use crate::models::hero::{Hero, NewHero};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, image, active";

/// Provides CRUD operations for heroes. Rows are never deleted.
pub struct HeroRepo;

impl HeroRepo {
    /// List every hero, retired ones included, in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes ORDER BY id");
        sqlx::query_as::<_, Hero>(&query).fetch_all(pool).await
    }

    /// Find a hero by primary key.
    pub async fn find_by_id(pool: &PgPool, id: HeroId) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE id = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new hero, returning the created row. `active` defaults to true.
    pub async fn create(pool: &PgPool, input: &NewHero) -> Result<Hero, sqlx::Error> {
        let query = format!(
            "INSERT INTO heroes (first_name, last_name, image)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Overwrite all three writable fields.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: HeroId,
        input: &NewHero,
    ) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!(
            "UPDATE heroes SET
                first_name = $2,
                last_name = $3,
                image = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Mark a hero as retired. Retiring twice is not an error.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn retire(pool: &PgPool, id: HeroId) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("UPDATE heroes SET active = FALSE WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

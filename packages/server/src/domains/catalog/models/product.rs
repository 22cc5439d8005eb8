use crate::common::entity_ids::ProductId;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A product in the shared catalog.
///
/// Products only enter the catalog through an applied submission; there is
/// no direct write path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub style: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRecord {
    pub fn new(
        name: String,
        brand: String,
        style: Option<String>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            brand,
            style,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO products (id, name, brand, style, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.brand)
        .bind(&self.style)
        .bind(&self.description)
        .bind(self.created_at)
        .bind(self.updated_at)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(Into::into)
    }

    pub async fn exists(id: ProductId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn delete(id: ProductId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

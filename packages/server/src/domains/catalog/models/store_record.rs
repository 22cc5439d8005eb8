use crate::common::entity_ids::StoreId;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A physical store in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreRecord {
    pub fn new(
        name: String,
        address: String,
        city: String,
        state: Option<String>,
        website: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: StoreId::new(),
            name,
            address,
            city,
            state,
            website,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO stores (id, name, address, city, state, website, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.address)
        .bind(&self.city)
        .bind(&self.state)
        .bind(&self.website)
        .bind(self.created_at)
        .bind(self.updated_at)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(Into::into)
    }

    pub async fn exists(id: StoreId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn delete(id: StoreId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

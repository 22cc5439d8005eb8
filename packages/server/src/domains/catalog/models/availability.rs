use crate::common::entity_ids::{AvailabilityId, ContributorId, ProductId, StoreId};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A "product seen at store" sighting.
///
/// Existence in the catalog is what makes a sighting visible: pending
/// reports live only in the submission store, so there is no separate
/// confirmed flag here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailabilityRecord {
    pub id: AvailabilityId,
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub price_range: Option<String>,
    pub notes: Option<String>,
    pub reported_by: ContributorId,
    pub reported_at: DateTime<Utc>,
}

impl AvailabilityRecord {
    pub fn new(
        product_id: ProductId,
        store_id: StoreId,
        price_range: Option<String>,
        notes: Option<String>,
        reported_by: ContributorId,
        reported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AvailabilityId::new(),
            product_id,
            store_id,
            price_range,
            notes,
            reported_by,
            reported_at,
        }
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO availability_records
                 (id, product_id, store_id, price_range, notes, reported_by, reported_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(self.id)
        .bind(self.product_id)
        .bind(self.store_id)
        .bind(&self.price_range)
        .bind(&self.notes)
        .bind(self.reported_by)
        .bind(self.reported_at)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(Into::into)
    }

    pub async fn delete(id: AvailabilityId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM availability_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

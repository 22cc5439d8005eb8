//! Postgres-backed catalog.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::Catalog;
use crate::common::entity_ids::{AvailabilityId, ProductId, StoreId};
use crate::domains::catalog::models::{
    AvailabilityRecord, FieldWriteOutcome, PageTarget, ProductRecord, StoreRecord,
};

/// Catalog backed by the shared Postgres database.
///
/// Row inserts and the guarded field UPDATE are single statements, which
/// gives every write the atomic-visibility guarantee the moderation core
/// relies on.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn insert_product(&self, product: ProductRecord) -> Result<()> {
        product.insert(&self.pool).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        ProductRecord::delete(id, &self.pool).await
    }

    async fn product_exists(&self, id: ProductId) -> Result<bool> {
        ProductRecord::exists(id, &self.pool).await
    }

    async fn insert_store(&self, store: StoreRecord) -> Result<()> {
        store.insert(&self.pool).await
    }

    async fn delete_store(&self, id: StoreId) -> Result<bool> {
        StoreRecord::delete(id, &self.pool).await
    }

    async fn store_exists(&self, id: StoreId) -> Result<bool> {
        StoreRecord::exists(id, &self.pool).await
    }

    async fn insert_availability(&self, record: AvailabilityRecord) -> Result<()> {
        record.insert(&self.pool).await
    }

    async fn delete_availability(&self, id: AvailabilityId) -> Result<bool> {
        AvailabilityRecord::delete(id, &self.pool).await
    }

    async fn read_page_field(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
    ) -> Result<Option<String>> {
        target.read_field(id, field, &self.pool).await
    }

    async fn write_page_field_guarded(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
        expected: &str,
        new_value: &str,
    ) -> Result<FieldWriteOutcome> {
        target
            .write_field_guarded(id, field, expected, new_value, &self.pool)
            .await
    }
}

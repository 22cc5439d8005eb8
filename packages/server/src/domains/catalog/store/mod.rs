//! Catalog storage behind the [`Catalog`] trait.
//!
//! Apply/revert adapters and submission intake talk to the catalog only
//! through this trait:
//! - [`PgCatalog`] - Postgres-backed catalog used in deployment
//! - [`MemoryCatalog`] - in-memory catalog used by tests
//!
//! The one consistency requirement on implementations: every write is
//! visible atomically. A reader never observes a half-written record, and
//! guarded field writes detect concurrent writers instead of overwriting
//! them.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{
    AvailabilityRecord, FieldWriteOutcome, PageTarget, ProductRecord, StoreRecord,
};
use crate::common::entity_ids::{AvailabilityId, ProductId, StoreId};

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// The narrow write-and-probe surface the moderation core needs from the
/// catalog. The catalog's read path (listings, detail pages) lives
/// elsewhere and is not part of this trait.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert a new product record.
    async fn insert_product(&self, product: ProductRecord) -> Result<()>;

    /// Delete a product record. Returns whether a row was removed.
    async fn delete_product(&self, id: ProductId) -> Result<bool>;

    /// Check whether a product exists.
    async fn product_exists(&self, id: ProductId) -> Result<bool>;

    /// Insert a new store record.
    async fn insert_store(&self, store: StoreRecord) -> Result<()>;

    /// Delete a store record. Returns whether a row was removed.
    async fn delete_store(&self, id: StoreId) -> Result<bool>;

    /// Check whether a store exists.
    async fn store_exists(&self, id: StoreId) -> Result<bool>;

    /// Insert a new availability record.
    async fn insert_availability(&self, record: AvailabilityRecord) -> Result<()>;

    /// Delete an availability record. Returns whether a row was removed.
    async fn delete_availability(&self, id: AvailabilityId) -> Result<bool>;

    /// Read the current value of an editable page field.
    ///
    /// Returns `None` if the target page does not exist.
    async fn read_page_field(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
    ) -> Result<Option<String>>;

    /// Write an editable page field only if its live value still matches
    /// `expected`.
    async fn write_page_field_guarded(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
        expected: &str,
        new_value: &str,
    ) -> Result<FieldWriteOutcome>;
}

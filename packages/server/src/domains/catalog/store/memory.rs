//! In-memory catalog used by tests.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Catalog;
use crate::common::entity_ids::{AvailabilityId, ProductId, StoreId};
use crate::domains::catalog::models::{
    AvailabilityRecord, BrandRecord, CityRecord, FieldWriteOutcome, PageTarget, ProductRecord,
    RetailerRecord, StoreRecord,
};

/// Catalog that stores everything in memory.
///
/// Records are held in plain maps for inspection in tests. Writes never
/// hold a lock across an await point.
#[derive(Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, ProductRecord>>,
    stores: RwLock<HashMap<StoreId, StoreRecord>>,
    availability: RwLock<HashMap<AvailabilityId, AvailabilityRecord>>,
    cities: RwLock<HashMap<Uuid, CityRecord>>,
    retailers: RwLock<HashMap<Uuid, RetailerRecord>>,
    brands: RwLock<HashMap<Uuid, BrandRecord>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a city page.
    pub fn seed_city(&self, city: CityRecord) {
        self.cities
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(city.id.into_uuid(), city);
    }

    /// Seed a retailer page.
    pub fn seed_retailer(&self, retailer: RetailerRecord) {
        self.retailers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(retailer.id.into_uuid(), retailer);
    }

    /// Seed a brand page.
    pub fn seed_brand(&self, brand: BrandRecord) {
        self.brands
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(brand.id.into_uuid(), brand);
    }

    /// Seed an existing product (for referencing in reports).
    pub fn seed_product(&self, product: ProductRecord) {
        self.products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(product.id, product);
    }

    /// Seed an existing store (for referencing in reports).
    pub fn seed_store(&self, store: StoreRecord) {
        self.stores
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(store.id, store);
    }

    /// Get a product by id.
    pub fn product(&self, id: ProductId) -> Option<ProductRecord> {
        self.products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    /// Get a store by id.
    pub fn store(&self, id: StoreId) -> Option<StoreRecord> {
        self.stores
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    /// Get all products.
    pub fn products(&self) -> Vec<ProductRecord> {
        self.products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    /// Get all availability records.
    pub fn availability_records(&self) -> Vec<AvailabilityRecord> {
        self.availability
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    /// Get availability records for a (product, store) pair.
    pub fn availability_for(
        &self,
        product_id: ProductId,
        store_id: StoreId,
    ) -> Vec<AvailabilityRecord> {
        self.availability
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|r| r.product_id == product_id && r.store_id == store_id)
            .cloned()
            .collect()
    }

    /// Get a city page by id.
    pub fn city(&self, id: Uuid) -> Option<CityRecord> {
        self.cities
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    /// Get a retailer page by id.
    pub fn retailer(&self, id: Uuid) -> Option<RetailerRecord> {
        self.retailers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    /// Get a brand page by id.
    pub fn brand(&self, id: Uuid) -> Option<BrandRecord> {
        self.brands
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn insert_product(&self, product: ProductRecord) -> Result<()> {
        self.products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(product.id, product);
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool> {
        Ok(self
            .products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some())
    }

    async fn product_exists(&self, id: ProductId) -> Result<bool> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&id))
    }

    async fn insert_store(&self, store: StoreRecord) -> Result<()> {
        self.stores
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(store.id, store);
        Ok(())
    }

    async fn delete_store(&self, id: StoreId) -> Result<bool> {
        Ok(self
            .stores
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some())
    }

    async fn store_exists(&self, id: StoreId) -> Result<bool> {
        Ok(self
            .stores
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&id))
    }

    async fn insert_availability(&self, record: AvailabilityRecord) -> Result<()> {
        self.availability
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.id, record);
        Ok(())
    }

    async fn delete_availability(&self, id: AvailabilityId) -> Result<bool> {
        Ok(self
            .availability
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
            .is_some())
    }

    async fn read_page_field(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
    ) -> Result<Option<String>> {
        if !target.is_editable(field) {
            bail!("field '{}' is not editable on {}", field, target.as_str());
        }

        let value = match target {
            PageTarget::City => self
                .cities
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(&id)
                .and_then(|c| c.field(field).map(str::to_string)),
            PageTarget::Retailer => self
                .retailers
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(&id)
                .and_then(|r| r.field(field).map(str::to_string)),
            PageTarget::Brand => self
                .brands
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(&id)
                .and_then(|b| b.field(field).map(str::to_string)),
        };
        Ok(value)
    }

    async fn write_page_field_guarded(
        &self,
        target: PageTarget,
        id: Uuid,
        field: &str,
        expected: &str,
        new_value: &str,
    ) -> Result<FieldWriteOutcome> {
        if !target.is_editable(field) {
            bail!("field '{}' is not editable on {}", field, target.as_str());
        }

        match target {
            PageTarget::City => {
                let mut cities = self.cities.write().unwrap_or_else(|e| e.into_inner());
                let Some(city) = cities.get_mut(&id) else {
                    return Ok(FieldWriteOutcome::TargetMissing);
                };
                let Some(slot) = city.field_mut(field) else {
                    bail!("field '{}' is not editable on city", field);
                };
                if slot.as_str() != expected {
                    return Ok(FieldWriteOutcome::ValueDrifted { live: slot.clone() });
                }
                *slot = new_value.to_string();
                city.updated_at = Utc::now();
            }
            PageTarget::Retailer => {
                let mut retailers = self.retailers.write().unwrap_or_else(|e| e.into_inner());
                let Some(retailer) = retailers.get_mut(&id) else {
                    return Ok(FieldWriteOutcome::TargetMissing);
                };
                let Some(slot) = retailer.field_mut(field) else {
                    bail!("field '{}' is not editable on retailer", field);
                };
                if slot.as_str() != expected {
                    return Ok(FieldWriteOutcome::ValueDrifted { live: slot.clone() });
                }
                *slot = new_value.to_string();
                retailer.updated_at = Utc::now();
            }
            PageTarget::Brand => {
                let mut brands = self.brands.write().unwrap_or_else(|e| e.into_inner());
                let Some(brand) = brands.get_mut(&id) else {
                    return Ok(FieldWriteOutcome::TargetMissing);
                };
                let Some(slot) = brand.field_mut(field) else {
                    bail!("field '{}' is not editable on brand", field);
                };
                if slot.as_str() != expected {
                    return Ok(FieldWriteOutcome::ValueDrifted { live: slot.clone() });
                }
                *slot = new_value.to_string();
                brand.updated_at = Utc::now();
            }
        }

        Ok(FieldWriteOutcome::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_product_insert_and_delete() {
        let catalog = MemoryCatalog::new();
        let product = ProductRecord::new("Cold Brew".to_string(), "North Roast".to_string(), None, None);
        let id = product.id;

        catalog.insert_product(product).await.unwrap();
        assert!(catalog.product_exists(id).await.unwrap());

        assert!(catalog.delete_product(id).await.unwrap());
        assert!(!catalog.product_exists(id).await.unwrap());
        assert!(!catalog.delete_product(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_guarded_field_write_detects_drift() {
        let catalog = MemoryCatalog::new();
        let city = CityRecord::new("Duluth".to_string(), "MN".to_string());
        let id = city.id.into_uuid();
        catalog.seed_city(city);

        let outcome = catalog
            .write_page_field_guarded(PageTarget::City, id, "headline", "", "Lake Superior's port town")
            .await
            .unwrap();
        assert_eq!(outcome, FieldWriteOutcome::Updated);

        // Stale expected value is reported, not overwritten
        let outcome = catalog
            .write_page_field_guarded(PageTarget::City, id, "headline", "", "Something else")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            FieldWriteOutcome::ValueDrifted {
                live: "Lake Superior's port town".to_string()
            }
        );

        let live = catalog
            .read_page_field(PageTarget::City, id, "headline")
            .await
            .unwrap();
        assert_eq!(live.as_deref(), Some("Lake Superior's port town"));
    }

    #[tokio::test]
    async fn test_guarded_field_write_missing_target() {
        let catalog = MemoryCatalog::new();
        let outcome = catalog
            .write_page_field_guarded(PageTarget::Brand, Uuid::new_v4(), "tagline", "", "x")
            .await
            .unwrap();
        assert_eq!(outcome, FieldWriteOutcome::TargetMissing);
    }

    #[tokio::test]
    async fn test_non_editable_field_rejected() {
        let catalog = MemoryCatalog::new();
        let city = CityRecord::new("St. Paul".to_string(), "MN".to_string());
        let id = city.id.into_uuid();
        catalog.seed_city(city);

        assert!(catalog
            .read_page_field(PageTarget::City, id, "name")
            .await
            .is_err());
        assert!(catalog
            .write_page_field_guarded(PageTarget::City, id, "name", "St. Paul", "Other")
            .await
            .is_err());
    }
}

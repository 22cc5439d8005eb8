use chrono::{DateTime, Utc};

use crate::common::entity_ids::{AvailabilityId, ContributorId};
use crate::domains::catalog::models::AvailabilityRecord;
use crate::domains::catalog::Catalog;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::AvailabilityPayload;

pub(super) async fn apply(
    payload: &AvailabilityPayload,
    reported_by: ContributorId,
    reported_at: DateTime<Utc>,
    catalog: &dyn Catalog,
) -> Result<String, ModerationError> {
    // The referenced records may have left the catalog between submission
    // and approval
    if !catalog.product_exists(payload.product_id).await? {
        return Err(ModerationError::ApplyFailed(format!(
            "product {} no longer exists",
            payload.product_id
        )));
    }
    if !catalog.store_exists(payload.store_id).await? {
        return Err(ModerationError::ApplyFailed(format!(
            "store {} no longer exists",
            payload.store_id
        )));
    }

    let record = AvailabilityRecord::new(
        payload.product_id,
        payload.store_id,
        payload.price_range.clone(),
        payload.notes.clone(),
        reported_by,
        reported_at,
    );
    let id = record.id;
    catalog.insert_availability(record).await?;
    Ok(id.to_string())
}

pub(super) async fn revert(
    applied_ref: &str,
    catalog: &dyn Catalog,
) -> Result<(), ModerationError> {
    let id = AvailabilityId::parse(applied_ref).map_err(|_| {
        ModerationError::RevertFailed(format!("invalid applied ref '{}'", applied_ref))
    })?;
    catalog.delete_availability(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::entity_ids::{ProductId, StoreId};
    use crate::domains::catalog::models::{ProductRecord, StoreRecord};
    use crate::domains::catalog::MemoryCatalog;

    fn seeded_catalog() -> (MemoryCatalog, ProductId, StoreId) {
        let catalog = MemoryCatalog::new();
        let product = ProductRecord::new("Cold Brew".to_string(), "North Roast".to_string(), None, None);
        let store = StoreRecord::new(
            "Corner Grocer".to_string(),
            "100 Main St".to_string(),
            "Duluth".to_string(),
            None,
            None,
        );
        let product_id = product.id;
        let store_id = store.id;
        catalog.seed_product(product);
        catalog.seed_store(store);
        (catalog, product_id, store_id)
    }

    #[tokio::test]
    async fn test_apply_records_sighting_and_revert_removes_it() {
        let (catalog, product_id, store_id) = seeded_catalog();
        let reporter = ContributorId::new();
        let reported_at = Utc::now();
        let payload = AvailabilityPayload {
            product_id,
            store_id,
            price_range: Some("$8-10".to_string()),
            notes: None,
        };

        let applied_ref = apply(&payload, reporter, reported_at, &catalog)
            .await
            .unwrap();

        let records = catalog.availability_for(product_id, store_id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reported_by, reporter);
        assert_eq!(records[0].reported_at, reported_at);

        revert(&applied_ref, &catalog).await.unwrap();
        assert!(catalog.availability_for(product_id, store_id).is_empty());
    }

    #[tokio::test]
    async fn test_apply_fails_when_product_is_gone() {
        let (catalog, product_id, store_id) = seeded_catalog();
        catalog.delete_product(product_id).await.unwrap();

        let payload = AvailabilityPayload {
            product_id,
            store_id,
            price_range: None,
            notes: None,
        };
        let result = apply(&payload, ContributorId::new(), Utc::now(), &catalog).await;
        assert!(matches!(result, Err(ModerationError::ApplyFailed(_))));
        assert!(catalog.availability_for(product_id, store_id).is_empty());
    }

    #[tokio::test]
    async fn test_apply_fails_when_store_is_gone() {
        let (catalog, product_id, store_id) = seeded_catalog();
        catalog.delete_store(store_id).await.unwrap();

        let payload = AvailabilityPayload {
            product_id,
            store_id,
            price_range: None,
            notes: None,
        };
        let result = apply(&payload, ContributorId::new(), Utc::now(), &catalog).await;
        assert!(matches!(result, Err(ModerationError::ApplyFailed(_))));
    }
}

use crate::common::entity_ids::ProductId;
use crate::domains::catalog::models::ProductRecord;
use crate::domains::catalog::Catalog;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::ProductPayload;

pub(super) async fn apply(
    payload: &ProductPayload,
    catalog: &dyn Catalog,
) -> Result<String, ModerationError> {
    let record = ProductRecord::new(
        payload.name.clone(),
        payload.brand.clone(),
        payload.style.clone(),
        payload.description.clone(),
    );
    let id = record.id;
    catalog.insert_product(record).await?;
    Ok(id.to_string())
}

pub(super) async fn revert(
    applied_ref: &str,
    catalog: &dyn Catalog,
) -> Result<(), ModerationError> {
    let id = ProductId::parse(applied_ref).map_err(|_| {
        ModerationError::RevertFailed(format!("invalid applied ref '{}'", applied_ref))
    })?;
    // Deleting an already-gone row leaves the catalog in the state revert
    // wants, so a zero-row delete is not an error.
    catalog.delete_product(id).await?;
    Ok(())
}

use crate::common::entity_ids::StoreId;
use crate::domains::catalog::models::StoreRecord;
use crate::domains::catalog::Catalog;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::StorePayload;

pub(super) async fn apply(
    payload: &StorePayload,
    catalog: &dyn Catalog,
) -> Result<String, ModerationError> {
    let record = StoreRecord::new(
        payload.name.clone(),
        payload.address.clone(),
        payload.city.clone(),
        payload.state.clone(),
        payload.website.clone(),
    );
    let id = record.id;
    catalog.insert_store(record).await?;
    Ok(id.to_string())
}

pub(super) async fn revert(
    applied_ref: &str,
    catalog: &dyn Catalog,
) -> Result<(), ModerationError> {
    let id = StoreId::parse(applied_ref).map_err(|_| {
        ModerationError::RevertFailed(format!("invalid applied ref '{}'", applied_ref))
    })?;
    catalog.delete_store(id).await?;
    Ok(())
}

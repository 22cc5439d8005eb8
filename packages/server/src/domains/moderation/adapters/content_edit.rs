use crate::domains::catalog::models::FieldWriteOutcome;
use crate::domains::catalog::Catalog;
use crate::domains::moderation::error::ModerationError;
use crate::domains::moderation::models::ContentEditPayload;

/// Writes the suggested value onto the target page, but only if the field
/// still holds the value the contributor saw when they drafted the edit.
pub(super) async fn apply(
    payload: &ContentEditPayload,
    catalog: &dyn Catalog,
) -> Result<String, ModerationError> {
    let outcome = catalog
        .write_page_field_guarded(
            payload.target_type,
            payload.target_id,
            &payload.field,
            &payload.original_value,
            &payload.suggested_value,
        )
        .await?;

    match outcome {
        FieldWriteOutcome::Updated => Ok(payload.target_id.to_string()),
        FieldWriteOutcome::TargetMissing => Err(ModerationError::ApplyFailed(format!(
            "{} {} no longer exists",
            payload.target_type.as_str(),
            payload.target_id
        ))),
        FieldWriteOutcome::ValueDrifted { .. } => Err(ModerationError::StaleTarget),
    }
}

/// Restores the original value, guarded the same way: if the field no longer
/// holds the suggested value someone else has edited it since approval.
pub(super) async fn revert(
    payload: &ContentEditPayload,
    catalog: &dyn Catalog,
) -> Result<(), ModerationError> {
    let outcome = catalog
        .write_page_field_guarded(
            payload.target_type,
            payload.target_id,
            &payload.field,
            &payload.suggested_value,
            &payload.original_value,
        )
        .await?;

    match outcome {
        FieldWriteOutcome::Updated => Ok(()),
        FieldWriteOutcome::TargetMissing => Err(ModerationError::RevertFailed(format!(
            "{} {} no longer exists",
            payload.target_type.as_str(),
            payload.target_id
        ))),
        FieldWriteOutcome::ValueDrifted { .. } => Err(ModerationError::StaleTarget),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::models::{CityRecord, PageTarget};
    use crate::domains::catalog::MemoryCatalog;
    use uuid::Uuid;

    fn city_with_headline(headline: &str) -> (MemoryCatalog, Uuid) {
        let catalog = MemoryCatalog::new();
        let mut city = CityRecord::new("Duluth".to_string(), "MN".to_string());
        city.headline = headline.to_string();
        let id = city.id.into_uuid();
        catalog.seed_city(city);
        (catalog, id)
    }

    fn edit(target_id: Uuid, original: &str, suggested: &str) -> ContentEditPayload {
        ContentEditPayload {
            target_type: PageTarget::City,
            target_id,
            field: "headline".to_string(),
            original_value: original.to_string(),
            suggested_value: suggested.to_string(),
        }
    }

    #[tokio::test]
    async fn test_apply_then_revert_restores_the_original_text() {
        let (catalog, city_id) = city_with_headline("Lake city");
        let payload = edit(city_id, "Lake city", "Port city on Lake Superior");

        let applied_ref = apply(&payload, &catalog).await.unwrap();
        assert_eq!(applied_ref, city_id.to_string());
        assert_eq!(
            catalog.city(city_id).unwrap().headline,
            "Port city on Lake Superior"
        );

        revert(&payload, &catalog).await.unwrap();
        assert_eq!(catalog.city(city_id).unwrap().headline, "Lake city");
    }

    #[tokio::test]
    async fn test_apply_rejects_a_drifted_field() {
        let (catalog, city_id) = city_with_headline("Someone else got here first");
        let payload = edit(city_id, "Lake city", "Port city on Lake Superior");

        let result = apply(&payload, &catalog).await;
        assert!(matches!(result, Err(ModerationError::StaleTarget)));
        assert_eq!(
            catalog.city(city_id).unwrap().headline,
            "Someone else got here first"
        );
    }

    #[tokio::test]
    async fn test_revert_rejects_a_field_edited_after_approval() {
        let (catalog, city_id) = city_with_headline("Lake city");
        let payload = edit(city_id, "Lake city", "Port city on Lake Superior");
        apply(&payload, &catalog).await.unwrap();

        // A later approved edit changes the headline again.
        let later = edit(city_id, "Port city on Lake Superior", "Twin Ports");
        apply(&later, &catalog).await.unwrap();

        let result = revert(&payload, &catalog).await;
        assert!(matches!(result, Err(ModerationError::StaleTarget)));
        assert_eq!(catalog.city(city_id).unwrap().headline, "Twin Ports");
    }

    #[tokio::test]
    async fn test_apply_fails_when_the_page_is_missing() {
        let catalog = MemoryCatalog::new();
        let payload = edit(Uuid::new_v4(), "Lake city", "Port city");

        let result = apply(&payload, &catalog).await;
        assert!(matches!(result, Err(ModerationError::ApplyFailed(_))));
    }
}

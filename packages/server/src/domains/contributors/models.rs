use crate::common::entity_ids::ContributorId;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A registered contributor.
///
/// The `trusted` and `admin` flags are inputs to this service; granting or
/// revoking them happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContributorRecord {
    pub id: ContributorId,
    pub display_name: String,
    pub trusted: bool,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContributorRecord {
    pub async fn find_by_id(id: ContributorId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM contributors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

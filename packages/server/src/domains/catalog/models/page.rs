//! Page entities with content-editable fields.
//!
//! City, retailer, and brand pages carry a small set of free-text fields
//! that contributors may suggest edits to. Field names double as column
//! names, so every access goes through the editable-fields whitelist.

use crate::common::entity_ids::{BrandId, CityId, RetailerId};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Which page-like entity a content edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "page_target", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PageTarget {
    City,
    Retailer,
    Brand,
}

impl PageTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageTarget::City => "city",
            PageTarget::Retailer => "retailer",
            PageTarget::Brand => "brand",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            PageTarget::City => "cities",
            PageTarget::Retailer => "retailers",
            PageTarget::Brand => "brands",
        }
    }

    /// The fields contributors may suggest edits to, per target.
    pub fn editable_fields(&self) -> &'static [&'static str] {
        match self {
            PageTarget::City => &["headline", "intro"],
            PageTarget::Retailer => &["website", "description"],
            PageTarget::Brand => &["tagline", "description"],
        }
    }

    pub fn is_editable(&self, field: &str) -> bool {
        self.editable_fields().contains(&field)
    }

    /// Read the current value of an editable field.
    ///
    /// Returns `None` if the target row does not exist.
    pub async fn read_field(
        &self,
        id: Uuid,
        field: &str,
        pool: &PgPool,
    ) -> Result<Option<String>> {
        if !self.is_editable(field) {
            bail!("field '{}' is not editable on {}", field, self.as_str());
        }

        // field passed the whitelist above, so interpolating it is safe
        let sql = format!("SELECT {} FROM {} WHERE id = $1", field, self.table());
        sqlx::query_scalar::<_, String>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Write an editable field only if its live value still matches `expected`.
    ///
    /// The guard rides in the UPDATE's WHERE clause, so a concurrent writer
    /// is detected via `rows_affected` rather than overwritten.
    pub async fn write_field_guarded(
        &self,
        id: Uuid,
        field: &str,
        expected: &str,
        new_value: &str,
        pool: &PgPool,
    ) -> Result<FieldWriteOutcome> {
        if !self.is_editable(field) {
            bail!("field '{}' is not editable on {}", field, self.as_str());
        }

        let sql = format!(
            "UPDATE {} SET {} = $1, updated_at = NOW() WHERE id = $2 AND {} = $3",
            self.table(),
            field,
            field
        );
        let result = sqlx::query(&sql)
            .bind(new_value)
            .bind(id)
            .bind(expected)
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            return Ok(FieldWriteOutcome::Updated);
        }

        match self.read_field(id, field, pool).await? {
            Some(live) => Ok(FieldWriteOutcome::ValueDrifted { live }),
            None => Ok(FieldWriteOutcome::TargetMissing),
        }
    }
}

/// Outcome of a guarded page-field write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWriteOutcome {
    /// The expected value matched and the field was updated.
    Updated,
    /// The target row does not exist.
    TargetMissing,
    /// The live value no longer matches the expected value.
    ValueDrifted { live: String },
}

// ============================================================================
// Page records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CityRecord {
    pub id: CityId,
    pub name: String,
    pub state: String,
    pub headline: String,
    pub intro: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CityRecord {
    pub fn new(name: String, state: String) -> Self {
        let now = Utc::now();
        Self {
            id: CityId::new(),
            name,
            state,
            headline: String::new(),
            intro: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "headline" => Some(&self.headline),
            "intro" => Some(&self.intro),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "headline" => Some(&mut self.headline),
            "intro" => Some(&mut self.intro),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RetailerRecord {
    pub id: RetailerId,
    pub name: String,
    pub website: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RetailerRecord {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: RetailerId::new(),
            name,
            website: String::new(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "website" => Some(&self.website),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "website" => Some(&mut self.website),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BrandRecord {
    pub id: BrandId,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BrandRecord {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: BrandId::new(),
            name,
            tagline: String::new(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "tagline" => Some(&self.tagline),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "tagline" => Some(&mut self.tagline),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{ProductId, StoreId, SubmissionId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let product_id: ProductId = ProductId::new();
//! let submission_id: SubmissionId = SubmissionId::new();
//!
//! // This would be a compile error:
//! // let wrong: StoreId = product_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Contributor entities (submitting users).
pub struct Contributor;

/// Marker type for Submission entities (moderation queue entries).
pub struct Submission;

/// Marker type for Product entities (catalog products).
pub struct Product;

/// Marker type for Store entities (catalog stores).
pub struct Store;

/// Marker type for AvailabilityRecord entities (product-at-store sightings).
pub struct AvailabilityRecord;

/// Marker type for City entities (city detail pages).
pub struct City;

/// Marker type for Retailer entities (retailer detail pages).
pub struct Retailer;

/// Marker type for Brand entities (brand detail pages).
pub struct Brand;

/// Marker type for AuditRecord entities (moderation decision history).
pub struct AuditRecord;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Contributor entities.
pub type ContributorId = Id<Contributor>;

/// Typed ID for Submission entities.
pub type SubmissionId = Id<Submission>;

/// Typed ID for Product entities.
pub type ProductId = Id<Product>;

/// Typed ID for Store entities.
pub type StoreId = Id<Store>;

/// Typed ID for AvailabilityRecord entities.
pub type AvailabilityId = Id<AvailabilityRecord>;

/// Typed ID for City entities.
pub type CityId = Id<City>;

/// Typed ID for Retailer entities.
pub type RetailerId = Id<Retailer>;

/// Typed ID for Brand entities.
pub type BrandId = Id<Brand>;

/// Typed ID for AuditRecord entities.
pub type AuditRecordId = Id<AuditRecord>;

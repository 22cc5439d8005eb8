//! The shared catalog the moderation pipeline writes into.

pub mod models;
pub mod store;

pub use models::*;
pub use store::{Catalog, MemoryCatalog, PgCatalog};

// HTTP routes
pub mod api;
pub mod content_edits;
pub mod health;
pub mod products;
pub mod reports;
pub mod stores;
pub mod submissions;

pub use api::ApiError;
pub use health::*;

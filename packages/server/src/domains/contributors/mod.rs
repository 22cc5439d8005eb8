//! Contributor records and the trust evaluator they feed.

pub mod models;
pub mod trust;

pub use models::ContributorRecord;
pub use trust::{PgTrustEvaluator, StaticTrustEvaluator, TrustEvaluator};

// Shelfscout - Moderation API Core
//
// This crate backs the admin surface of a shared "where to buy it" catalog.
// Every contributor change enters a trust-tiered moderation pipeline:
// untrusted submissions wait for approval, trusted ones go live immediately
// and queue for post-review. Architecture follows domain-driven design;
// the moderation domain owns the state machine and the catalog domain owns
// the records it materializes into.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;

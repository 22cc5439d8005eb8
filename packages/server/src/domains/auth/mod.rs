//! Auth domain - JWT verification for the HTTP boundary
//!
//! Responsibilities:
//! - JWT token creation and verification
//! - Carrying the contributor id and admin flag into request handling
//!
//! Who counts as admin or trusted is decided elsewhere (config and the
//! contributors domain); this module only moves those facts in tokens.

pub mod jwt;

pub use jwt::{Claims, JwtService};

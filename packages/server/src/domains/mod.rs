// Business domains
pub mod auth;
pub mod catalog;
pub mod contributors;
pub mod moderation;

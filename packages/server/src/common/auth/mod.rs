/// Authorization module for the catalog moderation service
///
/// Provides a fluent API for authorization checks in service code:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, AdminCapability};
///
/// // In a service method:
/// Actor::new(actor_id, is_admin)
///     .can(AdminCapability::ReviewSubmissions)
///     .check(state.deps())
///     .await?;
/// ```
///
/// This pattern keeps authorization logic in the service layer where it
/// belongs, not in the route handler layer.

mod errors;
mod capability;
mod builder;

pub use errors::AuthError;
pub use capability::AdminCapability;
pub use builder::{Actor, CapabilityBuilder, HasAuthContext};

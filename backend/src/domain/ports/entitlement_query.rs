//! Driving port for entitlement lookups.

use async_trait::async_trait;

use crate::domain::{Entitlement, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntitlementQuery: Send + Sync {
    /// Resolve what `user` may do right now from freshly read subscriptions.
    async fn resolve(&self, user: &User) -> Result<Entitlement, Error>;
}

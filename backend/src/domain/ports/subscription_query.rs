//! Driving port for subscription reads.

use async_trait::async_trait;

use crate::domain::{Error, Package, Subscription, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionQuery: Send + Sync {
    /// The subscription active right now, if any.
    async fn get_active_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, Error>;

    /// Subscription history, newest first.
    async fn list_mine(&self, user_id: &UserId) -> Result<Vec<Subscription>, Error>;

    async fn list_packages(&self) -> Result<Vec<Package>, Error>;
}

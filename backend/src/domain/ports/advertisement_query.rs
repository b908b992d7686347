//! Driving port for advertisement reads.

use async_trait::async_trait;

use crate::domain::{Advertisement, Error, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvertisementQuery: Send + Sync {
    /// Campaigns running right now, most recently started first.
    async fn list_active(&self) -> Result<Vec<Advertisement>, Error>;

    /// Every campaign of `user_id` regardless of activeness, newest first.
    async fn list_mine(&self, user_id: &UserId) -> Result<Vec<Advertisement>, Error>;
}

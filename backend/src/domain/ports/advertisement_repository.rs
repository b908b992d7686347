//! Port for advertisement persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Advertisement, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by advertisement repository adapters.
    pub enum AdvertisementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "advertisement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "advertisement repository query failed: {message}",
        /// An update or delete targeted an advertisement that does not exist.
        Missing { id: Uuid } => "advertisement {id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn insert(&self, advertisement: &Advertisement) -> Result<(), AdvertisementRepositoryError>;

    /// Replace a stored advertisement wholesale.
    async fn save(&self, advertisement: &Advertisement) -> Result<(), AdvertisementRepositoryError>;

    /// Remove an advertisement; fails with
    /// [`AdvertisementRepositoryError::Missing`] when absent.
    async fn delete(&self, id: Uuid) -> Result<(), AdvertisementRepositoryError>;

    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<Advertisement>, AdvertisementRepositoryError>;

    /// Advertisements whose campaign window contains `now`.
    async fn list_active_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Advertisement>, AdvertisementRepositoryError>;

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Advertisement>, AdvertisementRepositoryError>;
}

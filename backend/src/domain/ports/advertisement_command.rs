//! Driving port for advertisement mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Advertisement, AdvertisementDraft, AdvertisementPatch, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvertisementCommand: Send + Sync {
    /// Start a campaign. Requires the advertising entitlement.
    async fn create(&self, actor: &Actor, draft: AdvertisementDraft)
    -> Result<Advertisement, Error>;

    /// Edit a campaign. Owner or admin only.
    async fn update(
        &self,
        actor: &Actor,
        advertisement_id: Uuid,
        patch: AdvertisementPatch,
    ) -> Result<Advertisement, Error>;

    /// Remove a campaign. Owner or admin only.
    async fn delete(&self, actor: &Actor, advertisement_id: Uuid) -> Result<(), Error>;
}

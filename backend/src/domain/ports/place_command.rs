//! Driving port for place mutations.
//!
//! Only the lifecycle service implementing this port writes `status` and
//! `is_featured`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Error, Place, PlaceDetailsPatch, PlaceStatus, PlaceSubmission, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceCommand: Send + Sync {
    /// Submit a new place owned by `owner`. It starts pending and not
    /// featured.
    async fn submit(&self, owner: &UserId, submission: PlaceSubmission) -> Result<Place, Error>;

    /// Moderate a place. Moving away from approval clears the featured flag.
    async fn set_status(
        &self,
        actor: &Actor,
        place_id: Uuid,
        status: PlaceStatus,
    ) -> Result<Place, Error>;

    async fn set_featured(&self, actor: &Actor, place_id: Uuid, featured: bool)
    -> Result<Place, Error>;

    /// Edit the descriptive fields. Owner or admin only.
    async fn update_details(
        &self,
        actor: &Actor,
        place_id: Uuid,
        patch: PlaceDetailsPatch,
    ) -> Result<Place, Error>;
}

//! Driving port for place reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, Error, Place, PlaceFilter, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceQuery: Send + Sync {
    /// Fetch one place. Non-approved places are only disclosed to their
    /// owner and to moderators; everyone else gets a not-found error.
    async fn get(&self, place_id: Uuid, viewer: Option<Actor>) -> Result<Place, Error>;

    /// Approved places matching `filter`, featured first then oldest first.
    async fn list_visible(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error>;

    /// Moderation queue, newest first. Moderators only.
    async fn list_pending(&self, actor: &Actor) -> Result<Vec<Place>, Error>;

    /// Approved places owned by `user_id`, i.e. valid advertisement targets.
    async fn list_linkable(&self, user_id: &UserId) -> Result<Vec<Place>, Error>;
}

//! Port for place persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Place, PlaceStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by place repository adapters.
    pub enum PlaceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "place repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "place repository query failed: {message}",
        /// An update targeted a place that does not exist.
        Missing { id: Uuid } => "place {id} does not exist",
    }
}

/// Storage for places.
///
/// Listings return places in insertion order; callers apply display
/// ordering themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Persist a newly submitted place.
    async fn insert(&self, place: &Place) -> Result<(), PlaceRepositoryError>;

    /// Replace a stored place wholesale.
    ///
    /// Fails with [`PlaceRepositoryError::Missing`] when no place has the
    /// same id.
    async fn save(&self, place: &Place) -> Result<(), PlaceRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, PlaceRepositoryError>;

    /// All places currently in `status`.
    async fn list_by_status(&self, status: PlaceStatus) -> Result<Vec<Place>, PlaceRepositoryError>;

    /// Approved places owned by `owner`.
    async fn find_approved_owned_by(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Place>, PlaceRepositoryError>;
}

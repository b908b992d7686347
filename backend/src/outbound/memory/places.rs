//! Place repository over the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};
use crate::domain::{Place, PlaceStatus, UserId};

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn insert(&self, place: &Place) -> Result<(), PlaceRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| PlaceRepositoryError::connection(err.message()))?;
        if state.places.iter().any(|stored| stored.id() == place.id()) {
            return Err(PlaceRepositoryError::query(format!(
                "place {} already exists",
                place.id()
            )));
        }
        state.places.push(place.clone());
        Ok(())
    }

    async fn save(&self, place: &Place) -> Result<(), PlaceRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| PlaceRepositoryError::connection(err.message()))?;
        let slot = state
            .places
            .iter_mut()
            .find(|stored| stored.id() == place.id())
            .ok_or_else(|| PlaceRepositoryError::missing(place.id()))?;
        *slot = place.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Place>, PlaceRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| PlaceRepositoryError::connection(err.message()))?;
        Ok(state.places.iter().find(|place| place.id() == id).cloned())
    }

    async fn list_by_status(&self, status: PlaceStatus) -> Result<Vec<Place>, PlaceRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| PlaceRepositoryError::connection(err.message()))?;
        Ok(state
            .places
            .iter()
            .filter(|place| place.status() == status)
            .cloned()
            .collect())
    }

    async fn find_approved_owned_by(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Place>, PlaceRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| PlaceRepositoryError::connection(err.message()))?;
        Ok(state
            .places
            .iter()
            .filter(|place| place.is_owned_by(owner) && place.status() == PlaceStatus::Approved)
            .cloned()
            .collect())
    }
}

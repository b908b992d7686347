//! Advertisement repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::ports::{AdvertisementRepository, AdvertisementRepositoryError};
use crate::domain::{Advertisement, UserId};

#[async_trait]
impl AdvertisementRepository for MemoryStore {
    async fn insert(&self, advertisement: &Advertisement) -> Result<(), AdvertisementRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        state.advertisements.push(advertisement.clone());
        Ok(())
    }

    async fn save(&self, advertisement: &Advertisement) -> Result<(), AdvertisementRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        let slot = state
            .advertisements
            .iter_mut()
            .find(|stored| stored.id() == advertisement.id())
            .ok_or_else(|| AdvertisementRepositoryError::missing(advertisement.id()))?;
        *slot = advertisement.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AdvertisementRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        let before = state.advertisements.len();
        state.advertisements.retain(|ad| ad.id() != id);
        if state.advertisements.len() == before {
            return Err(AdvertisementRepositoryError::missing(id));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Advertisement>, AdvertisementRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        Ok(state.advertisements.iter().find(|ad| ad.id() == id).cloned())
    }

    async fn list_active_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Advertisement>, AdvertisementRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        Ok(state
            .advertisements
            .iter()
            .filter(|ad| ad.is_active_at(now))
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Advertisement>, AdvertisementRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| AdvertisementRepositoryError::connection(err.message()))?;
        Ok(state
            .advertisements
            .iter()
            .filter(|ad| ad.is_owned_by(user_id))
            .cloned()
            .collect())
    }
}

//! Idempotency repository over the in-memory store.

use std::collections::hash_map::Entry;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{IdempotencyRepository, IdempotencyRepositoryError};
use crate::domain::{IdempotencyLookupQuery, IdempotencyLookupResult, IdempotencyRecord};

#[async_trait]
impl IdempotencyRepository for MemoryStore {
    async fn lookup(
        &self,
        query: &IdempotencyLookupQuery,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| IdempotencyRepositoryError::connection(err.message()))?;
        let stored = state
            .idempotency
            .get(&(query.user_id.clone(), query.key.clone()))
            .cloned();
        Ok(query.classify(stored))
    }

    async fn store(&self, record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| IdempotencyRepositoryError::connection(err.message()))?;
        match state
            .idempotency
            .entry((record.user_id.clone(), record.key.clone()))
        {
            Entry::Occupied(_) => Err(IdempotencyRepositoryError::duplicate_key(
                record.key.to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }
}

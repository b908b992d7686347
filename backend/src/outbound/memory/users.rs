//! User repository over the in-memory store.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self
            .lock()
            .map_err(|err| UserPersistenceError::connection(err.message()))?;
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .map_err(|err| UserPersistenceError::connection(err.message()))?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .map_err(|err| UserPersistenceError::connection(err.message()))?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }
}

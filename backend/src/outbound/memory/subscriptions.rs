//! Subscription repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::MemoryStore;
use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{Subscription, UserId};

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn insert_if_none_active(
        &self,
        subscription: &Subscription,
        now: DateTime<Utc>,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut state = self
            .lock()
            .map_err(|err| SubscriptionRepositoryError::connection(err.message()))?;
        let user_id = subscription.user_id();
        let already_active = state
            .subscriptions
            .iter()
            .any(|stored| stored.user_id() == user_id && stored.is_active_at(now));
        if already_active {
            return Err(SubscriptionRepositoryError::active_subscription_exists(
                user_id.clone(),
            ));
        }
        state.subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| SubscriptionRepositoryError::connection(err.message()))?;
        Ok(state
            .subscriptions
            .iter()
            .filter(|sub| sub.user_id() == user_id && sub.is_active_at(now))
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let state = self
            .lock()
            .map_err(|err| SubscriptionRepositoryError::connection(err.message()))?;
        Ok(state
            .subscriptions
            .iter()
            .filter(|sub| sub.user_id() == user_id)
            .cloned()
            .collect())
    }
}

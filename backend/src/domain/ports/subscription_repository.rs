//! Port for subscription persistence.
//!
//! The repository owns the one cross-request invariant of the engine: at
//! most one active subscription per user. [`SubscriptionRepository::insert_if_none_active`]
//! must perform the check and the insert as a single atomic unit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Subscription, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscription repository adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "subscription repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "subscription repository query failed: {message}",
        /// The user already holds a subscription active at the insert instant.
        ActiveSubscriptionExists { user_id: String } =>
            "user {user_id} already has an active subscription",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert `subscription` unless its user already has one active at `now`.
    ///
    /// Fails with [`SubscriptionRepositoryError::ActiveSubscriptionExists`]
    /// and stores nothing when an active row exists.
    async fn insert_if_none_active(
        &self,
        subscription: &Subscription,
        now: DateTime<Utc>,
    ) -> Result<(), SubscriptionRepositoryError>;

    /// Subscriptions of `user_id` that are active at `now`.
    async fn find_active(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;

    /// Every subscription of `user_id`, in insertion order.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;
}

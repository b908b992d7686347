//! Driving port for subscription purchases.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, IdempotencyKey, Subscription, UserId};

/// Request to buy a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub user_id: UserId,
    pub package_id: Uuid,
    /// Optional key making retries of the same purchase safe.
    #[serde(default)]
    pub idempotency_key: Option<IdempotencyKey>,
}

impl SubscribeRequest {
    pub fn new(user_id: UserId, package_id: Uuid) -> Self {
        Self {
            user_id,
            package_id,
            idempotency_key: None,
        }
    }

    #[must_use]
    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }
}

/// Outcome of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub subscription: Subscription,
    /// Whether this response was replayed from an earlier request with the
    /// same idempotency key.
    pub replayed: bool,
}

/// Driving port for subscription purchases.
///
/// # Idempotency
///
/// When `idempotency_key` is supplied a retry with the same payload replays
/// the first subscription with `replayed: true`, and the same key with a
/// different payload fails with a conflict.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionCommand: Send + Sync {
    /// # Errors
    ///
    /// - conflict when the user already has an active subscription;
    /// - not found when the package does not exist;
    /// - conflict when the idempotency key was reused with another payload.
    async fn subscribe(&self, request: SubscribeRequest) -> Result<SubscribeResponse, Error>;
}

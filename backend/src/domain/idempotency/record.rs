//! Stored idempotency records and lookup types.

use chrono::{DateTime, Utc};

use super::{IdempotencyKey, PayloadHash};
use crate::domain::{Subscription, UserId};

/// A completed purchase remembered under its idempotency key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdempotencyRecord {
    pub key: IdempotencyKey,
    pub user_id: UserId,
    pub payload_hash: PayloadHash,
    /// The subscription the first attempt created; replayed on retry.
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
}

/// Result of looking up an idempotency key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdempotencyLookupResult {
    NotFound,
    /// Same key, same payload: replay the stored subscription.
    MatchingPayload(IdempotencyRecord),
    /// Same key, different payload: the key was reused.
    ConflictingPayload(IdempotencyRecord),
}

/// Parameters for an idempotency lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdempotencyLookupQuery {
    pub key: IdempotencyKey,
    pub user_id: UserId,
    pub payload_hash: PayloadHash,
}

impl IdempotencyLookupQuery {
    pub fn new(key: IdempotencyKey, user_id: UserId, payload_hash: PayloadHash) -> Self {
        Self {
            key,
            user_id,
            payload_hash,
        }
    }

    /// Classify a stored record against this query.
    pub fn classify(&self, stored: Option<IdempotencyRecord>) -> IdempotencyLookupResult {
        match stored {
            None => IdempotencyLookupResult::NotFound,
            Some(record) if record.payload_hash == self.payload_hash => {
                IdempotencyLookupResult::MatchingPayload(record)
            }
            Some(record) => IdempotencyLookupResult::ConflictingPayload(record),
        }
    }
}

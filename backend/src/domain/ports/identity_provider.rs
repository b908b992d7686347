//! Identity collaborator.
//!
//! Session handling lives outside the engine. Inbound adapters turn a
//! session into a [`RequestContext`]; the [`IdentityProvider`] maps that
//! context onto a stored [`User`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User, UserId};

/// Per-request caller information derived from the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub user_id: Option<UserId>,
}

impl RequestContext {
    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the caller, or `None` when the request is anonymous or the
    /// session points at an unknown user.
    async fn current_user(&self, context: &RequestContext) -> Result<Option<User>, Error>;

    /// Resolve the caller, failing with an auth error when there is none.
    async fn require_authenticated(&self, context: &RequestContext) -> Result<User, Error> {
        self.current_user(context)
            .await?
            .ok_or_else(|| Error::auth("authentication required"))
    }
}

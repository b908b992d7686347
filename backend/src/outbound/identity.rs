//! Identity provider backed by the user repository.
//!
//! Session handling happens upstream; by the time a request reaches the
//! engine its context only carries the authenticated user id, if any.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{IdentityProvider, RequestContext, UserRepository};
use crate::domain::{Error, User, map_user_error};

/// Resolves callers by looking their id up in a [`UserRepository`].
#[derive(Clone)]
pub struct RepositoryIdentityProvider<U> {
    users: Arc<U>,
}

impl<U> RepositoryIdentityProvider<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> IdentityProvider for RepositoryIdentityProvider<U>
where
    U: UserRepository,
{
    async fn current_user(&self, context: &RequestContext) -> Result<Option<User>, Error> {
        let Some(user_id) = context.user_id.as_ref() else {
            return Ok(None);
        };
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?;
        if user.is_none() {
            debug!(%user_id, "session refers to unknown user");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::domain::{Role, UserId};
    use crate::test_support::fixtures::user_with_role;

    #[tokio::test]
    async fn anonymous_context_skips_the_repository() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(0);
        let identity = RepositoryIdentityProvider::new(Arc::new(users));

        let resolved = identity
            .current_user(&RequestContext::anonymous())
            .await
            .expect("anonymous lookup");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn known_user_is_resolved() {
        let alice = user_with_role("alice", Role::Premium);
        let expected = alice.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(alice)));
        let identity = RepositoryIdentityProvider::new(Arc::new(users));

        let resolved = identity
            .current_user(&RequestContext::for_user(expected.id().clone()))
            .await
            .expect("lookup");
        assert_eq!(resolved, Some(expected));
    }

    #[tokio::test]
    async fn repository_failure_is_internal() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("offline")));
        let identity = RepositoryIdentityProvider::new(Arc::new(users));

        let err = identity
            .current_user(&RequestContext::for_user(UserId::random()))
            .await
            .expect_err("repository failure");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}

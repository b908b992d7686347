//! Entitlement service: resolves capabilities and performs the
//! administrative role changes that mutate a stored base role.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    EntitlementQuery, SubscriptionRepository, SubscriptionRepositoryError, UserAdminCommand,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Actor, Entitlement, Error, Role, User, UserId, Username, resolve_entitlement,
};

/// Entitlement Resolver bound to fresh persistence reads.
#[derive(Clone)]
pub struct EntitlementService<U, S> {
    users: Arc<U>,
    subscriptions: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<U, S> EntitlementService<U, S> {
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            subscriptions,
            clock,
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_subscription_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::internal(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
        SubscriptionRepositoryError::ActiveSubscriptionExists { user_id } => Error::conflict(
            format!("user {user_id} already has an active subscription"),
        ),
    }
}

#[async_trait]
impl<U, S> EntitlementQuery for EntitlementService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn resolve(&self, user: &User) -> Result<Entitlement, Error> {
        let now = self.clock.utc();
        let active = self
            .subscriptions
            .find_active(user.id(), now)
            .await
            .map_err(map_subscription_error)?;
        let entitlement = resolve_entitlement(user, &active, now);
        debug!(
            user_id = %user.id(),
            stored_role = %user.role(),
            effective_role = %entitlement.effective_role,
            active_subscriptions = active.len(),
            "entitlement resolved"
        );
        Ok(entitlement)
    }
}

#[async_trait]
impl<U, S> UserAdminCommand for EntitlementService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn assign_role(&self, actor: &Actor, user_id: &UserId, role: Role) -> Result<User, Error> {
        if !actor.entitlement.is_admin() {
            warn!(actor = %actor.id, target = %user_id, "role assignment denied");
            return Err(Error::auth("assigning roles requires admin privileges"));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;
        let previous = user.role();
        let updated = user.with_role(role);
        self.users.upsert(&updated).await.map_err(map_user_error)?;
        info!(actor = %actor.id, target = %user_id, from = %previous, to = %role, "role assigned");
        Ok(updated)
    }

    async fn seed_admin(&self, username: Username) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;
        let admin = match existing {
            Some(user) if user.role() == Role::Admin => return Ok(user),
            Some(user) => user.with_role(Role::Admin),
            None => User::new(UserId::random(), username, Role::Admin),
        };
        self.users.upsert(&admin).await.map_err(map_user_error)?;
        info!(user_id = %admin.id(), username = %admin.username(), "administrator seeded");
        Ok(admin)
    }
}

#[cfg(test)]
#[path = "entitlement_service_tests.rs"]
mod tests;

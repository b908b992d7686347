//! Subscription service implementing the subscription command and query
//! ports.
//!
//! The single-active-subscription rule is enforced by the repository's
//! atomic check-and-insert; this service never performs a separate
//! existence check before inserting.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entitlement_service::map_subscription_error;
use crate::domain::ports::{
    IdempotencyRepository, IdempotencyRepositoryError, PackageCatalogue, PackageCatalogueError,
    SubscribeRequest, SubscribeResponse, SubscriptionCommand, SubscriptionQuery,
    SubscriptionRepository, SubscriptionRepositoryError,
};
use crate::domain::{
    Error, IdempotencyKey, IdempotencyLookupQuery, IdempotencyLookupResult, IdempotencyRecord,
    Package, PayloadHash, Subscription, UserId, canonicalize_and_hash, select_active,
};

/// Subscription Manager: the only writer of subscription state.
#[derive(Clone)]
pub struct SubscriptionService<S, C, I> {
    subscriptions: Arc<S>,
    catalogue: Arc<C>,
    idempotency: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<S, C, I> SubscriptionService<S, C, I> {
    pub fn new(
        subscriptions: Arc<S>,
        catalogue: Arc<C>,
        idempotency: Arc<I>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscriptions,
            catalogue,
            idempotency,
            clock,
        }
    }
}

fn map_catalogue_error(error: PackageCatalogueError) -> Error {
    match error {
        PackageCatalogueError::Connection { message } => {
            Error::internal(format!("package catalogue unavailable: {message}"))
        }
        PackageCatalogueError::Query { message } => {
            Error::internal(format!("package catalogue error: {message}"))
        }
    }
}

fn map_idempotency_error(error: IdempotencyRepositoryError) -> Error {
    match error {
        IdempotencyRepositoryError::Connection { message } => {
            Error::internal(format!("idempotency repository unavailable: {message}"))
        }
        IdempotencyRepositoryError::Query { message } => {
            Error::internal(format!("idempotency repository error: {message}"))
        }
        IdempotencyRepositoryError::DuplicateKey { message } => {
            Error::conflict(format!("idempotency key already used: {message}"))
        }
    }
}

impl<S, C, I> SubscriptionService<S, C, I>
where
    S: SubscriptionRepository,
    C: PackageCatalogue,
    I: IdempotencyRepository,
{
    pub(crate) fn subscribe_payload_hash(request: &SubscribeRequest) -> Result<PayloadHash, Error> {
        canonicalize_and_hash(&json!({ "packageId": request.package_id }))
            .map_err(|err| Error::internal(format!("failed to hash request payload: {err}")))
    }

    async fn replay(
        &self,
        key: &IdempotencyKey,
        request: &SubscribeRequest,
        payload_hash: PayloadHash,
    ) -> Result<Option<SubscribeResponse>, Error> {
        let query = IdempotencyLookupQuery::new(key.clone(), request.user_id.clone(), payload_hash);
        match self
            .idempotency
            .lookup(&query)
            .await
            .map_err(map_idempotency_error)?
        {
            IdempotencyLookupResult::NotFound => Ok(None),
            IdempotencyLookupResult::MatchingPayload(record) => {
                info!(user_id = %request.user_id, %key, "subscription replayed");
                Ok(Some(SubscribeResponse {
                    subscription: record.subscription,
                    replayed: true,
                }))
            }
            IdempotencyLookupResult::ConflictingPayload(_) => {
                warn!(user_id = %request.user_id, %key, "idempotency key reused");
                Err(
                    Error::conflict("idempotency key was used with a different request")
                        .with_details(json!({ "code": "idempotency_key_conflict" })),
                )
            }
        }
    }

    async fn load_package(&self, package_id: Uuid) -> Result<Package, Error> {
        self.catalogue
            .get_package(package_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("package {package_id} not found")))
    }

    async fn remember(
        &self,
        key: IdempotencyKey,
        payload_hash: PayloadHash,
        subscription: &Subscription,
    ) {
        let record = IdempotencyRecord {
            key,
            user_id: subscription.user_id().clone(),
            payload_hash,
            subscription: subscription.clone(),
            created_at: subscription.start_date(),
        };
        if let Err(err) = self.idempotency.store(&record).await {
            warn!(
                subscription_id = %subscription.id(),
                error = %err,
                "failed to store idempotency record"
            );
        }
    }
}

#[async_trait]
impl<S, C, I> SubscriptionCommand for SubscriptionService<S, C, I>
where
    S: SubscriptionRepository,
    C: PackageCatalogue,
    I: IdempotencyRepository,
{
    async fn subscribe(&self, request: SubscribeRequest) -> Result<SubscribeResponse, Error> {
        let payload_hash = Self::subscribe_payload_hash(&request)?;
        if let Some(key) = request.idempotency_key.as_ref() {
            if let Some(replayed) = self.replay(key, &request, payload_hash).await? {
                return Ok(replayed);
            }
        }

        let package = self.load_package(request.package_id).await?;
        let now = self.clock.utc();
        let subscription = Subscription::start(Uuid::new_v4(), request.user_id.clone(), &package, now)
            .map_err(|err| {
                error!(package_id = %package.id(), now = %now, "subscription window overflowed");
                Error::internal(err.to_string())
            })?;
        self.subscriptions
            .insert_if_none_active(&subscription, now)
            .await
            .map_err(|err| {
                if matches!(err, SubscriptionRepositoryError::ActiveSubscriptionExists { .. }) {
                    warn!(user_id = %request.user_id, "subscription rejected: one is already active");
                }
                map_subscription_error(err)
            })?;
        info!(
            subscription_id = %subscription.id(),
            user_id = %request.user_id,
            package_id = %package.id(),
            end_date = %subscription.end_date(),
            "subscription created"
        );

        if let Some(key) = request.idempotency_key {
            self.remember(key, payload_hash, &subscription).await;
        }
        Ok(SubscribeResponse {
            subscription,
            replayed: false,
        })
    }
}

#[async_trait]
impl<S, C, I> SubscriptionQuery for SubscriptionService<S, C, I>
where
    S: SubscriptionRepository,
    C: PackageCatalogue,
    I: IdempotencyRepository,
{
    async fn get_active_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, Error> {
        let now = self.clock.utc();
        let candidates = self
            .subscriptions
            .find_active(user_id, now)
            .await
            .map_err(map_subscription_error)?;
        let selection = select_active(&candidates, now);
        if selection.is_inconsistent() {
            warn!(
                %user_id,
                active_count = selection.active_count,
                "multiple active subscriptions found; using the most recent"
            );
        }
        Ok(selection.active.cloned())
    }

    async fn list_mine(&self, user_id: &UserId) -> Result<Vec<Subscription>, Error> {
        let mut subscriptions = self
            .subscriptions
            .list_for_user(user_id)
            .await
            .map_err(map_subscription_error)?;
        subscriptions.sort_by(|left, right| right.start_date().cmp(&left.start_date()));
        Ok(subscriptions)
    }

    async fn list_packages(&self) -> Result<Vec<Package>, Error> {
        self.catalogue
            .list_packages()
            .await
            .map_err(map_catalogue_error)
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;

//! Advertisement service implementing the advertisement command and query
//! ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::place_service::map_place_repository_error;
use crate::domain::ports::{
    AdvertisementCommand, AdvertisementQuery, AdvertisementRepository,
    AdvertisementRepositoryError, PlaceRepository,
};
use crate::domain::{
    Actor, Advertisement, AdvertisementDraft, AdvertisementPatch, AdvertisementValidationError,
    Error, UserId, order_newest_first,
};

/// Advertisement Manager.
#[derive(Clone)]
pub struct AdvertisementService<A, P> {
    advertisements: Arc<A>,
    places: Arc<P>,
    clock: Arc<dyn Clock>,
    default_duration: Duration,
}

impl<A, P> AdvertisementService<A, P> {
    /// `default_duration` is the campaign length used when a draft omits
    /// its end date.
    pub fn new(
        advertisements: Arc<A>,
        places: Arc<P>,
        clock: Arc<dyn Clock>,
        default_duration: Duration,
    ) -> Self {
        Self {
            advertisements,
            places,
            clock,
            default_duration,
        }
    }
}

fn map_advertisement_error(error: AdvertisementRepositoryError) -> Error {
    match error {
        AdvertisementRepositoryError::Connection { message } => {
            Error::internal(format!("advertisement repository unavailable: {message}"))
        }
        AdvertisementRepositoryError::Query { message } => {
            Error::internal(format!("advertisement repository error: {message}"))
        }
        AdvertisementRepositoryError::Missing { id } => advertisement_not_found(id),
    }
}

fn map_validation_error(error: AdvertisementValidationError) -> Error {
    let field = match &error {
        AdvertisementValidationError::EmptyTitle => "title",
        AdvertisementValidationError::EmptyContent => "content",
        AdvertisementValidationError::EndNotAfterStart { .. }
        | AdvertisementValidationError::DefaultEndOutOfRange { .. } => "endDate",
    };
    Error::validation(error.to_string()).with_details(json!({ "field": field }))
}

fn advertisement_not_found(id: Uuid) -> Error {
    Error::not_found(format!("advertisement {id} not found"))
}

impl<A, P> AdvertisementService<A, P>
where
    A: AdvertisementRepository,
    P: PlaceRepository,
{
    async fn load(&self, advertisement_id: Uuid) -> Result<Advertisement, Error> {
        self.advertisements
            .find_by_id(advertisement_id)
            .await
            .map_err(map_advertisement_error)?
            .ok_or_else(|| advertisement_not_found(advertisement_id))
    }

    /// A linked place must exist, belong to the advertiser, and be approved.
    async fn ensure_linkable(&self, owner: &UserId, place_id: Uuid) -> Result<(), Error> {
        let place = self
            .places
            .find_by_id(place_id)
            .await
            .map_err(map_place_repository_error)?
            .ok_or_else(|| Error::not_found(format!("place {place_id} not found")))?;
        if !place.is_owned_by(owner) {
            warn!(%owner, %place_id, "advertisement link to foreign place denied");
            return Err(Error::ownership("advertisements may only link to your own places"));
        }
        if !place.is_visible() {
            warn!(%owner, %place_id, status = %place.status(), "advertisement link to unapproved place denied");
            return Err(Error::ownership(
                "advertisements may only link to approved places",
            )
            .with_details(json!({ "status": place.status().as_str() })));
        }
        Ok(())
    }

    fn ensure_owner_or_admin(actor: &Actor, ad: &Advertisement, action: &'static str) -> Result<(), Error> {
        if actor.owns_or_administers(ad.user_id()) {
            return Ok(());
        }
        warn!(actor = %actor.id, advertisement_id = %ad.id(), action, "advertisement access denied");
        Err(Error::auth(format!(
            "only the owner or an admin may {action} this advertisement"
        )))
    }
}

#[async_trait]
impl<A, P> AdvertisementCommand for AdvertisementService<A, P>
where
    A: AdvertisementRepository,
    P: PlaceRepository,
{
    async fn create(
        &self,
        actor: &Actor,
        draft: AdvertisementDraft,
    ) -> Result<Advertisement, Error> {
        if !actor.entitlement.can_advertise {
            warn!(actor = %actor.id, role = %actor.entitlement.effective_role, "advertising denied");
            return Err(Error::auth(
                "creating advertisements requires an active subscription",
            ));
        }
        let advertisement = Advertisement::create(
            Uuid::new_v4(),
            actor.id.clone(),
            draft,
            self.clock.utc(),
            self.default_duration,
        )
        .map_err(map_validation_error)?;
        if let Some(place_id) = advertisement.place_id() {
            self.ensure_linkable(&actor.id, place_id).await?;
        }
        self.advertisements
            .insert(&advertisement)
            .await
            .map_err(map_advertisement_error)?;
        info!(
            advertisement_id = %advertisement.id(),
            owner = %actor.id,
            end_date = %advertisement.end_date(),
            "advertisement created"
        );
        Ok(advertisement)
    }

    async fn update(
        &self,
        actor: &Actor,
        advertisement_id: Uuid,
        patch: AdvertisementPatch,
    ) -> Result<Advertisement, Error> {
        let current = self.load(advertisement_id).await?;
        Self::ensure_owner_or_admin(actor, &current, "edit")?;
        let updated = current.patched(patch).map_err(map_validation_error)?;
        if let Some(place_id) = updated.place_id() {
            if updated.place_id() != current.place_id() {
                self.ensure_linkable(current.user_id(), place_id).await?;
            }
        }
        self.advertisements
            .save(&updated)
            .await
            .map_err(map_advertisement_error)?;
        info!(%advertisement_id, actor = %actor.id, "advertisement updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, advertisement_id: Uuid) -> Result<(), Error> {
        let current = self.load(advertisement_id).await?;
        Self::ensure_owner_or_admin(actor, &current, "delete")?;
        self.advertisements
            .delete(advertisement_id)
            .await
            .map_err(map_advertisement_error)?;
        info!(%advertisement_id, actor = %actor.id, "advertisement deleted");
        Ok(())
    }
}

#[async_trait]
impl<A, P> AdvertisementQuery for AdvertisementService<A, P>
where
    A: AdvertisementRepository,
    P: PlaceRepository,
{
    async fn list_active(&self) -> Result<Vec<Advertisement>, Error> {
        let mut active = self
            .advertisements
            .list_active_at(self.clock.utc())
            .await
            .map_err(map_advertisement_error)?;
        order_newest_first(&mut active);
        Ok(active)
    }

    async fn list_mine(&self, user_id: &UserId) -> Result<Vec<Advertisement>, Error> {
        let mut mine = self
            .advertisements
            .list_for_user(user_id)
            .await
            .map_err(map_advertisement_error)?;
        order_newest_first(&mut mine);
        Ok(mine)
    }
}

#[cfg(test)]
#[path = "advertisement_service_tests.rs"]
mod tests;

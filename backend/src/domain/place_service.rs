//! Place lifecycle service implementing the place command and query ports.
//!
//! This service is the only writer of `Place::status` and
//! `Place::is_featured`. Every mutation loads the place, applies the change
//! to a local copy, and saves the whole entity, so a rejected operation
//! never leaves a partial write behind.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{PlaceCommand, PlaceQuery, PlaceRepository, PlaceRepositoryError};
use crate::domain::{
    Actor, Error, Place, PlaceDetails, PlaceDetailsPatch, PlaceFilter, PlaceStatus,
    PlaceSubmission, PlaceValidationError, UserId, order_for_display,
};

/// Place Lifecycle Manager.
#[derive(Clone)]
pub struct PlaceService<P> {
    places: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> PlaceService<P> {
    pub fn new(places: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { places, clock }
    }
}

pub(crate) fn map_place_repository_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::internal(format!("place repository unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } => {
            Error::internal(format!("place repository error: {message}"))
        }
        PlaceRepositoryError::Missing { id } => Error::not_found(format!("place {id} not found")),
    }
}

fn map_validation_error(error: PlaceValidationError) -> Error {
    let field = match &error {
        PlaceValidationError::EmptyName => "name",
        PlaceValidationError::MissingCategory | PlaceValidationError::UnknownCategory { .. } => {
            "category"
        }
        PlaceValidationError::FeaturedWithoutApproval { .. } => "isFeatured",
    };
    Error::validation(error.to_string()).with_details(json!({ "field": field }))
}

fn place_not_found(place_id: Uuid) -> Error {
    Error::not_found(format!("place {place_id} not found"))
}

impl<P> PlaceService<P>
where
    P: PlaceRepository,
{
    async fn load(&self, place_id: Uuid) -> Result<Place, Error> {
        self.places
            .find_by_id(place_id)
            .await
            .map_err(map_place_repository_error)?
            .ok_or_else(|| place_not_found(place_id))
    }

    async fn store(&self, place: &Place) -> Result<(), Error> {
        self.places
            .save(place)
            .await
            .map_err(map_place_repository_error)
    }

    fn require_moderator(actor: &Actor, action: &'static str) -> Result<(), Error> {
        if actor.entitlement.can_moderate {
            return Ok(());
        }
        warn!(actor = %actor.id, action, "moderation denied");
        Err(Error::auth(format!("{action} requires moderator privileges")))
    }
}

#[async_trait]
impl<P> PlaceCommand for PlaceService<P>
where
    P: PlaceRepository,
{
    async fn submit(&self, owner: &UserId, submission: PlaceSubmission) -> Result<Place, Error> {
        let details = PlaceDetails::try_from(submission).map_err(map_validation_error)?;
        let place = Place::submitted(Uuid::new_v4(), owner.clone(), details, self.clock.utc());
        self.places
            .insert(&place)
            .await
            .map_err(map_place_repository_error)?;
        info!(place_id = %place.id(), owner = %owner, category = %place.category(), "place submitted");
        Ok(place)
    }

    async fn set_status(
        &self,
        actor: &Actor,
        place_id: Uuid,
        status: PlaceStatus,
    ) -> Result<Place, Error> {
        Self::require_moderator(actor, "changing place status")?;
        let mut place = self.load(place_id).await?;
        let previous = place.status();
        place.transition_to(status);
        self.store(&place).await?;
        info!(
            place_id = %place_id,
            actor = %actor.id,
            from = %previous,
            to = %status,
            "place status changed"
        );
        Ok(place)
    }

    async fn set_featured(
        &self,
        actor: &Actor,
        place_id: Uuid,
        featured: bool,
    ) -> Result<Place, Error> {
        if !actor.entitlement.can_feature_own_places {
            warn!(actor = %actor.id, %place_id, "featuring denied");
            return Err(Error::auth("featuring places requires admin privileges"));
        }
        let mut place = self.load(place_id).await?;
        place.set_featured(featured).map_err(|err| {
            Error::invalid_state(err.to_string())
                .with_details(json!({ "status": err.status.as_str() }))
        })?;
        self.store(&place).await?;
        info!(%place_id, actor = %actor.id, featured, "place featured flag changed");
        Ok(place)
    }

    async fn update_details(
        &self,
        actor: &Actor,
        place_id: Uuid,
        patch: PlaceDetailsPatch,
    ) -> Result<Place, Error> {
        let mut place = self.load(place_id).await?;
        if !actor.owns_or_administers(place.owner_id()) {
            warn!(actor = %actor.id, %place_id, "place edit denied");
            return Err(Error::auth("only the owner or an admin may edit this place"));
        }
        let details = place
            .details()
            .patched(patch)
            .map_err(map_validation_error)?;
        place.replace_details(details);
        self.store(&place).await?;
        info!(%place_id, actor = %actor.id, "place details updated");
        Ok(place)
    }
}

#[async_trait]
impl<P> PlaceQuery for PlaceService<P>
where
    P: PlaceRepository,
{
    async fn get(&self, place_id: Uuid, viewer: Option<Actor>) -> Result<Place, Error> {
        let place = self.load(place_id).await?;
        if place.is_visible() {
            return Ok(place);
        }
        let disclosed = viewer.is_some_and(|viewer| {
            viewer.entitlement.can_moderate || place.is_owned_by(&viewer.id)
        });
        if disclosed {
            Ok(place)
        } else {
            Err(place_not_found(place_id))
        }
    }

    async fn list_visible(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error> {
        let mut places: Vec<Place> = self
            .places
            .list_by_status(PlaceStatus::Approved)
            .await
            .map_err(map_place_repository_error)?
            .into_iter()
            .filter(|place| place.is_visible() && filter.matches(place))
            .collect();
        order_for_display(&mut places);
        Ok(places)
    }

    async fn list_pending(&self, actor: &Actor) -> Result<Vec<Place>, Error> {
        Self::require_moderator(actor, "viewing the moderation queue")?;
        let mut places = self
            .places
            .list_by_status(PlaceStatus::Pending)
            .await
            .map_err(map_place_repository_error)?;
        places.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(places)
    }

    async fn list_linkable(&self, user_id: &UserId) -> Result<Vec<Place>, Error> {
        self.places
            .find_approved_owned_by(user_id)
            .await
            .map_err(map_place_repository_error)
    }
}

#[cfg(test)]
#[path = "place_service_tests.rs"]
mod tests;

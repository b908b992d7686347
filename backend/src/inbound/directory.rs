//! Transport-agnostic facade over the directory's driving ports.
//!
//! Every operation resolves the caller from its [`RequestContext`], derives
//! a fresh entitlement for authenticated calls, delegates to the domain
//! services, and wraps the outcome in an [`Envelope`]. Transports (HTTP,
//! CLI, tests) only ever talk to this type.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{
    AdvertisementCommand, AdvertisementQuery, EntitlementQuery, IdentityProvider, PlaceCommand,
    PlaceQuery, RequestContext, SubscribeRequest, SubscribeResponse, SubscriptionCommand,
    SubscriptionQuery, UserAdminCommand,
};
use crate::domain::{
    Actor, Advertisement, AdvertisementDraft, AdvertisementPatch, CategoryOption, Entitlement,
    Error, IdempotencyKey, Package, Place, PlaceDetailsPatch, PlaceFilter, PlaceStatus,
    PlaceSubmission, Role, Subscription, User, UserId, category_options,
};
use crate::inbound::Envelope;

/// Parameter object bundling the port implementations behind the facade.
#[derive(Clone)]
pub struct DirectoryPorts {
    pub identity: Arc<dyn IdentityProvider>,
    pub entitlements: Arc<dyn EntitlementQuery>,
    pub user_admin: Arc<dyn UserAdminCommand>,
    pub places: Arc<dyn PlaceCommand>,
    pub places_query: Arc<dyn PlaceQuery>,
    pub subscriptions: Arc<dyn SubscriptionCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionQuery>,
    pub advertisements: Arc<dyn AdvertisementCommand>,
    pub advertisements_query: Arc<dyn AdvertisementQuery>,
}

/// Operations exposed to the presentation layer.
#[derive(Clone)]
pub struct DirectoryApi {
    ports: DirectoryPorts,
}

impl DirectoryApi {
    pub fn new(ports: DirectoryPorts) -> Self {
        Self { ports }
    }

    async fn actor(&self, context: &RequestContext) -> Result<Actor, Error> {
        let user = self.ports.identity.require_authenticated(context).await?;
        self.actor_for(&user).await
    }

    async fn actor_for(&self, user: &User) -> Result<Actor, Error> {
        let entitlement = self.ports.entitlements.resolve(user).await?;
        Ok(Actor::new(user.id().clone(), entitlement))
    }

    async fn viewer(&self, context: &RequestContext) -> Result<Option<Actor>, Error> {
        match self.ports.identity.current_user(context).await? {
            Some(user) => self.actor_for(&user).await.map(Some),
            None => Ok(None),
        }
    }

    /// The closed category list with display labels.
    pub fn categories(&self) -> Envelope<Vec<CategoryOption>> {
        Envelope::Ok(category_options())
    }

    /// Entitlement of the caller as resolved right now.
    pub async fn entitlement(&self, context: &RequestContext) -> Envelope<Entitlement> {
        self.actor(context)
            .await
            .map(|actor| actor.entitlement)
            .into()
    }

    pub async fn submit_place(
        &self,
        context: &RequestContext,
        submission: PlaceSubmission,
    ) -> Envelope<Place> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            self.ports.places.submit(user.id(), submission).await
        }
        .await;
        result.into()
    }

    /// One place; non-approved places only for their owner or a moderator.
    pub async fn get_place(&self, context: &RequestContext, place_id: Uuid) -> Envelope<Place> {
        let result = async {
            let viewer = self.viewer(context).await?;
            self.ports.places_query.get(place_id, viewer).await
        }
        .await;
        result.into()
    }

    /// Public listing. Needs no authentication.
    pub async fn list_places(&self, filter: &PlaceFilter) -> Envelope<Vec<Place>> {
        self.ports.places_query.list_visible(filter).await.into()
    }

    pub async fn list_pending_places(&self, context: &RequestContext) -> Envelope<Vec<Place>> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports.places_query.list_pending(&actor).await
        }
        .await;
        result.into()
    }

    pub async fn list_linkable_places(&self, context: &RequestContext) -> Envelope<Vec<Place>> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            self.ports.places_query.list_linkable(user.id()).await
        }
        .await;
        result.into()
    }

    pub async fn set_place_status(
        &self,
        context: &RequestContext,
        place_id: Uuid,
        status: PlaceStatus,
    ) -> Envelope<Place> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports.places.set_status(&actor, place_id, status).await
        }
        .await;
        result.into()
    }

    pub async fn set_place_featured(
        &self,
        context: &RequestContext,
        place_id: Uuid,
        featured: bool,
    ) -> Envelope<Place> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports.places.set_featured(&actor, place_id, featured).await
        }
        .await;
        result.into()
    }

    pub async fn update_place(
        &self,
        context: &RequestContext,
        place_id: Uuid,
        patch: PlaceDetailsPatch,
    ) -> Envelope<Place> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports
                .places
                .update_details(&actor, place_id, patch)
                .await
        }
        .await;
        result.into()
    }

    pub async fn list_packages(&self) -> Envelope<Vec<Package>> {
        self.ports.subscriptions_query.list_packages().await.into()
    }

    /// Buy `package_id` for the caller.
    pub async fn subscribe(
        &self,
        context: &RequestContext,
        package_id: Uuid,
        idempotency_key: Option<IdempotencyKey>,
    ) -> Envelope<SubscribeResponse> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            let request = SubscribeRequest {
                user_id: user.id().clone(),
                package_id,
                idempotency_key,
            };
            self.ports.subscriptions.subscribe(request).await
        }
        .await;
        result.into()
    }

    pub async fn active_subscription(
        &self,
        context: &RequestContext,
    ) -> Envelope<Option<Subscription>> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            self.ports
                .subscriptions_query
                .get_active_subscription(user.id())
                .await
        }
        .await;
        result.into()
    }

    pub async fn my_subscriptions(&self, context: &RequestContext) -> Envelope<Vec<Subscription>> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            self.ports.subscriptions_query.list_mine(user.id()).await
        }
        .await;
        result.into()
    }

    pub async fn create_advertisement(
        &self,
        context: &RequestContext,
        draft: AdvertisementDraft,
    ) -> Envelope<Advertisement> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports.advertisements.create(&actor, draft).await
        }
        .await;
        result.into()
    }

    pub async fn update_advertisement(
        &self,
        context: &RequestContext,
        advertisement_id: Uuid,
        patch: AdvertisementPatch,
    ) -> Envelope<Advertisement> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports
                .advertisements
                .update(&actor, advertisement_id, patch)
                .await
        }
        .await;
        result.into()
    }

    pub async fn delete_advertisement(
        &self,
        context: &RequestContext,
        advertisement_id: Uuid,
    ) -> Envelope<()> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports
                .advertisements
                .delete(&actor, advertisement_id)
                .await
        }
        .await;
        result.into()
    }

    /// Running campaigns, most recently started first. Public.
    pub async fn list_advertisements(&self) -> Envelope<Vec<Advertisement>> {
        self.ports.advertisements_query.list_active().await.into()
    }

    pub async fn my_advertisements(
        &self,
        context: &RequestContext,
    ) -> Envelope<Vec<Advertisement>> {
        let result = async {
            let user = self.ports.identity.require_authenticated(context).await?;
            self.ports.advertisements_query.list_mine(user.id()).await
        }
        .await;
        result.into()
    }

    /// Change another user's stored role. Admin only.
    pub async fn assign_role(
        &self,
        context: &RequestContext,
        user_id: &UserId,
        role: Role,
    ) -> Envelope<User> {
        let result = async {
            let actor = self.actor(context).await?;
            self.ports.user_admin.assign_role(&actor, user_id, role).await
        }
        .await;
        result.into()
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;

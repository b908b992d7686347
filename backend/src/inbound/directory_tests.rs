//! Tests for the directory facade. Services are mocked; only the caller
//! resolution and envelope wrapping are exercised here.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{
    MockAdvertisementCommand, MockAdvertisementQuery, MockEntitlementQuery, MockPlaceCommand,
    MockPlaceQuery, MockSubscriptionCommand, MockSubscriptionQuery, MockUserAdminCommand,
};
use crate::domain::{ErrorKind, PlaceDetails};
use crate::test_support::fixtures::user_with_role;

/// Identity stub resolving a fixed user for any authenticated context.
struct StaticIdentity(Option<User>);

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self, context: &RequestContext) -> Result<Option<User>, Error> {
        Ok(context.user_id.as_ref().and(self.0.clone()))
    }
}

struct Mocks {
    user: Option<User>,
    entitlements: MockEntitlementQuery,
    user_admin: MockUserAdminCommand,
    places: MockPlaceCommand,
    places_query: MockPlaceQuery,
    subscriptions: MockSubscriptionCommand,
    subscriptions_query: MockSubscriptionQuery,
    advertisements: MockAdvertisementCommand,
    advertisements_query: MockAdvertisementQuery,
}

impl Mocks {
    fn new(user: Option<User>) -> Self {
        Self {
            user,
            entitlements: MockEntitlementQuery::new(),
            user_admin: MockUserAdminCommand::new(),
            places: MockPlaceCommand::new(),
            places_query: MockPlaceQuery::new(),
            subscriptions: MockSubscriptionCommand::new(),
            subscriptions_query: MockSubscriptionQuery::new(),
            advertisements: MockAdvertisementCommand::new(),
            advertisements_query: MockAdvertisementQuery::new(),
        }
    }

    fn resolving(mut self, role: Role) -> Self {
        self.entitlements
            .expect_resolve()
            .returning(move |_| Ok(Entitlement::for_role(role)));
        self
    }

    fn into_api(self) -> DirectoryApi {
        DirectoryApi::new(DirectoryPorts {
            identity: Arc::new(StaticIdentity(self.user)),
            entitlements: Arc::new(self.entitlements),
            user_admin: Arc::new(self.user_admin),
            places: Arc::new(self.places),
            places_query: Arc::new(self.places_query),
            subscriptions: Arc::new(self.subscriptions),
            subscriptions_query: Arc::new(self.subscriptions_query),
            advertisements: Arc::new(self.advertisements),
            advertisements_query: Arc::new(self.advertisements_query),
        })
    }
}

fn context_for(user: &User) -> RequestContext {
    RequestContext::for_user(user.id().clone())
}

fn sample_place(owner: &UserId) -> Place {
    let details =
        PlaceDetails::try_from(PlaceSubmission::new("Cafe X", "restaurant")).expect("valid");
    Place::submitted(Uuid::new_v4(), owner.clone(), details, chrono::Utc::now())
}

#[rstest]
#[tokio::test]
async fn anonymous_callers_cannot_submit_places() {
    let mut mocks = Mocks::new(None);
    mocks.places.expect_submit().times(0);
    let api = mocks.into_api();

    let envelope = api
        .submit_place(
            &RequestContext::anonymous(),
            PlaceSubmission::new("Cafe X", "restaurant"),
        )
        .await;
    assert_eq!(envelope.error_kind(), Some(ErrorKind::Auth));
}

#[rstest]
#[tokio::test]
async fn submission_is_owned_by_the_caller() {
    let alice = user_with_role("alice", Role::User);
    let owner = alice.id().clone();
    let mut mocks = Mocks::new(Some(alice.clone()));
    let expected_owner = owner.clone();
    mocks
        .places
        .expect_submit()
        .withf(move |owner, _| *owner == expected_owner)
        .times(1)
        .return_once(move |owner, _| Ok(sample_place(owner)));
    let api = mocks.into_api();

    let envelope = api
        .submit_place(
            &context_for(&alice),
            PlaceSubmission::new("Cafe X", "restaurant"),
        )
        .await;
    let place = envelope.into_result().expect("submission succeeds");
    assert_eq!(place.owner_id(), &owner);
}

#[rstest]
#[tokio::test]
async fn moderation_uses_freshly_resolved_entitlement() {
    let admin = user_with_role("root", Role::Admin);
    let mut mocks = Mocks::new(Some(admin.clone())).resolving(Role::Admin);
    let place = sample_place(&UserId::random());
    let place_id = place.id();
    mocks
        .places
        .expect_set_status()
        .withf(move |actor, id, status| {
            actor.entitlement.can_moderate && *id == place_id && *status == PlaceStatus::Approved
        })
        .times(1)
        .return_once(move |_, _, _| Ok(place));
    let api = mocks.into_api();

    let envelope = api
        .set_place_status(&context_for(&admin), place_id, PlaceStatus::Approved)
        .await;
    assert!(envelope.is_ok());
}

#[rstest]
#[tokio::test]
async fn anonymous_viewer_is_passed_as_none() {
    let mut mocks = Mocks::new(None);
    mocks.entitlements.expect_resolve().times(0);
    let place = sample_place(&UserId::random());
    let place_id = place.id();
    mocks
        .places_query
        .expect_get()
        .withf(move |id, viewer| *id == place_id && viewer.is_none())
        .times(1)
        .return_once(move |_, _| Ok(place));
    let api = mocks.into_api();

    let envelope = api.get_place(&RequestContext::anonymous(), place_id).await;
    assert!(envelope.is_ok());
}

#[rstest]
#[tokio::test]
async fn subscribe_forwards_idempotency_key() {
    let alice = user_with_role("alice", Role::User);
    let user_id = alice.id().clone();
    let key = IdempotencyKey::random();
    let expected_key = key.clone();
    let package_id = Uuid::new_v4();
    let mut mocks = Mocks::new(Some(alice.clone()));
    mocks
        .subscriptions
        .expect_subscribe()
        .withf(move |request| {
            request.user_id == user_id
                && request.package_id == package_id
                && request.idempotency_key.as_ref() == Some(&expected_key)
        })
        .times(1)
        .return_once(|_| Err(Error::conflict("user already has an active subscription")));
    let api = mocks.into_api();

    let envelope = api
        .subscribe(&context_for(&alice), package_id, Some(key))
        .await;
    assert_eq!(envelope.error_kind(), Some(ErrorKind::Conflict));
}

#[rstest]
#[tokio::test]
async fn internal_failures_are_redacted_on_the_wire() {
    let mut mocks = Mocks::new(None);
    mocks
        .advertisements_query
        .expect_list_active()
        .times(1)
        .return_once(|| Err(Error::internal("advertisement repository error: disk full")));
    let api = mocks.into_api();

    let envelope = api.list_advertisements().await;
    let value = serde_json::to_value(&envelope).expect("serialise");
    assert_eq!(
        value,
        json!({ "ok": false, "errorKind": "InternalError", "message": "Internal server error" })
    );
}

#[rstest]
#[tokio::test]
async fn entitlement_reflects_resolution() {
    let alice = user_with_role("alice", Role::User);
    let api = Mocks::new(Some(alice.clone()))
        .resolving(Role::Premium)
        .into_api();

    let entitlement = api
        .entitlement(&context_for(&alice))
        .await
        .into_result()
        .expect("resolved");
    assert_eq!(entitlement.effective_role, Role::Premium);
    assert!(entitlement.can_advertise);
}

#[rstest]
fn categories_are_listed_with_labels() {
    let api = Mocks::new(None).into_api();
    let categories = api.categories().into_result().expect("categories");
    assert!(!categories.is_empty());
    assert!(categories.iter().all(|option| !option.label.is_empty()));
}

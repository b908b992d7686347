//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, catalogue, identity) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented
//! by the domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod advertisement_command;
mod advertisement_query;
mod advertisement_repository;
mod entitlement_query;
mod idempotency_repository;
mod identity_provider;
mod package_catalogue;
mod place_command;
mod place_query;
mod place_repository;
mod subscription_command;
mod subscription_query;
mod subscription_repository;
mod user_admin_command;
mod user_repository;

#[cfg(test)]
pub use advertisement_command::MockAdvertisementCommand;
pub use advertisement_command::AdvertisementCommand;
#[cfg(test)]
pub use advertisement_query::MockAdvertisementQuery;
pub use advertisement_query::AdvertisementQuery;
#[cfg(test)]
pub use advertisement_repository::MockAdvertisementRepository;
pub use advertisement_repository::{AdvertisementRepository, AdvertisementRepositoryError};
#[cfg(test)]
pub use entitlement_query::MockEntitlementQuery;
pub use entitlement_query::EntitlementQuery;
#[cfg(test)]
pub use idempotency_repository::MockIdempotencyRepository;
pub use idempotency_repository::{
    FixtureIdempotencyRepository, IdempotencyRepository, IdempotencyRepositoryError,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, RequestContext};
#[cfg(test)]
pub use package_catalogue::MockPackageCatalogue;
pub use package_catalogue::{FixturePackageCatalogue, PackageCatalogue, PackageCatalogueError};
#[cfg(test)]
pub use place_command::MockPlaceCommand;
pub use place_command::PlaceCommand;
#[cfg(test)]
pub use place_query::MockPlaceQuery;
pub use place_query::PlaceQuery;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlaceRepository, PlaceRepositoryError};
#[cfg(test)]
pub use subscription_command::MockSubscriptionCommand;
pub use subscription_command::{SubscribeRequest, SubscribeResponse, SubscriptionCommand};
#[cfg(test)]
pub use subscription_query::MockSubscriptionQuery;
pub use subscription_query::SubscriptionQuery;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

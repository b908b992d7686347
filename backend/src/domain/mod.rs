//! Domain primitives, policy, and services.
//!
//! Purpose: own the entitlement and moderation rules of the directory.
//! Entities keep their invariants behind private fields; the services in
//! this module are the only writers of moderation and subscription state.
//!
//! Public surface:
//! - Error / ErrorKind: transport-agnostic failure with a stable kind.
//! - User, Role: identities and their stored base role.
//! - Place, Package, Subscription, Advertisement: the managed entities.
//! - Entitlement, resolve_entitlement: derived capabilities.
//! - PlaceService, SubscriptionService, AdvertisementService,
//!   EntitlementService: implementations of the driving ports.

pub mod advertisement;
mod advertisement_service;
pub mod entitlement;
mod entitlement_service;
pub mod error;
pub mod idempotency;
pub mod package;
pub mod place;
mod place_service;
pub mod ports;
pub mod subscription;
mod subscription_service;
pub mod user;

pub use self::advertisement::{
    Advertisement, AdvertisementDraft, AdvertisementPatch, AdvertisementValidationError,
    order_newest_first,
};
pub use self::advertisement_service::AdvertisementService;
pub use self::entitlement::{Actor, Entitlement, resolve_entitlement};
pub use self::entitlement_service::EntitlementService;
pub(crate) use self::entitlement_service::map_user_error;
pub use self::error::{Error, ErrorKind, ErrorValidationError};
pub use self::idempotency::{
    IdempotencyKey, IdempotencyKeyValidationError, IdempotencyLookupQuery,
    IdempotencyLookupResult, IdempotencyRecord, PayloadHash, PayloadHashError,
    canonicalize_and_hash,
};
pub use self::package::{
    MAX_PACKAGE_DURATION_DAYS, Package, PackageDraft, PackageValidationError,
};
pub use self::place::{
    CategoryOption, FeatureNotAllowed, ParsePlaceCategoryError, ParsePlaceStatusError, Place,
    PlaceCategory, PlaceDetails, PlaceDetailsPatch, PlaceFilter, PlaceStatus, PlaceSubmission,
    PlaceValidationError, category_options, order_for_display,
};
pub use self::place_service::PlaceService;
pub use self::subscription::{ActiveSelection, EndDateOverflow, Subscription, select_active};
pub use self::subscription_service::SubscriptionService;
pub use self::user::{ParseRoleError, Role, User, UserId, UserValidationError, Username};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use place_directory::domain::{DomainResult, Error};
///
/// fn deny() -> DomainResult<()> {
///     Err(Error::auth("nope"))
/// }
/// assert!(deny().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;

//! Entitlement resolution.
//!
//! An [`Entitlement`] is the capability set of a user at one instant. It is
//! derived from the stored [`Role`] and the user's subscriptions and never
//! written back: the stored role is a floor, and an active subscription can
//! only raise a plain `user` to `premium`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Role, Subscription, User, UserId};

/// Capabilities granted to a user at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    pub effective_role: Role,
    pub can_moderate: bool,
    pub can_advertise: bool,
    pub can_feature_own_places: bool,
}

impl Entitlement {
    /// Capabilities implied by an effective role.
    ///
    /// # Examples
    /// ```
    /// use place_directory::domain::{Entitlement, Role};
    ///
    /// let premium = Entitlement::for_role(Role::Premium);
    /// assert!(premium.can_advertise);
    /// assert!(!premium.can_moderate);
    /// ```
    pub fn for_role(effective_role: Role) -> Self {
        let (can_moderate, can_advertise) = match effective_role {
            Role::Admin => (true, true),
            Role::Premium => (false, true),
            Role::User => (false, false),
        };
        Self {
            effective_role,
            can_moderate,
            can_advertise,
            can_feature_own_places: can_moderate,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.effective_role == Role::Admin
    }
}

/// An authenticated caller together with the entitlement resolved for the
/// current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub entitlement: Entitlement,
}

impl Actor {
    pub fn new(id: UserId, entitlement: Entitlement) -> Self {
        Self { id, entitlement }
    }

    /// Whether the actor may act on a resource owned by `owner`.
    pub fn owns_or_administers(&self, owner: &UserId) -> bool {
        &self.id == owner || self.entitlement.is_admin()
    }
}

/// Derive the entitlement of `user` at `now`.
///
/// `subscriptions` must be freshly read; only rows belonging to `user` are
/// considered.
pub fn resolve_entitlement(
    user: &User,
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
) -> Entitlement {
    let has_active_subscription = subscriptions
        .iter()
        .any(|sub| sub.user_id() == user.id() && sub.is_active_at(now));
    let effective_role = match user.role() {
        Role::Admin => Role::Admin,
        Role::Premium => Role::Premium,
        Role::User if has_active_subscription => Role::Premium,
        Role::User => Role::User,
    };
    Entitlement::for_role(effective_role)
}

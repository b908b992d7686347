//! Paid subscriptions and their derived activeness.
//!
//! A subscription never stores an "active" flag. Activeness is recomputed
//! from the clock on every read (`now < end_date`), so there is no expiry
//! job and no drift between a stored flag and wall-clock time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Package, UserId};

/// The package duration carries the end date past the supported calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("subscription end date is outside the supported calendar range")]
pub struct EndDateOverflow;

/// A purchased package for one user. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    id: Uuid,
    user_id: UserId,
    package_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl Subscription {
    /// Start a subscription to `package` at `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use place_directory::domain::{Package, PackageDraft, Subscription, UserId};
    /// use uuid::Uuid;
    ///
    /// let package = Package::new(PackageDraft {
    ///     id: Uuid::new_v4(),
    ///     name: "Monthly".to_owned(),
    ///     description: String::new(),
    ///     price_cents: 1500,
    ///     duration_days: 30,
    /// })
    /// .expect("valid package");
    /// let now = Utc::now();
    /// let subscription = Subscription::start(Uuid::new_v4(), UserId::random(), &package, now)
    ///     .expect("end date in range");
    /// assert!(subscription.is_active_at(now + Duration::days(29)));
    /// assert!(!subscription.is_active_at(now + Duration::days(30)));
    /// ```
    pub fn start(
        id: Uuid,
        user_id: UserId,
        package: &Package,
        now: DateTime<Utc>,
    ) -> Result<Self, EndDateOverflow> {
        let end_date = now
            .checked_add_signed(Duration::days(i64::from(package.duration_days())))
            .ok_or(EndDateOverflow)?;
        Ok(Self {
            id,
            user_id,
            package_id: package.id(),
            start_date: now,
            end_date,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
    pub fn package_id(&self) -> Uuid {
        self.package_id
    }
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Whether the subscription window contains `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.end_date
    }
}

/// Outcome of scanning a user's subscriptions for the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelection<'a> {
    /// The most recently started active subscription, if any.
    pub active: Option<&'a Subscription>,
    /// How many subscriptions were active at the evaluation instant.
    pub active_count: usize,
}

impl ActiveSelection<'_> {
    /// More than one active row means the single-active invariant was broken.
    pub fn is_inconsistent(&self) -> bool {
        self.active_count > 1
    }
}

/// Pick the active subscription at `now`; the latest start wins a tie-break.
pub fn select_active(subscriptions: &[Subscription], now: DateTime<Utc>) -> ActiveSelection<'_> {
    let mut active_count = 0;
    let mut active: Option<&Subscription> = None;
    for subscription in subscriptions.iter().filter(|sub| sub.is_active_at(now)) {
        active_count += 1;
        if active.is_none_or(|current| subscription.start_date >= current.start_date) {
            active = Some(subscription);
        }
    }
    ActiveSelection {
        active,
        active_count,
    }
}

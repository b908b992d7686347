//! Place aggregate and its moderation rules.
//!
//! Purpose: model a user-submitted place together with the invariants the
//! Place Lifecycle Manager enforces:
//!
//! - A place is created in [`PlaceStatus::Pending`] and not featured.
//! - `is_featured` may only be `true` while the status is
//!   [`PlaceStatus::Approved`]; moving to any other status clears it.
//!
//! The mutators are crate-private so the lifecycle service stays the single
//! writer of `status` and `is_featured`.

mod category;
mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

pub use self::category::{CategoryOption, ParsePlaceCategoryError, PlaceCategory, category_options};
pub use self::status::{ParsePlaceStatusError, PlaceStatus};

/// Validation errors raised while building place details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceValidationError {
    /// `name` was missing or blank.
    #[error("place name must not be empty")]
    EmptyName,
    /// `category` was missing or blank.
    #[error("place category is required")]
    MissingCategory,
    /// `category` was not one of the known categories.
    #[error("unknown place category: {input}")]
    UnknownCategory { input: String },
    /// A stored snapshot was featured without being approved.
    #[error("a {status} place cannot be featured")]
    FeaturedWithoutApproval { status: PlaceStatus },
}

/// Raw submission fields as received from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceSubmission {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

impl PlaceSubmission {
    /// Start a submission with the two required fields.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of the descriptive fields of a place.
///
/// `None` leaves a field untouched. Status and the featured flag are not
/// editable through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceDetailsPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

/// Validated descriptive fields of a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    name: String,
    category: PlaceCategory,
    description: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    image_url: Option<String>,
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn validate_name(raw: &str) -> Result<String, PlaceValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlaceValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn parse_category(raw: &str) -> Result<PlaceCategory, PlaceValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlaceValidationError::MissingCategory);
    }
    trimmed
        .parse()
        .map_err(|_| PlaceValidationError::UnknownCategory {
            input: trimmed.to_owned(),
        })
}

impl PlaceDetails {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn category(&self) -> PlaceCategory {
        self.category
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Apply a patch, validating the replaced fields.
    ///
    /// Validation happens before any field is written so a failed patch
    /// leaves the details untouched.
    pub fn patched(&self, patch: PlaceDetailsPatch) -> Result<Self, PlaceValidationError> {
        let name = match patch.name {
            Some(raw) => validate_name(&raw)?,
            None => self.name.clone(),
        };
        let category = match patch.category {
            Some(raw) => parse_category(&raw)?,
            None => self.category,
        };
        let keep = |incoming: Option<String>, current: &Option<String>| match incoming {
            Some(value) => normalize_optional(Some(value)),
            None => current.clone(),
        };
        Ok(Self {
            name,
            category,
            description: keep(patch.description, &self.description),
            address: keep(patch.address, &self.address),
            phone: keep(patch.phone, &self.phone),
            website: keep(patch.website, &self.website),
            image_url: keep(patch.image_url, &self.image_url),
        })
    }
}

impl TryFrom<PlaceSubmission> for PlaceDetails {
    type Error = PlaceValidationError;

    fn try_from(value: PlaceSubmission) -> Result<Self, Self::Error> {
        let name = validate_name(&value.name)?;
        let category = parse_category(&value.category)?;
        Ok(Self {
            name,
            category,
            description: normalize_optional(value.description),
            address: normalize_optional(value.address),
            phone: normalize_optional(value.phone),
            website: normalize_optional(value.website),
            image_url: normalize_optional(value.image_url),
        })
    }
}

/// Rejected featured-flag change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("only approved places can be featured; place is {status}")]
pub struct FeatureNotAllowed {
    pub status: PlaceStatus,
}

/// A place listed in the directory.
///
/// ## Invariants
/// - `is_featured` implies `status == Approved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    id: Uuid,
    owner_id: UserId,
    #[serde(flatten)]
    details: PlaceDetails,
    status: PlaceStatus,
    is_featured: bool,
    created_at: DateTime<Utc>,
}

impl Place {
    /// Create a freshly submitted place: pending and not featured.
    pub fn submitted(
        id: Uuid,
        owner_id: UserId,
        details: PlaceDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            status: PlaceStatus::Pending,
            is_featured: false,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
    pub fn details(&self) -> &PlaceDetails {
        &self.details
    }
    pub fn name(&self) -> &str {
        self.details.name()
    }
    pub fn category(&self) -> PlaceCategory {
        self.details.category()
    }
    pub fn status(&self) -> PlaceStatus {
        self.status
    }
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the place shows up in public listings.
    pub fn is_visible(&self) -> bool {
        self.status == PlaceStatus::Approved
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Move to `status`, clearing the featured flag when leaving approval.
    pub(crate) fn transition_to(&mut self, status: PlaceStatus) {
        self.status = status;
        if !status.allows_featuring() {
            self.is_featured = false;
        }
    }

    /// Set or clear the featured flag.
    pub(crate) fn set_featured(&mut self, featured: bool) -> Result<(), FeatureNotAllowed> {
        if featured && !self.status.allows_featuring() {
            return Err(FeatureNotAllowed {
                status: self.status,
            });
        }
        self.is_featured = featured;
        Ok(())
    }

    pub(crate) fn replace_details(&mut self, details: PlaceDetails) {
        self.details = details;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceSnapshot {
    id: Uuid,
    owner_id: UserId,
    #[serde(flatten)]
    details: PlaceDetails,
    status: PlaceStatus,
    is_featured: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlaceSnapshot> for Place {
    type Error = PlaceValidationError;

    fn try_from(value: PlaceSnapshot) -> Result<Self, Self::Error> {
        if value.is_featured && !value.status.allows_featuring() {
            return Err(PlaceValidationError::FeaturedWithoutApproval {
                status: value.status,
            });
        }
        Ok(Self {
            id: value.id,
            owner_id: value.owner_id,
            details: value.details,
            status: value.status,
            is_featured: value.is_featured,
            created_at: value.created_at,
        })
    }
}

impl<'de> Deserialize<'de> for Place {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PlaceSnapshot::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Filter for public place listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceFilter {
    pub category: Option<PlaceCategory>,
    pub search_text: Option<String>,
    pub featured_only: bool,
}

impl PlaceFilter {
    /// Whether `place` satisfies the filter. Visibility is checked separately.
    pub fn matches(&self, place: &Place) -> bool {
        if self.category.is_some_and(|category| category != place.category()) {
            return false;
        }
        if self.featured_only && !place.is_featured() {
            return false;
        }
        match self.search_text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                let in_name = place.name().to_lowercase().contains(&needle);
                let in_description = place
                    .details()
                    .description()
                    .is_some_and(|text| text.to_lowercase().contains(&needle));
                in_name || in_description
            }
        }
    }
}

/// Order places for public display: featured first, then by creation time.
///
/// The sort is stable, so places created at the same instant keep their
/// insertion order.
pub fn order_for_display(places: &mut [Place]) {
    places.sort_by_key(|place| (!place.is_featured(), place.created_at()));
}

#[cfg(test)]
mod tests;

//! Subscription packages offered by the catalogue.
//!
//! Packages are managed outside this crate; the engine only reads them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest package a catalogue may offer: one hundred years of days.
pub const MAX_PACKAGE_DURATION_DAYS: u32 = 36_600;

/// Validation errors for [`Package`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageValidationError {
    #[error("package name must not be empty")]
    EmptyName,
    #[error("package duration must be at least one day")]
    ZeroDuration,
    #[error("package duration of {days} days exceeds the {max} day limit")]
    DurationTooLong { days: u32, max: u32 },
}

/// Input payload for [`Package::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PackageDraft {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in minor currency units.
    pub price_cents: u64,
    pub duration_days: u32,
}

/// Immutable catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    id: Uuid,
    name: String,
    description: String,
    price_cents: u64,
    duration_days: u32,
}

impl Package {
    /// Validate and construct a package.
    pub fn new(draft: PackageDraft) -> Result<Self, PackageValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }
}

impl TryFrom<PackageDraft> for Package {
    type Error = PackageValidationError;

    fn try_from(draft: PackageDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(PackageValidationError::EmptyName);
        }
        if draft.duration_days == 0 {
            return Err(PackageValidationError::ZeroDuration);
        }
        if draft.duration_days > MAX_PACKAGE_DURATION_DAYS {
            return Err(PackageValidationError::DurationTooLong {
                days: draft.duration_days,
                max: MAX_PACKAGE_DURATION_DAYS,
            });
        }
        Ok(Self {
            id: draft.id,
            name: name.to_owned(),
            description: draft.description.trim().to_owned(),
            price_cents: draft.price_cents,
            duration_days: draft.duration_days,
        })
    }
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PackageDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

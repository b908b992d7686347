//! Advertisement campaigns.
//!
//! An advertisement is active while `start_date <= now < end_date`. Like
//! subscriptions, activeness is derived on read and never stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors for advertisement input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvertisementValidationError {
    #[error("advertisement title must not be empty")]
    EmptyTitle,
    #[error("advertisement content must not be empty")]
    EmptyContent,
    #[error("advertisement must end after it starts ({start} >= {end})")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("default campaign length runs past the supported calendar from {start}")]
    DefaultEndOutOfRange { start: DateTime<Utc> },
}

/// Caller-supplied fields for a new advertisement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvertisementDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub place_id: Option<Uuid>,
    /// Defaults to the configured campaign length when omitted.
    pub end_date: Option<DateTime<Utc>>,
}

impl AdvertisementDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn linked_to(mut self, place_id: Uuid) -> Self {
        self.place_id = Some(place_id);
        self
    }

    #[must_use]
    pub fn ending_at(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Partial update of an advertisement. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvertisementPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub place_id: Option<Uuid>,
    /// Remove the place link. Ignored when `place_id` is also supplied.
    pub unlink_place: bool,
    pub end_date: Option<DateTime<Utc>>,
}

impl AdvertisementPatch {
    /// The place link the advertisement will carry once the patch applies.
    pub fn resulting_place_id(&self, current: Option<Uuid>) -> Option<Uuid> {
        match (self.place_id, self.unlink_place) {
            (Some(place_id), _) => Some(place_id),
            (None, true) => None,
            (None, false) => current,
        }
    }
}

fn required_text(
    raw: &str,
    empty: AdvertisementValidationError,
) -> Result<String, AdvertisementValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    Ok(trimmed.to_owned())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn check_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), AdvertisementValidationError> {
    if end <= start {
        return Err(AdvertisementValidationError::EndNotAfterStart { start, end });
    }
    Ok(())
}

/// A running or scheduled advertisement campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    id: Uuid,
    user_id: UserId,
    title: String,
    content: String,
    image_url: Option<String>,
    place_id: Option<Uuid>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl Advertisement {
    /// Validate `draft` and build an advertisement starting at `now`.
    ///
    /// Place ownership is checked by the caller; this only validates the
    /// fields and the campaign window.
    pub fn create(
        id: Uuid,
        user_id: UserId,
        draft: AdvertisementDraft,
        now: DateTime<Utc>,
        default_duration: Duration,
    ) -> Result<Self, AdvertisementValidationError> {
        let title = required_text(&draft.title, AdvertisementValidationError::EmptyTitle)?;
        let content = required_text(&draft.content, AdvertisementValidationError::EmptyContent)?;
        let end_date = match draft.end_date {
            Some(end_date) => end_date,
            None => now
                .checked_add_signed(default_duration)
                .ok_or(AdvertisementValidationError::DefaultEndOutOfRange { start: now })?,
        };
        check_window(now, end_date)?;
        Ok(Self {
            id,
            user_id,
            title,
            content,
            image_url: optional_text(draft.image_url),
            place_id: draft.place_id,
            start_date: now,
            end_date,
        })
    }

    /// Apply `patch`, returning the updated advertisement.
    ///
    /// Every field is validated before anything changes; `self` is never
    /// modified.
    pub fn patched(&self, patch: AdvertisementPatch) -> Result<Self, AdvertisementValidationError> {
        let place_id = patch.resulting_place_id(self.place_id);
        let title = match patch.title {
            Some(raw) => required_text(&raw, AdvertisementValidationError::EmptyTitle)?,
            None => self.title.clone(),
        };
        let content = match patch.content {
            Some(raw) => required_text(&raw, AdvertisementValidationError::EmptyContent)?,
            None => self.content.clone(),
        };
        let end_date = patch.end_date.unwrap_or(self.end_date);
        check_window(self.start_date, end_date)?;
        let image_url = match patch.image_url {
            Some(raw) => optional_text(Some(raw)),
            None => self.image_url.clone(),
        };
        Ok(Self {
            id: self.id,
            user_id: self.user_id.clone(),
            title,
            content,
            image_url,
            place_id,
            start_date: self.start_date,
            end_date,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
    pub fn place_id(&self) -> Option<Uuid> {
        self.place_id
    }
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now < self.end_date
    }
}

/// Sort newest campaigns first.
pub fn order_newest_first(ads: &mut [Advertisement]) {
    ads.sort_by(|left, right| right.start_date.cmp(&left.start_date));
}

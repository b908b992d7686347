//! Moderation status of a place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Moderation state. New submissions start in [`PlaceStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PlaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a place in this state may carry the featured flag.
    pub fn allows_featuring(&self) -> bool {
        match self {
            Self::Approved => true,
            Self::Pending | Self::Rejected => false,
        }
    }
}

impl fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`PlaceStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid place status: {input}")]
pub struct ParsePlaceStatusError {
    pub input: String,
}

impl FromStr for PlaceStatus {
    type Err = ParsePlaceStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParsePlaceStatusError {
                input: value.to_owned(),
            }),
        }
    }
}

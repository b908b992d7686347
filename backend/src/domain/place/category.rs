//! Closed set of place categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category a place is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Entertainment,
    Pharmacy,
    Hotel,
    Shopping,
    Hospital,
    GasStation,
    Bank,
    Other,
}

impl PlaceCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 9] = [
        Self::Restaurant,
        Self::Entertainment,
        Self::Pharmacy,
        Self::Hotel,
        Self::Shopping,
        Self::Hospital,
        Self::GasStation,
        Self::Bank,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Entertainment => "entertainment",
            Self::Pharmacy => "pharmacy",
            Self::Hotel => "hotel",
            Self::Shopping => "shopping",
            Self::Hospital => "hospital",
            Self::GasStation => "gas_station",
            Self::Bank => "bank",
            Self::Other => "other",
        }
    }

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::Entertainment => "Entertainment",
            Self::Pharmacy => "Pharmacy",
            Self::Hotel => "Hotel",
            Self::Shopping => "Shopping",
            Self::Hospital => "Hospital",
            Self::GasStation => "Gas station",
            Self::Bank => "Bank",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`PlaceCategory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid place category: {input}")]
pub struct ParsePlaceCategoryError {
    pub input: String,
}

impl FromStr for PlaceCategory {
    type Err = ParsePlaceCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParsePlaceCategoryError {
                input: value.to_owned(),
            })
    }
}

/// Category entry exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: PlaceCategory,
    pub label: &'static str,
}

/// List every category with its display label.
pub fn category_options() -> Vec<CategoryOption> {
    PlaceCategory::ALL
        .into_iter()
        .map(|value| CategoryOption {
            value,
            label: value.label(),
        })
        .collect()
}

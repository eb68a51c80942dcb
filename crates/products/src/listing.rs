//! Listing enumerations: status lifecycle, listing tier, item condition.

use serde::{Deserialize, Serialize};

/// Product status lifecycle.
///
/// No transition rules are enforced: any status can be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Paused,
    Closed,
    Inactive,
}

/// Listing exposure tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    Free,
    Bronze,
    Silver,
    Gold,
    GoldSpecial,
    GoldPremium,
    GoldPro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCondition {
    New,
    Used,
    NotSpecified,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Paused => "PAUSED",
            ProductStatus::Closed => "CLOSED",
            ProductStatus::Inactive => "INACTIVE",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

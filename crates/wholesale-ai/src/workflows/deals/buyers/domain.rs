use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::deals::domain::deserialize_amount;

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuyerId(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyerStatus {
    #[default]
    Active,
    Inactive,
}

/// Intake payload from the buyer wizard. Name and email are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuyer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub max_budget: f64,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: BuyerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: BuyerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub max_budget: f64,
    pub preferences: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub status: BuyerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Buyer {
    /// Case-insensitive match on name, email or location. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self
                .location
                .as_deref()
                .is_some_and(|location| location.to_lowercase().contains(&needle))
    }
}

/// Roster ordering offered by the buyers view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyerSort {
    /// Alphabetical, ignoring case.
    #[default]
    Name,
    /// Largest budget first.
    Budget,
    /// Newest first.
    Created,
}

impl BuyerSort {
    pub fn compare(self, a: &Buyer, b: &Buyer) -> Ordering {
        let primary = match self {
            BuyerSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            BuyerSort::Budget => b.max_budget.total_cmp(&a.max_budget),
            BuyerSort::Created => b.created_at.cmp(&a.created_at),
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::deals::domain::{DealAnalysisResult, DealRating, PropertyRecord};

/// Identifier wrapper for stored deals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DealId(pub String);

/// Listing status tracked on each deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    #[default]
    Active,
    Pending,
    Sold,
}

impl DealStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DealStatus::Active => "active",
            DealStatus::Pending => "pending",
            DealStatus::Sold => "sold",
        }
    }
}

/// Intake payload for a new deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: DealStatus,
    pub property_data: PropertyRecord,
}

/// Stored deal with the analysis captured at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub id: DealId,
    pub title: String,
    pub property: PropertyRecord,
    pub status: DealStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub analysis: DealAnalysisResult,
}

impl DealRecord {
    /// Spread between ARV and asking price; negative when the property is overpriced.
    pub fn potential_profit(&self) -> f64 {
        self.property.arv - self.property.asking_price
    }

    /// Case-insensitive match on address or city. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.property.address.to_lowercase().contains(&needle)
            || self.property.city.to_lowercase().contains(&needle)
    }

    pub fn summary_view(&self) -> DealSummaryView {
        DealSummaryView {
            id: self.id.clone(),
            title: self.title.clone(),
            address: self.property.address.clone(),
            city: self.property.city.clone(),
            state: self.property.state.clone(),
            price: self.property.asking_price,
            arv: self.property.arv,
            status: self.status,
            score: self.analysis.score,
            rating: self.analysis.rating,
            potential_profit: self.potential_profit(),
            created_at: self.created_at,
        }
    }
}

/// Flattened row for list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSummaryView {
    pub id: DealId,
    pub title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub price: f64,
    pub arv: f64,
    pub status: DealStatus,
    pub score: u8,
    pub rating: DealRating,
    pub potential_profit: f64,
    pub created_at: DateTime<Utc>,
}

/// Headline numbers for the deals overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealStatistics {
    pub total_deals: usize,
    pub active_listings: usize,
    pub total_potential_profit: f64,
}

impl DealStatistics {
    pub fn from_deals(deals: &[DealRecord]) -> Self {
        Self {
            total_deals: deals.len(),
            active_listings: deals
                .iter()
                .filter(|deal| deal.status == DealStatus::Active)
                .count(),
            total_potential_profit: deals.iter().map(DealRecord::potential_profit).sum(),
        }
    }
}

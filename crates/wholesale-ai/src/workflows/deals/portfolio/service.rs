use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{DealId, DealRecord, DealStatistics, DealStatus, NewDeal};
use super::repository::{DealRepository, RepositoryError};
use crate::workflows::deals::scoring::DealScorer;

/// Service composing the deal repository with the local scorer.
pub struct DealService<R> {
    repository: Arc<R>,
    scorer: Arc<DealScorer>,
}

static DEAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_deal_id() -> DealId {
    let id = DEAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DealId(format!("deal-{id:06}"))
}

impl<R> DealService<R>
where
    R: DealRepository + 'static,
{
    pub fn new(repository: Arc<R>, scorer: DealScorer) -> Self {
        Self {
            repository,
            scorer: Arc::new(scorer),
        }
    }

    /// Validate, score and store a new deal.
    pub fn create(&self, new_deal: NewDeal) -> Result<DealRecord, DealServiceError> {
        let NewDeal {
            title,
            status,
            property_data,
        } = new_deal;

        let address = property_data.address.trim();
        if address.is_empty() {
            return Err(DealServiceError::MissingAddress);
        }

        let title = title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| address.to_string());

        let analysis = self.scorer.evaluate(&property_data);
        let now = Utc::now();
        let record = DealRecord {
            id: next_deal_id(),
            title,
            property: property_data,
            status,
            created_at: now,
            updated_at: now,
            analysis,
        };

        let stored = self.repository.insert(record)?;
        info!(
            deal_id = %stored.id.0,
            score = stored.analysis.score,
            rating = %stored.analysis.rating,
            "deal created"
        );
        Ok(stored)
    }

    /// Deals newest first, filtered by address or city.
    pub fn list(&self, search: Option<&str>) -> Result<Vec<DealRecord>, DealServiceError> {
        let mut deals = self.repository.list()?;
        if let Some(term) = search {
            deals.retain(|deal| deal.matches_search(term));
        }
        deals.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(deals)
    }

    pub fn get(&self, id: &DealId) -> Result<DealRecord, DealServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update_status(
        &self,
        id: &DealId,
        status: DealStatus,
    ) -> Result<DealRecord, DealServiceError> {
        let mut record = self.get(id)?;
        record.status = status;
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        info!(deal_id = %id.0, status = status.label(), "deal status updated");
        Ok(record)
    }

    pub fn statistics(&self) -> Result<DealStatistics, DealServiceError> {
        let deals = self.repository.list()?;
        Ok(DealStatistics::from_deals(&deals))
    }
}

/// Error raised by the deal service.
#[derive(Debug, thiserror::Error)]
pub enum DealServiceError {
    #[error("property address is required")]
    MissingAddress,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Buyer, BuyerId, BuyerSort, NewBuyer};
use super::repository::BuyerRepository;
use crate::workflows::deals::portfolio::RepositoryError;

pub struct BuyerService<R> {
    repository: Arc<R>,
}

static BUYER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_buyer_id() -> BuyerId {
    let id = BUYER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BuyerId(format!("buyer-{id:06}"))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl<R> BuyerService<R>
where
    R: BuyerRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create(&self, new_buyer: NewBuyer) -> Result<Buyer, BuyerServiceError> {
        let name = new_buyer.name.trim().to_string();
        if name.is_empty() {
            return Err(BuyerServiceError::MissingName);
        }
        let email = new_buyer.email.trim().to_string();
        if email.is_empty() {
            return Err(BuyerServiceError::MissingEmail);
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in new_buyer.tags {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let now = Utc::now();
        let buyer = Buyer {
            id: next_buyer_id(),
            name,
            email,
            phone: optional_text(new_buyer.phone),
            location: optional_text(new_buyer.location),
            max_budget: new_buyer.max_budget,
            preferences: optional_text(new_buyer.preferences),
            notes: optional_text(new_buyer.notes),
            tags,
            status: new_buyer.status,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(buyer)?;
        info!(buyer_id = %stored.id.0, "buyer added to roster");
        Ok(stored)
    }

    pub fn list(
        &self,
        search: Option<&str>,
        sort: BuyerSort,
    ) -> Result<Vec<Buyer>, BuyerServiceError> {
        let mut buyers = self.repository.list()?;
        if let Some(term) = search {
            buyers.retain(|buyer| buyer.matches_search(term));
        }
        buyers.sort_by(|a, b| sort.compare(a, b));
        Ok(buyers)
    }

    pub fn get(&self, id: &BuyerId) -> Result<Buyer, BuyerServiceError> {
        let buyer = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(buyer)
    }

    pub fn delete(&self, id: &BuyerId) -> Result<(), BuyerServiceError> {
        self.repository.delete(id)?;
        info!(buyer_id = %id.0, "buyer removed from roster");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuyerServiceError {
    #[error("buyer name is required")]
    MissingName,
    #[error("buyer email is required")]
    MissingEmail,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

use super::domain::{Buyer, BuyerId};
use crate::workflows::deals::portfolio::RepositoryError;

/// Storage abstraction over the hosted buyers table.
pub trait BuyerRepository: Send + Sync {
    fn insert(&self, buyer: Buyer) -> Result<Buyer, RepositoryError>;
    fn fetch(&self, id: &BuyerId) -> Result<Option<Buyer>, RepositoryError>;
    fn list(&self) -> Result<Vec<Buyer>, RepositoryError>;
    /// Remove a buyer; `NotFound` when the id is unknown.
    fn delete(&self, id: &BuyerId) -> Result<(), RepositoryError>;
}

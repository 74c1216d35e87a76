//! Deal portfolio: intake, scoring on creation, search and headline statistics.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{DealId, DealRecord, DealStatistics, DealStatus, DealSummaryView, NewDeal};
pub use repository::{DealRepository, RepositoryError};
pub use router::deal_router;
pub use service::{DealService, DealServiceError};

//! Buyer roster: contact intake, search, sorting and removal.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Buyer, BuyerId, BuyerSort, BuyerStatus, NewBuyer};
pub use repository::BuyerRepository;
pub use router::buyer_router;
pub use service::{BuyerService, BuyerServiceError};

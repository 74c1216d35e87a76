use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::deals::analysis::{
    AnalysisGateway, AnalysisRequest, RemoteAnalysisError, ResultResolver,
};
use crate::workflows::deals::buyers::{Buyer, BuyerId, BuyerRepository, BuyerService, NewBuyer};
use crate::workflows::deals::domain::PropertyRecord;
use crate::workflows::deals::portfolio::{
    DealId, DealRecord, DealRepository, DealService, NewDeal, RepositoryError,
};
use crate::workflows::deals::scoring::DealScorer;

/// Asking 250k against a 350k ARV (28.6% spread), nothing else known.
pub(super) fn good_spread_record() -> PropertyRecord {
    PropertyRecord {
        address: "1418 Maple Ave".to_string(),
        city: "Des Moines".to_string(),
        state: "IA".to_string(),
        asking_price: 250_000.0,
        arv: 350_000.0,
        ..PropertyRecord::default()
    }
}

/// Priced above the MAO the intake wizard suggests from ARV.
pub(super) fn over_mao_record() -> PropertyRecord {
    PropertyRecord {
        address: "77 Grand Blvd".to_string(),
        city: "West Des Moines".to_string(),
        state: "IA".to_string(),
        asking_price: 220_000.0,
        arv: 314_286.0,
        mao: 195_000.0,
        ..PropertyRecord::default()
    }
}

/// Asking within 2% of ARV.
pub(super) fn tight_margin_record() -> PropertyRecord {
    PropertyRecord {
        address: "5 Birch Ct".to_string(),
        city: "Ankeny".to_string(),
        state: "IA".to_string(),
        asking_price: 300_000.0,
        arv: 305_000.0,
        ..PropertyRecord::default()
    }
}

pub(super) fn remote_deal_body() -> String {
    r#"{
        "score": 88,
        "rating": "Excellent",
        "confidence": 91,
        "factors": [
            {
                "factor": "Neighborhood",
                "impact": "positive",
                "description": "Rising comps within half a mile"
            },
            {"factor": "Roof", "impact": "negative", "description": "Roof nearing end of life"}
        ],
        "recommendation": "Lock it up before the weekend."
    }"#
    .to_string()
}

/// Gateway that replays a fixed response and records what it was asked.
pub(super) struct ScriptedGateway {
    response: Result<String, RemoteAnalysisError>,
    delay: Option<Duration>,
    pub(super) requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedGateway {
    pub(super) fn responding(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(error: RemoteAnalysisError) -> Self {
        Self {
            response: Err(error),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn request_count(&self) -> usize {
        self.requests.lock().expect("requests mutex poisoned").len()
    }
}

#[async_trait]
impl AnalysisGateway for ScriptedGateway {
    async fn invoke(&self, request: &AnalysisRequest) -> Result<String, RemoteAnalysisError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

pub(super) fn resolver_with(
    gateway: ScriptedGateway,
) -> (ResultResolver<ScriptedGateway>, Arc<ScriptedGateway>) {
    let gateway = Arc::new(gateway);
    let resolver = ResultResolver::new(
        gateway.clone(),
        DealScorer::default(),
        Duration::from_secs(5),
    );
    (resolver, gateway)
}

pub(super) fn network_error() -> RemoteAnalysisError {
    RemoteAnalysisError::Transport("connection reset by peer".to_string())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<DealId, DealRecord>>>,
}

impl DealRepository for MemoryRepository {
    fn insert(&self, record: DealRecord) -> Result<DealRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: DealRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &DealId) -> Result<Option<DealRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<DealRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl DealRepository for UnavailableRepository {
    fn insert(&self, _record: DealRecord) -> Result<DealRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: DealRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DealId) -> Result<Option<DealRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<DealRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl BuyerRepository for UnavailableRepository {
    fn insert(&self, _buyer: Buyer) -> Result<Buyer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BuyerId) -> Result<Option<Buyer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Buyer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &BuyerId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBuyerRepository {
    pub(super) buyers: Arc<Mutex<HashMap<BuyerId, Buyer>>>,
}

impl BuyerRepository for MemoryBuyerRepository {
    fn insert(&self, buyer: Buyer) -> Result<Buyer, RepositoryError> {
        let mut guard = self.buyers.lock().expect("buyer mutex poisoned");
        if guard.contains_key(&buyer.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(buyer.id.clone(), buyer.clone());
        Ok(buyer)
    }

    fn fetch(&self, id: &BuyerId) -> Result<Option<Buyer>, RepositoryError> {
        let guard = self.buyers.lock().expect("buyer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Buyer>, RepositoryError> {
        let guard = self.buyers.lock().expect("buyer mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete(&self, id: &BuyerId) -> Result<(), RepositoryError> {
        let mut guard = self.buyers.lock().expect("buyer mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) fn build_buyer_service() -> (
    BuyerService<MemoryBuyerRepository>,
    Arc<MemoryBuyerRepository>,
) {
    let repository = Arc::new(MemoryBuyerRepository::default());
    let service = BuyerService::new(repository.clone());
    (service, repository)
}

/// Cash buyer from the intake wizard with a budget and a target area.
pub(super) fn cash_buyer(name: &str, email: &str, max_budget: f64) -> NewBuyer {
    NewBuyer {
        name: name.to_string(),
        email: email.to_string(),
        location: Some("Des Moines, IA".to_string()),
        max_budget,
        ..NewBuyer::default()
    }
}

pub(super) fn build_service() -> (DealService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = DealService::new(repository.clone(), DealScorer::default());
    (service, repository)
}

pub(super) fn new_deal(record: PropertyRecord) -> NewDeal {
    NewDeal {
        title: None,
        status: Default::default(),
        property_data: record,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use clap::{Args, ValueEnum};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wholesale_ai::config::AnalysisConfig;
use wholesale_ai::workflows::deals::buyers::{Buyer, BuyerId, BuyerRepository};
use wholesale_ai::workflows::deals::portfolio::{
    DealId, DealRecord, DealRepository, RepositoryError,
};
use wholesale_ai::workflows::deals::{
    parse_amount, DealRating, DealScorer, MaoFormula, PropertyRecord, ScoringConfig,
    DEFAULT_HOLDING_COST,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDealRepository {
    records: Arc<Mutex<HashMap<DealId, DealRecord>>>,
}

impl DealRepository for InMemoryDealRepository {
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
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryBuyerRepository {
    buyers: Arc<Mutex<HashMap<BuyerId, Buyer>>>,
}

impl BuyerRepository for InMemoryBuyerRepository {
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
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(crate) fn scorer_from_config(config: &AnalysisConfig) -> DealScorer {
    DealScorer::new(ScoringConfig {
        confidence: config.scoring_confidence,
    })
}

pub(crate) fn parse_amount_arg(raw: &str) -> Result<f64, String> {
    Ok(parse_amount(raw))
}

/// Property fields accepted on the command line. Amounts tolerate `$` and `,`.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct PropertyArgs {
    #[arg(long, default_value = "")]
    pub(crate) address: String,
    #[arg(long, default_value = "")]
    pub(crate) city: String,
    #[arg(long, default_value = "")]
    pub(crate) state: String,
    /// Asking price
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) price: Option<f64>,
    /// After-repair value
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) arv: Option<f64>,
    /// Maximum allowable offer, if already known
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) mao: Option<f64>,
    /// Living area in square feet
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) sqft: Option<f64>,
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) repairs: Option<f64>,
    /// Holding costs (defaults to 5000)
    #[arg(long, value_parser = parse_amount_arg)]
    pub(crate) holding: Option<f64>,
}

impl PropertyArgs {
    pub(crate) fn into_record(self) -> PropertyRecord {
        PropertyRecord {
            address: self.address,
            city: self.city,
            state: self.state,
            asking_price: self.price.unwrap_or(0.0),
            arv: self.arv.unwrap_or(0.0),
            mao: self.mao.unwrap_or(0.0),
            square_feet: self.sqft.unwrap_or(0.0),
            repair_cost_estimate: self.repairs.unwrap_or(0.0),
            holding_cost_estimate: self
                .holding
                .filter(|holding| *holding > 0.0)
                .unwrap_or(DEFAULT_HOLDING_COST),
            ..PropertyRecord::default()
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FormulaArg {
    /// ARV x 0.7 - repairs
    #[default]
    SeventyPercent,
    /// ARV x 0.7 - repairs - holding, floored at zero
    WithHolding,
}

impl From<FormulaArg> for MaoFormula {
    fn from(value: FormulaArg) -> Self {
        match value {
            FormulaArg::SeventyPercent => MaoFormula::SeventyPercent,
            FormulaArg::WithHolding => MaoFormula::SeventyPercentWithHolding,
        }
    }
}

/// One scored CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BatchRow {
    pub(crate) row: usize,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) score: u8,
    pub(crate) rating: DealRating,
    pub(crate) recommendation: String,
}

pub(crate) fn score_records(scorer: &DealScorer, records: &[PropertyRecord]) -> Vec<BatchRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let result = scorer.evaluate(record);
            BatchRow {
                row: index + 1,
                address: record.address.clone(),
                city: record.city.clone(),
                score: result.score,
                rating: result.rating,
                recommendation: result.recommendation,
            }
        })
        .collect()
}

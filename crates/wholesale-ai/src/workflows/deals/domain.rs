use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Holding cost assumed when the intake form leaves the field blank.
pub const DEFAULT_HOLDING_COST: f64 = 5_000.0;

/// Property snapshot captured by the intake wizard and evaluated once per request.
///
/// Monetary and area fields use `0.0` for "not provided". The wire shape matches the
/// payload the remote analysis function expects (`price`, `sqft`, `yearBuilt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub city: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub state: String,
    #[serde(
        rename = "price",
        alias = "askingPrice",
        default,
        deserialize_with = "deserialize_amount"
    )]
    pub asking_price: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub arv: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub mao: f64,
    #[serde(
        rename = "sqft",
        alias = "squareFeet",
        default,
        deserialize_with = "deserialize_amount"
    )]
    pub square_feet: f64,
    #[serde(
        rename = "repairCosts",
        alias = "repairCostEstimate",
        default,
        deserialize_with = "deserialize_amount"
    )]
    pub repair_cost_estimate: f64,
    #[serde(
        rename = "holdingCosts",
        alias = "holdingCostEstimate",
        default = "default_holding_cost",
        deserialize_with = "deserialize_holding_cost"
    )]
    pub holding_cost_estimate: f64,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub bedrooms: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub bathrooms: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub year_built: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub lot_size: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            address: String::new(),
            city: String::new(),
            state: String::new(),
            asking_price: 0.0,
            arv: 0.0,
            mao: 0.0,
            square_feet: 0.0,
            repair_cost_estimate: 0.0,
            holding_cost_estimate: DEFAULT_HOLDING_COST,
            bedrooms: String::new(),
            bathrooms: String::new(),
            year_built: String::new(),
            lot_size: String::new(),
            description: String::new(),
        }
    }
}

impl PropertyRecord {
    pub fn asking_price(&self) -> Option<f64> {
        provided(self.asking_price)
    }

    pub fn arv(&self) -> Option<f64> {
        provided(self.arv)
    }

    pub fn mao(&self) -> Option<f64> {
        provided(self.mao)
    }

    pub fn square_feet(&self) -> Option<f64> {
        provided(self.square_feet)
    }

    pub fn repair_costs(&self) -> f64 {
        provided(self.repair_cost_estimate).unwrap_or(0.0)
    }

    pub fn holding_costs(&self) -> f64 {
        provided(self.holding_cost_estimate).unwrap_or(DEFAULT_HOLDING_COST)
    }
}

/// A value only counts as provided when it is a finite, strictly positive amount.
pub(crate) fn provided(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Lenient amount parsing used for form and CSV input: `"$250,000"` reads as `250000`,
/// anything that is not a finite non-negative number reads as `0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',' && *ch != '_')
        .collect();

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

fn amount_from_value(value: Option<Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(0.0),
        Some(Value::String(raw)) => parse_amount(&raw),
        _ => 0.0,
    }
}

pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(amount_from_value(value))
}

fn deserialize_holding_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(provided(amount_from_value(value)).unwrap_or(DEFAULT_HOLDING_COST))
}

fn default_holding_cost() -> f64 {
    DEFAULT_HOLDING_COST
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    })
}

/// Direction a factor pushed the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

/// One piece of evidence behind a deal score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    #[serde(rename = "factor", alias = "name")]
    pub name: String,
    pub impact: FactorImpact,
    pub description: String,
}

impl Factor {
    pub fn new(name: &str, impact: FactorImpact, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            impact,
            description: description.into(),
        }
    }
}

/// Four-tier rating derived from the clamped deal score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DealRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl DealRating {
    pub const fn label(self) -> &'static str {
        match self {
            DealRating::Poor => "Poor",
            DealRating::Fair => "Fair",
            DealRating::Good => "Good",
            DealRating::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for DealRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analysis handed to callers, identical in shape whether computed locally or remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysisResult {
    pub score: u8,
    pub rating: DealRating,
    pub confidence: f64,
    pub factors: Vec<Factor>,
    pub recommendation: String,
}

impl DealAnalysisResult {
    /// First `limit` factors in evaluation order.
    pub fn top_factors(&self, limit: usize) -> &[Factor] {
        &self.factors[..self.factors.len().min(limit)]
    }
}

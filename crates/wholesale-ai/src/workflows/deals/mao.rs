//! Maximum Allowable Offer calculations under the 70% rule.
//!
//! Intake and the standalone analyzer disagree on which costs come out of the 70%
//! figure, so both formulas are kept and the caller names the one it wants.

use serde::{Deserialize, Serialize};

use super::domain::{provided, PropertyRecord};

pub const SEVENTY_PERCENT_RULE: f64 = 0.7;

/// Repair allowance the intake form assumes when it fills in MAO for the user.
pub const INTAKE_REPAIR_ALLOWANCE: f64 = 25_000.0;

/// Appreciation applied by the analyzer when it has to estimate ARV itself.
pub const ARV_MARKET_MULTIPLIER: f64 = 1.15;

/// Slack above MAO the analyzer still treats as negotiable.
const NEGOTIATION_MARGIN: f64 = 1.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaoFormula {
    /// `arv * 0.7 - repairs`, not floored.
    #[default]
    SeventyPercent,
    /// `max(0, round(arv * 0.7 - repairs - holding))`, with profit potential.
    SeventyPercentWithHolding,
}

/// Quick buy/pass call the analyzer makes from asking price against MAO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferVerdict {
    StrongBuy,
    Consider,
    Pass,
}

impl OfferVerdict {
    pub const fn score(self) -> u8 {
        match self {
            OfferVerdict::StrongBuy => 85,
            OfferVerdict::Consider => 70,
            OfferVerdict::Pass => 45,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OfferVerdict::StrongBuy => "Strong Buy",
            OfferVerdict::Consider => "Consider",
            OfferVerdict::Pass => "Pass",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaoEstimate {
    pub formula: MaoFormula,
    pub mao: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_potential: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<OfferVerdict>,
}

pub fn compute_mao(record: &PropertyRecord, formula: MaoFormula) -> MaoEstimate {
    let arv = record.arv().unwrap_or(0.0);
    let repairs = record.repair_costs();

    match formula {
        MaoFormula::SeventyPercent => MaoEstimate {
            formula,
            mao: arv * SEVENTY_PERCENT_RULE - repairs,
            profit_potential: None,
            verdict: None,
        },
        MaoFormula::SeventyPercentWithHolding => {
            let mao = (arv * SEVENTY_PERCENT_RULE - repairs - record.holding_costs())
                .round()
                .max(0.0);
            let price = record.asking_price();
            MaoEstimate {
                formula,
                mao,
                profit_potential: Some(arv - price.unwrap_or(0.0) - repairs),
                verdict: price.map(|price| offer_verdict(price, mao)),
            }
        }
    }
}

/// MAO the intake wizard suggests from ARV alone, using the fixed repair allowance.
pub fn intake_mao(arv: f64) -> Option<f64> {
    provided(arv).map(|arv| arv * SEVENTY_PERCENT_RULE - INTAKE_REPAIR_ALLOWANCE)
}

pub fn offer_verdict(asking_price: f64, mao: f64) -> OfferVerdict {
    if asking_price <= mao {
        OfferVerdict::StrongBuy
    } else if asking_price <= mao * NEGOTIATION_MARGIN {
        OfferVerdict::Consider
    } else {
        OfferVerdict::Pass
    }
}

/// ARV guess from price per square foot and a flat market multiplier. `0.0` when
/// either input is missing.
pub fn estimate_arv(asking_price: f64, square_feet: f64) -> f64 {
    match (provided(asking_price), provided(square_feet)) {
        (Some(price), Some(sqft)) => (price / sqft * ARV_MARKET_MULTIPLIER * sqft).round(),
        _ => 0.0,
    }
}

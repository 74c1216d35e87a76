use super::super::domain::{Factor, FactorImpact, PropertyRecord};

const PRICE_SPREAD: &str = "Price Spread";
const MAO_ANALYSIS: &str = "MAO Analysis";
const PRICE_PER_SQFT: &str = "Price per Sq Ft";

/// Largest deduction an asking price above MAO can cost.
const MAX_MAO_PENALTY: f64 = 25.0;

/// Factor plus the signed score adjustment it carries.
pub(crate) struct Adjustment {
    pub factor: Factor,
    pub delta: f64,
}

/// Runs every rule in evaluation order, returning the emitted factors and the raw
/// (unclamped) sum of their adjustments.
pub(crate) fn score_property(record: &PropertyRecord) -> (Vec<Factor>, f64) {
    let adjustments = [
        price_spread(record),
        mao_comparison(record),
        price_per_square_foot(record),
    ];

    let mut factors = Vec::new();
    let mut total = 0.0;
    for adjustment in adjustments.into_iter().flatten() {
        total += adjustment.delta;
        factors.push(adjustment.factor);
    }

    (factors, total)
}

pub(crate) fn price_spread(record: &PropertyRecord) -> Option<Adjustment> {
    let arv = record.arv()?;
    let price = record.asking_price()?;
    let spread_percent = (arv - price) / arv * 100.0;

    // 10% through 20% emits nothing.
    if spread_percent > 30.0 {
        Some(Adjustment {
            factor: Factor::new(
                PRICE_SPREAD,
                FactorImpact::Positive,
                format!("Excellent spread of {spread_percent:.1}% between price and ARV"),
            ),
            delta: 25.0,
        })
    } else if spread_percent > 20.0 {
        Some(Adjustment {
            factor: Factor::new(
                PRICE_SPREAD,
                FactorImpact::Positive,
                format!("Good spread of {spread_percent:.1}% between price and ARV"),
            ),
            delta: 15.0,
        })
    } else if spread_percent < 10.0 {
        Some(Adjustment {
            factor: Factor::new(
                PRICE_SPREAD,
                FactorImpact::Negative,
                format!("Tight margins with only {spread_percent:.1}% spread"),
            ),
            delta: -20.0,
        })
    } else {
        None
    }
}

pub(crate) fn mao_comparison(record: &PropertyRecord) -> Option<Adjustment> {
    let mao = record.mao()?;
    let price = record.asking_price()?;

    if price <= mao {
        return Some(Adjustment {
            factor: Factor::new(
                MAO_ANALYSIS,
                FactorImpact::Positive,
                "Asking price is within Maximum Allowable Offer",
            ),
            delta: 20.0,
        });
    }

    let overage = (price - mao) / mao * 100.0;
    Some(Adjustment {
        factor: Factor::new(
            MAO_ANALYSIS,
            FactorImpact::Negative,
            format!("Asking price exceeds MAO by {overage:.1}%"),
        ),
        delta: -overage.min(MAX_MAO_PENALTY),
    })
}

pub(crate) fn price_per_square_foot(record: &PropertyRecord) -> Option<Adjustment> {
    let square_feet = record.square_feet()?;
    let price = record.asking_price()?;
    let price_per_sqft = price / square_feet;

    if price_per_sqft < 80.0 {
        Some(Adjustment {
            factor: Factor::new(
                PRICE_PER_SQFT,
                FactorImpact::Positive,
                format!("Low price per sq ft at ${price_per_sqft:.0}"),
            ),
            delta: 10.0,
        })
    } else if price_per_sqft > 150.0 {
        Some(Adjustment {
            factor: Factor::new(
                PRICE_PER_SQFT,
                FactorImpact::Negative,
                format!("High price per sq ft at ${price_per_sqft:.0}"),
            ),
            delta: -10.0,
        })
    } else {
        None
    }
}

use super::common::*;
use crate::workflows::deals::domain::{DealRating, FactorImpact, PropertyRecord};
use crate::workflows::deals::mao::intake_mao;
use crate::workflows::deals::scoring::{DealScorer, ScoringConfig};

const POOR_RECOMMENDATION: &str =
    "Poor investment metrics. Consider passing unless significant improvements can be made.";

#[test]
fn good_spread_alone_rates_good() {
    let result = DealScorer::default().evaluate(&good_spread_record());

    assert_eq!(result.score, 65);
    assert_eq!(result.rating, DealRating::Good);
    assert_eq!(result.confidence, 75.0);
    assert_eq!(result.factors.len(), 1);
    assert_eq!(result.factors[0].name, "Price Spread");
    assert_eq!(result.factors[0].impact, FactorImpact::Positive);
    assert_eq!(
        result.factors[0].description,
        "Good spread of 28.6% between price and ARV"
    );
    assert_eq!(
        result.recommendation,
        "Good investment opportunity. Consider negotiating price if possible."
    );
}

#[test]
fn asking_above_mao_subtracts_overage() {
    let record = over_mao_record();
    let result = DealScorer::default().evaluate(&record);

    assert_eq!(result.score, 52);
    assert_eq!(result.rating, DealRating::Fair);
    let names: Vec<&str> = result.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Price Spread", "MAO Analysis"]);
    assert_eq!(result.factors[1].impact, FactorImpact::Negative);
    assert_eq!(
        result.factors[1].description,
        "Asking price exceeds MAO by 12.8%"
    );
}

#[test]
fn intake_mao_feeds_the_same_scenario() {
    let mut record = over_mao_record();
    record.mao = intake_mao(record.arv).expect("arv provided");

    let result = DealScorer::default().evaluate(&record);
    assert_eq!(result.score, 52);
    assert_eq!(result.rating, DealRating::Fair);
}

#[test]
fn tight_margin_rates_poor() {
    let result = DealScorer::default().evaluate(&tight_margin_record());

    assert_eq!(result.score, 30);
    assert_eq!(result.rating, DealRating::Poor);
    assert_eq!(
        result.factors[0].description,
        "Tight margins with only 1.6% spread"
    );
    assert_eq!(result.recommendation, POOR_RECOMMENDATION);
}

#[test]
fn every_positive_signal_clamps_at_one_hundred() {
    let record = PropertyRecord {
        asking_price: 150_000.0,
        arv: 300_000.0,
        mao: 160_000.0,
        square_feet: 2_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);

    assert_eq!(result.score, 100);
    assert_eq!(result.rating, DealRating::Excellent);
    let names: Vec<&str> = result.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Price Spread", "MAO Analysis", "Price per Sq Ft"]);
    assert_eq!(result.factors[0].description, "Excellent spread of 50.0% between price and ARV");
    assert_eq!(
        result.factors[1].description,
        "Asking price is within Maximum Allowable Offer"
    );
    assert_eq!(result.factors[2].description, "Low price per sq ft at $75");
}

#[test]
fn every_negative_signal_clamps_at_zero() {
    let record = PropertyRecord {
        asking_price: 300_000.0,
        arv: 305_000.0,
        mao: 200_000.0,
        square_feet: 1_500.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);

    assert_eq!(result.score, 0);
    assert_eq!(result.rating, DealRating::Poor);
    assert_eq!(result.factors.len(), 3);
    assert_eq!(
        result.factors[1].description,
        "Asking price exceeds MAO by 50.0%"
    );
    assert_eq!(result.factors[2].description, "High price per sq ft at $200");
}

#[test]
fn mao_penalty_is_capped() {
    let record = PropertyRecord {
        asking_price: 300_000.0,
        mao: 200_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);
    assert_eq!(result.score, 25);
}

#[test]
fn mid_range_spread_emits_nothing() {
    for (price, arv) in [(89_500.0, 100_000.0), (80_100.0, 100_000.0), (85_000.0, 100_000.0)] {
        let record = PropertyRecord {
            asking_price: price,
            arv,
            ..PropertyRecord::default()
        };
        let result = DealScorer::default().evaluate(&record);
        assert!(result.factors.is_empty(), "price {price} should sit in the gap");
        assert_eq!(result.score, 50);
        assert_eq!(result.rating, DealRating::Fair);
    }
}

#[test]
fn moderate_price_per_square_foot_is_neutral() {
    let record = PropertyRecord {
        asking_price: 120_000.0,
        square_feet: 1_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);
    assert!(result.factors.is_empty());
    assert_eq!(result.score, 50);
}

#[test]
fn zero_values_exclude_their_factors() {
    let scorer = DealScorer::default();

    let no_arv = PropertyRecord {
        asking_price: 250_000.0,
        ..PropertyRecord::default()
    };
    assert!(scorer.evaluate(&no_arv).factors.is_empty());

    let no_price = PropertyRecord {
        arv: 350_000.0,
        mao: 200_000.0,
        square_feet: 1_800.0,
        ..PropertyRecord::default()
    };
    let result = scorer.evaluate(&no_price);
    assert!(result.factors.is_empty(), "a $0 price must not read as a 100% spread");
    assert_eq!(result.score, 50);

    let no_mao = PropertyRecord {
        mao: 0.0,
        ..over_mao_record()
    };
    assert!(scorer
        .evaluate(&no_mao)
        .factors
        .iter()
        .all(|factor| factor.name != "MAO Analysis"));
}

#[test]
fn unparseable_inputs_behave_like_missing_ones() {
    let from_wizard: PropertyRecord = serde_json::from_value(serde_json::json!({
        "price": "250000",
        "arv": "three hundred fifty",
        "mao": "TBD",
        "sqft": "-"
    }))
    .expect("payload parses");

    let explicit = PropertyRecord {
        asking_price: 250_000.0,
        ..PropertyRecord::default()
    };

    let scorer = DealScorer::default();
    assert_eq!(scorer.evaluate(&from_wizard), scorer.evaluate(&explicit));
}

#[test]
fn non_finite_fields_are_ignored() {
    let record = PropertyRecord {
        asking_price: f64::NAN,
        arv: f64::INFINITY,
        square_feet: -10.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);
    assert!(result.factors.is_empty());
    assert_eq!(result.score, 50);
}

#[test]
fn evaluation_is_idempotent() {
    let scorer = DealScorer::default();
    let record = over_mao_record();
    assert_eq!(scorer.evaluate(&record), scorer.evaluate(&record));
}

#[test]
fn confidence_comes_from_config() {
    let scorer = DealScorer::new(ScoringConfig { confidence: 62.5 });
    assert_eq!(scorer.evaluate(&good_spread_record()).confidence, 62.5);
}

#[test]
fn scores_stay_within_bounds() {
    let scorer = DealScorer::default();
    let prices = [0.0, 1.0, 50_000.0, 180_000.0, 400_000.0, 5_000_000.0];
    let arvs = [0.0, 10.0, 120_000.0, 300_000.0, 2_000_000.0];
    let maos = [0.0, 1.0, 90_000.0, 250_000.0];
    let areas = [0.0, 1.0, 900.0, 3_200.0];

    for &asking_price in &prices {
        for &arv in &arvs {
            for &mao in &maos {
                for &square_feet in &areas {
                    let record = PropertyRecord {
                        asking_price,
                        arv,
                        mao,
                        square_feet,
                        ..PropertyRecord::default()
                    };
                    let result = scorer.evaluate(&record);
                    assert!(result.score <= 100);
                    assert_eq!(result.recommendation, result.rating.recommendation());
                }
            }
        }
    }
}

#[test]
fn rating_is_monotonic_in_score() {
    let mut previous = DealRating::from_score(0.0);
    for tenth in 0..=1000u32 {
        let score = f64::from(tenth) / 10.0;
        let rating = DealRating::from_score(score);
        assert!(rating >= previous, "rating dropped at {score}");
        previous = rating;
    }

    assert_eq!(DealRating::from_score(44.9), DealRating::Poor);
    assert_eq!(DealRating::from_score(45.0), DealRating::Fair);
    assert_eq!(DealRating::from_score(64.9), DealRating::Fair);
    assert_eq!(DealRating::from_score(65.0), DealRating::Good);
    assert_eq!(DealRating::from_score(79.9), DealRating::Good);
    assert_eq!(DealRating::from_score(80.0), DealRating::Excellent);
}

#[test]
fn rating_uses_unrounded_score() {
    // 50 + 25 - 10.4 lands just under the Good floor.
    let just_under_good = PropertyRecord {
        asking_price: 110_400.0,
        arv: 220_800.0,
        mao: 100_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&just_under_good);
    assert_eq!(result.score, 65);
    assert_eq!(result.rating, DealRating::Fair);
    assert_eq!(
        result.recommendation,
        "Marginal deal. Proceed with caution and thorough due diligence."
    );

    // 50 - 5.4 lands just under the Fair floor.
    let just_under_fair = PropertyRecord {
        asking_price: 105_400.0,
        mao: 100_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&just_under_fair);
    assert_eq!(result.score, 45);
    assert_eq!(result.rating, DealRating::Poor);
    assert_eq!(result.recommendation, POOR_RECOMMENDATION);
}

#[test]
fn spread_thresholds_are_exclusive() {
    let scorer = DealScorer::default();
    let spread = |price: f64| {
        scorer.evaluate(&PropertyRecord {
            asking_price: price,
            arv: 100_000.0,
            ..PropertyRecord::default()
        })
    };

    let thirty = spread(70_000.0);
    assert_eq!(thirty.score, 65);
    assert_eq!(thirty.factors.len(), 1);
    assert_eq!(
        thirty.factors[0].description,
        "Good spread of 30.0% between price and ARV"
    );

    for price in [80_000.0, 90_000.0] {
        let result = spread(price);
        assert!(result.factors.is_empty(), "price {price} should sit in the gap");
        assert_eq!(result.score, 50);
    }
}

#[test]
fn asking_at_mao_counts_as_within() {
    let record = PropertyRecord {
        asking_price: 100_000.0,
        mao: 100_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);
    assert_eq!(result.score, 70);
    assert_eq!(result.rating, DealRating::Good);
    assert_eq!(result.factors[0].impact, FactorImpact::Positive);
}

#[test]
fn price_per_square_foot_bounds_are_neutral() {
    let scorer = DealScorer::default();
    for (price, square_feet) in [(120_000.0, 1_500.0), (150_000.0, 1_000.0)] {
        let record = PropertyRecord {
            asking_price: price,
            square_feet,
            ..PropertyRecord::default()
        };
        let result = scorer.evaluate(&record);
        assert!(result.factors.is_empty(), "{price} over {square_feet} sq ft");
        assert_eq!(result.score, 50);
    }
}

#[test]
fn top_factors_respect_evaluation_order() {
    let record = PropertyRecord {
        asking_price: 150_000.0,
        arv: 300_000.0,
        mao: 160_000.0,
        square_feet: 2_000.0,
        ..PropertyRecord::default()
    };
    let result = DealScorer::default().evaluate(&record);
    let top = result.top_factors(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[1].name, "MAO Analysis");
    assert_eq!(result.top_factors(10).len(), 3);
}

mod policy;
mod rules;

use super::domain::{DealAnalysisResult, DealRating, PropertyRecord};
use policy::{clamp_score, report_score, BASE_SCORE};

/// Local scoring settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Confidence reported for locally computed analyses.
    pub confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { confidence: 75.0 }
    }
}

/// Deterministic deal scorer: base score 50, three additive rules, clamp, rate.
///
/// Never fails. Missing inputs simply drop the rule that needs them.
#[derive(Debug, Clone, Default)]
pub struct DealScorer {
    config: ScoringConfig,
}

impl DealScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, record: &PropertyRecord) -> DealAnalysisResult {
        let (factors, adjustment) = rules::score_property(record);
        let clamped = clamp_score(BASE_SCORE + adjustment);
        let rating = DealRating::from_score(clamped);

        DealAnalysisResult {
            score: report_score(clamped),
            rating,
            confidence: self.config.confidence,
            factors,
            recommendation: rating.recommendation().to_string(),
        }
    }
}

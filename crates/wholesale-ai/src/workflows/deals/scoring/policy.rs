use super::super::domain::DealRating;

pub(crate) const BASE_SCORE: f64 = 50.0;

const EXCELLENT_FLOOR: f64 = 80.0;
const GOOD_FLOOR: f64 = 65.0;
const FAIR_FLOOR: f64 = 45.0;

/// Clamp the accumulated score into `0..=100`. Rating happens on this value.
pub(crate) fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return BASE_SCORE;
    }
    raw.clamp(0.0, 100.0)
}

/// Whole-point score reported to callers.
pub(crate) fn report_score(clamped: f64) -> u8 {
    clamped.round() as u8
}

impl DealRating {
    /// Band for a clamped, unrounded score.
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_FLOOR {
            DealRating::Excellent
        } else if score >= GOOD_FLOOR {
            DealRating::Good
        } else if score >= FAIR_FLOOR {
            DealRating::Fair
        } else {
            DealRating::Poor
        }
    }

    /// Band recommendation shown next to the score.
    pub const fn recommendation(self) -> &'static str {
        match self {
            DealRating::Excellent => {
                "Strong deal with excellent potential. Recommend moving forward quickly."
            }
            DealRating::Good => {
                "Good investment opportunity. Consider negotiating price if possible."
            }
            DealRating::Fair => "Marginal deal. Proceed with caution and thorough due diligence.",
            DealRating::Poor => {
                "Poor investment metrics. \
                 Consider passing unless significant improvements can be made."
            }
        }
    }
}

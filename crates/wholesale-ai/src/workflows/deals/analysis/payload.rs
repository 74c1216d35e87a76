use serde::Deserialize;

use super::super::domain::{DealAnalysisResult, DealRating, Factor};
use super::RemoteAnalysisError;

/// Loose mirror of the remote deal analysis so range checks can run before accepting it.
#[derive(Debug, Deserialize)]
struct RemoteDealAnalysis {
    score: f64,
    rating: DealRating,
    confidence: f64,
    factors: Vec<Factor>,
    recommendation: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedContent {
    content: String,
}

pub(crate) fn decode_deal_analysis(body: &str) -> Result<DealAnalysisResult, RemoteAnalysisError> {
    let remote: RemoteDealAnalysis = serde_json::from_str(body)
        .map_err(|err| RemoteAnalysisError::Malformed(err.to_string()))?;

    if !(0.0..=100.0).contains(&remote.score) {
        return Err(RemoteAnalysisError::Malformed(format!(
            "score {} outside 0..=100",
            remote.score
        )));
    }
    if !(0.0..=100.0).contains(&remote.confidence) {
        return Err(RemoteAnalysisError::Malformed(format!(
            "confidence {} outside 0..=100",
            remote.confidence
        )));
    }

    Ok(DealAnalysisResult {
        score: remote.score.round() as u8,
        rating: remote.rating,
        confidence: remote.confidence,
        factors: remote.factors,
        recommendation: remote.recommendation,
    })
}

pub(crate) fn decode_generated_content(body: &str) -> Result<String, RemoteAnalysisError> {
    let generated: GeneratedContent = serde_json::from_str(body)
        .map_err(|err| RemoteAnalysisError::Malformed(err.to_string()))?;

    if generated.content.trim().is_empty() {
        return Err(RemoteAnalysisError::Malformed(
            "generated content was empty".to_string(),
        ));
    }

    Ok(generated.content)
}

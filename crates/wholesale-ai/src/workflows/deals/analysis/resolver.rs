use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::payload::{decode_deal_analysis, decode_generated_content};
use super::{
    AnalysisGateway, AnalysisKind, AnalysisRequest, AnalysisSource, RemoteAnalysisError,
    ResolveError, ResolvedAnalysis,
};
use crate::workflows::deals::domain::PropertyRecord;
use crate::workflows::deals::scoring::DealScorer;

/// Chooses between the remote analysis and the local scorer for each request.
pub struct ResultResolver<G> {
    gateway: Arc<G>,
    scorer: DealScorer,
    timeout: Duration,
}

impl<G> ResultResolver<G>
where
    G: AnalysisGateway + 'static,
{
    pub fn new(gateway: Arc<G>, scorer: DealScorer, timeout: Duration) -> Self {
        Self {
            gateway,
            scorer,
            timeout,
        }
    }

    pub fn scorer(&self) -> &DealScorer {
        &self.scorer
    }

    /// Resolve one request. Deal analyses never fail; text kinds surface remote errors.
    pub async fn resolve(
        &self,
        record: &PropertyRecord,
        kind: AnalysisKind,
    ) -> Result<ResolvedAnalysis, ResolveError> {
        let response = self.request_remote(record, kind).await;

        match kind {
            AnalysisKind::DealAnalysis => {
                let resolved = match response.and_then(|body| decode_deal_analysis(&body)) {
                    Ok(result) => {
                        debug!(score = result.score, "using remote deal analysis");
                        ResolvedAnalysis::Deal {
                            source: AnalysisSource::Remote,
                            result,
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "remote deal analysis unavailable, scoring locally");
                        ResolvedAnalysis::Deal {
                            source: AnalysisSource::Fallback,
                            result: self.scorer.evaluate(record),
                        }
                    }
                };
                Ok(resolved)
            }
            AnalysisKind::PropertyDescription | AnalysisKind::MarketInsights => response
                .and_then(|body| decode_generated_content(&body))
                .map(|content| ResolvedAnalysis::Text { kind, content })
                .map_err(|source| {
                    warn!(%kind, error = %source, "text generation failed");
                    ResolveError { kind, source }
                }),
        }
    }

    async fn request_remote(
        &self,
        record: &PropertyRecord,
        kind: AnalysisKind,
    ) -> Result<String, RemoteAnalysisError> {
        let request = AnalysisRequest::new(record.clone(), kind);
        match tokio::time::timeout(self.timeout, self.gateway.invoke(&request)).await {
            Ok(response) => response,
            Err(_) => Err(RemoteAnalysisError::Timeout(self.timeout)),
        }
    }
}

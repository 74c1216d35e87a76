use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AnalysisGateway, AnalysisKind, AnalysisSource, ResolvedAnalysis, ResultResolver};
use crate::workflows::deals::domain::{DealAnalysisResult, PropertyRecord};
use crate::workflows::deals::mao::{compute_mao, MaoFormula};

/// Response header carrying which path produced a deal analysis.
pub const ANALYSIS_SOURCE_HEADER: &str = "x-analysis-source";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub property_data: PropertyRecord,
    pub analysis_type: AnalysisKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaoRequest {
    pub property_data: PropertyRecord,
    #[serde(default)]
    pub formula: MaoFormula,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub analysis_type: AnalysisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<AnalysisSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DealAnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<ResolvedAnalysis> for ResolveResponse {
    fn from(value: ResolvedAnalysis) -> Self {
        match value {
            ResolvedAnalysis::Deal { source, result } => Self {
                analysis_type: AnalysisKind::DealAnalysis,
                source: Some(source),
                result: Some(result),
                content: None,
            },
            ResolvedAnalysis::Text { kind, content } => Self {
                analysis_type: kind,
                source: None,
                result: None,
                content: Some(content),
            },
        }
    }
}

/// Router exposing local scoring, MAO and remote-or-fallback resolution.
pub fn analysis_router<G>(resolver: Arc<ResultResolver<G>>) -> Router
where
    G: AnalysisGateway + 'static,
{
    Router::new()
        .route("/api/v1/analysis/score", post(score_handler::<G>))
        .route("/api/v1/analysis/mao", post(mao_handler))
        .route("/api/v1/analysis/resolve", post(resolve_handler::<G>))
        .with_state(resolver)
}

pub(crate) async fn score_handler<G>(
    State(resolver): State<Arc<ResultResolver<G>>>,
    Json(record): Json<PropertyRecord>,
) -> Json<DealAnalysisResult>
where
    G: AnalysisGateway + 'static,
{
    Json(resolver.scorer().evaluate(&record))
}

pub(crate) async fn mao_handler(Json(request): Json<MaoRequest>) -> Response {
    let estimate = compute_mao(&request.property_data, request.formula);
    (StatusCode::OK, Json(estimate)).into_response()
}

pub(crate) async fn resolve_handler<G>(
    State(resolver): State<Arc<ResultResolver<G>>>,
    Json(request): Json<ResolveRequest>,
) -> Response
where
    G: AnalysisGateway + 'static,
{
    match resolver
        .resolve(&request.property_data, request.analysis_type)
        .await
    {
        Ok(resolved) => {
            let source = match &resolved {
                ResolvedAnalysis::Deal { source, .. } => Some(*source),
                ResolvedAnalysis::Text { .. } => None,
            };
            let mut response =
                (StatusCode::OK, Json(ResolveResponse::from(resolved))).into_response();
            if let Some(source) = source {
                let value = match source {
                    AnalysisSource::Remote => HeaderValue::from_static("remote"),
                    AnalysisSource::Fallback => HeaderValue::from_static("fallback"),
                };
                response.headers_mut().insert(ANALYSIS_SOURCE_HEADER, value);
            }
            response
        }
        Err(error) => {
            let payload = json!({
                "analysisType": error.kind,
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

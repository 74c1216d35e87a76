use crate::infra::{score_records, AppState, BatchRow};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use wholesale_ai::error::AppError;
use wholesale_ai::workflows::deals::analysis::analysis_router;
use wholesale_ai::workflows::deals::buyers::{buyer_router, BuyerRepository, BuyerService};
use wholesale_ai::workflows::deals::portfolio::{deal_router, DealRepository, DealService};
use wholesale_ai::workflows::deals::{
    import_properties, AnalysisGateway, DealScorer, ResultResolver,
};

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
}

pub(crate) fn with_deal_routes<G, R, B>(
    resolver: Arc<ResultResolver<G>>,
    deals: Arc<DealService<R>>,
    buyers: Arc<BuyerService<B>>,
) -> axum::Router
where
    G: AnalysisGateway + 'static,
    R: DealRepository + 'static,
    B: BuyerRepository + 'static,
{
    let scorer = Arc::new(resolver.scorer().clone());

    analysis_router(resolver)
        .merge(deal_router(deals))
        .merge(buyer_router(buyers))
        .route(
            "/api/v1/analysis/batch",
            axum::routing::post(batch_score_endpoint),
        )
        .layer(Extension(scorer))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_score_endpoint(
    Extension(scorer): Extension<Arc<DealScorer>>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<Vec<BatchRow>>, AppError> {
    let records = import_properties(Cursor::new(payload.csv.into_bytes()))?;
    Ok(Json(score_records(&scorer, &records)))
}

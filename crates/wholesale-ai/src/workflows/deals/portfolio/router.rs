use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DealId, DealStatus, DealSummaryView, NewDeal};
use super::repository::{DealRepository, RepositoryError};
use super::service::{DealService, DealServiceError};

#[derive(Debug, Default, Deserialize)]
pub struct DealListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: DealStatus,
}

/// Router builder exposing deal intake, listing and status endpoints.
pub fn deal_router<R>(service: Arc<DealService<R>>) -> Router
where
    R: DealRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/deals",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/deals/stats", get(stats_handler::<R>))
        .route("/api/v1/deals/:deal_id", get(fetch_handler::<R>))
        .route("/api/v1/deals/:deal_id/status", patch(status_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    Json(new_deal): Json<NewDeal>,
) -> Response
where
    R: DealRepository + 'static,
{
    match service.create(new_deal) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    Query(query): Query<DealListQuery>,
) -> Response
where
    R: DealRepository + 'static,
{
    match service.list(query.search.as_deref()) {
        Ok(deals) => {
            let views: Vec<DealSummaryView> =
                deals.iter().map(|deal| deal.summary_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<DealService<R>>>) -> Response
where
    R: DealRepository + 'static,
{
    match service.statistics() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    Path(deal_id): Path<String>,
) -> Response
where
    R: DealRepository + 'static,
{
    match service.get(&DealId(deal_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<DealService<R>>>,
    Path(deal_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: DealRepository + 'static,
{
    match service.update_status(&DealId(deal_id), update.status) {
        Ok(record) => (StatusCode::OK, Json(record.summary_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DealServiceError) -> Response {
    let status = match &error {
        DealServiceError::MissingAddress => StatusCode::UNPROCESSABLE_ENTITY,
        DealServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DealServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        DealServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BuyerId, BuyerSort, NewBuyer};
use super::repository::BuyerRepository;
use super::service::{BuyerService, BuyerServiceError};
use crate::workflows::deals::portfolio::RepositoryError;

#[derive(Debug, Default, Deserialize)]
pub struct BuyerListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: BuyerSort,
}

pub fn buyer_router<R>(service: Arc<BuyerService<R>>) -> Router
where
    R: BuyerRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/buyers",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/buyers/:buyer_id",
            get(fetch_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<BuyerService<R>>>,
    Json(new_buyer): Json<NewBuyer>,
) -> Response
where
    R: BuyerRepository + 'static,
{
    match service.create(new_buyer) {
        Ok(buyer) => (StatusCode::CREATED, Json(buyer)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<BuyerService<R>>>,
    Query(query): Query<BuyerListQuery>,
) -> Response
where
    R: BuyerRepository + 'static,
{
    match service.list(query.search.as_deref(), query.sort) {
        Ok(buyers) => (StatusCode::OK, Json(buyers)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<BuyerService<R>>>,
    Path(buyer_id): Path<String>,
) -> Response
where
    R: BuyerRepository + 'static,
{
    match service.get(&BuyerId(buyer_id)) {
        Ok(buyer) => (StatusCode::OK, Json(buyer)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<BuyerService<R>>>,
    Path(buyer_id): Path<String>,
) -> Response
where
    R: BuyerRepository + 'static,
{
    match service.delete(&BuyerId(buyer_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BuyerServiceError) -> Response {
    let status = match &error {
        BuyerServiceError::MissingName | BuyerServiceError::MissingEmail => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BuyerServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        BuyerServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BuyerServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

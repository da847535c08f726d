//! HTTP routes

use crate::error::ApiError;

use galaxy_core::{QueryParams, StarQueryResponse};
use galaxy_data::StarCatalog;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn router(catalog: Arc<StarCatalog>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stars", post(stars))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(catalog)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn stars(
    State(catalog): State<Arc<StarCatalog>>,
    Json(params): Json<QueryParams>,
) -> Result<Json<StarQueryResponse>, ApiError> {
    if !params.has_valid_range() {
        return Err(ApiError::InvalidRange {
            min: params.min_dist,
            max: params.max_dist,
        });
    }

    tracing::debug!(?params, "Star query");
    let stars = tokio::task::spawn_blocking(move || catalog.query(&params)).await?;
    tracing::info!(
        count = stars.len(),
        year = params.year,
        healpix = ?params.healpix,
        "Answered star query"
    );

    Ok(Json(StarQueryResponse::from_stars(stars)))
}

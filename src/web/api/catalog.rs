use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub objects: usize,
    pub groups: usize,
}

#[utoipa::path(
    post,
    path = "/api/catalog/refresh",
    responses(
        (status = 200, description = "Catalog rebuilt from the feed", body = RefreshResponse),
        (status = 500, description = "Rebuild task failed", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn refresh(State(state): State<AppState>) -> ApiResult<Json<RefreshResponse>> {
    let loader = state.loader.clone();
    let catalog = tokio::task::spawn_blocking(move || loader.load())
        .await
        .map_err(|e| ApiError::Rebuild(e.to_string()))?;

    let response = RefreshResponse {
        objects: catalog.len(),
        groups: catalog.groups().len(),
    };
    *state.catalog.write().await = Arc::new(catalog);

    log::info!("Catalog refreshed: {} objects", response.objects);
    Ok(Json(response))
}

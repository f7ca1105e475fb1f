use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::geojson::FeatureCollection;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::AtQuery;
use crate::web::server::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupSummary {
    pub label: String,
    /// Objects with a position right now.
    pub features: usize,
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Output groups", body = Vec<GroupSummary>),
        (status = 500, description = "Evaluation failed", body = ErrorResponse)
    ),
    tag = "groups"
)]
pub async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<GroupSummary>>> {
    let catalog = state.catalog().await;
    let summaries = tokio::task::spawn_blocking(move || {
        state
            .collections(&catalog, Utc::now())
            .into_iter()
            .map(|group| GroupSummary {
                label: group.label,
                features: group.collection.features.len(),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| ApiError::Evaluation(e.to_string()))?;
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group}",
    params(
        ("group" = String, Path, description = "Output group label"),
        AtQuery
    ),
    responses(
        (status = 200, description = "Feature collection for the group", body = FeatureCollection),
        (status = 400, description = "Invalid instant", body = ErrorResponse),
        (status = 404, description = "Unknown group", body = ErrorResponse),
        (status = 500, description = "Evaluation failed", body = ErrorResponse)
    ),
    tag = "groups"
)]
pub async fn get_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Query(query): Query<AtQuery>,
) -> ApiResult<Json<FeatureCollection>> {
    if !state.assigner.labels().contains(&group.as_str()) {
        return Err(ApiError::NotFound("group_not_found", group));
    }
    let at = query.instant()?;

    let catalog = state.catalog().await;
    let collection = tokio::task::spawn_blocking(move || state.collection(&catalog, &group, at))
        .await
        .map_err(|e| ApiError::Evaluation(e.to_string()))?;
    Ok(Json(collection))
}

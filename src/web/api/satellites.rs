use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::position::PositionSample;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::AtQuery;
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites/{id}",
    params(
        ("id" = u32, Path, description = "NORAD catalog number"),
        AtQuery
    ),
    responses(
        (status = 200, description = "Position sample; failed propagation is reported in the status", body = PositionSample),
        (status = 400, description = "Invalid instant", body = ErrorResponse),
        (status = 404, description = "Unknown catalog number", body = ErrorResponse)
    ),
    tag = "satellites"
)]
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<AtQuery>,
) -> ApiResult<Json<PositionSample>> {
    let at = query.instant()?;
    let catalog = state.catalog().await;
    let entry = catalog.get(id)?;
    Ok(Json(state.evaluator.evaluate(entry, at)))
}

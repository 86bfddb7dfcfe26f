use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, SweetSummary};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/sweets",
    responses(
        (status = 200, description = "All sweets, ordered by id", body = Vec<SweetSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_sweets_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SweetSummary>>, ApiError> {
    let sweets = state.catalog.list_sweets().await?;
    Ok(Json(sweets.iter().map(SweetSummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/sweets/{id}",
    params(("id" = i64, Path, description = "Sweet id")),
    responses(
        (status = 200, description = "The sweet", body = SweetSummary),
        (status = 404, description = "No sweet with that id, or id is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_sweet_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SweetSummary>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound("Sweet"))?;
    let sweet = state
        .catalog
        .get_sweet(id)
        .await?
        .ok_or(ApiError::NotFound("Sweet"))?;
    Ok(Json(SweetSummary::from(&sweet)))
}

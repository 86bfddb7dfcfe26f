use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, VendorDetail, VendorSummary};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/vendors",
    responses(
        (status = 200, description = "All vendors, ordered by id", body = Vec<VendorSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_vendors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<VendorSummary>>, ApiError> {
    let vendors = state.catalog.list_vendors().await?;
    Ok(Json(vendors.iter().map(VendorSummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/vendors/{id}",
    params(("id" = i64, Path, description = "Vendor id")),
    responses(
        (status = 200, description = "Vendor with its priced sweets", body = VendorDetail),
        (status = 404, description = "No vendor with that id, or id is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_vendor_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<VendorDetail>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound("Vendor"))?;
    let vendor = state
        .catalog
        .get_vendor(id)
        .await?
        .ok_or(ApiError::NotFound("Vendor"))?;
    let listings = state.catalog.vendor_listings(vendor.id).await?;
    Ok(Json(VendorDetail::new(&vendor, &listings)))
}

use crate::app::catalog_service::CatalogError;
use crate::domain::model::NewVendorSweet;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, CreateVendorSweetRequest, VendorSweetCreated};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    post,
    path = "/vendor_sweets",
    request_body = CreateVendorSweetRequest,
    responses(
        (status = 201, description = "Vendor sweet created", body = VendorSweetCreated),
        (status = 400, description = "Missing/negative price, unknown vendor or sweet, or malformed body", body = ValidationErrorsResponse)
    )
)]
pub async fn create_vendor_sweet_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateVendorSweetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VendorSweetCreated>), ApiError> {
    let Json(request) = request?;

    let new = NewVendorSweet::new(request.price, request.vendor_id, request.sweet_id)
        .map_err(|e| ApiError::VendorSweetRejected(CatalogError::from(e)))?;

    let created = state
        .catalog
        .create_vendor_sweet(&new)
        .await
        .map_err(ApiError::VendorSweetRejected)?;

    Ok((StatusCode::CREATED, Json(VendorSweetCreated::from(&created))))
}

#[utoipa::path(
    delete,
    path = "/vendor_sweets/{id}",
    params(("id" = i64, Path, description = "Vendor sweet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No vendor sweet with that id, or id is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_vendor_sweet_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound("VendorSweet"))?;
    if state.catalog.delete_vendor_sweet(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("VendorSweet"))
    }
}

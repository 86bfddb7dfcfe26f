use crate::app::catalog_service::CatalogError;
use crate::transport::http::types::{ErrorResponse, ValidationErrorsResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Body returned for every rejected `POST /vendor_sweets`, whatever the cause.
pub const GENERIC_VALIDATION_ERROR: &str = "validation errors";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Carries the entity name used in the message, e.g. `"Vendor"`.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("malformed vendor sweet payload: {0}")]
    MalformedPayload(#[from] JsonRejection),

    #[error("vendor sweet rejected: {0}")]
    VendorSweetRejected(#[source] CatalogError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Converts `ApiError` into an HTTP response.
///
/// Write-path failures all collapse into the same 400 body; the cause only goes to the log.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("{} not found", entity),
                }),
            )
                .into_response(),
            ApiError::MalformedPayload(rejection) => {
                tracing::warn!(error = %rejection, "Rejected vendor sweet payload.");
                validation_errors()
            }
            ApiError::VendorSweetRejected(cause) => {
                if cause.is_client_fault() {
                    tracing::warn!(error = %cause, "Rejected vendor sweet.");
                } else {
                    tracing::error!(error = ?cause, "Database error while creating vendor sweet.");
                }
                validation_errors()
            }
            ApiError::Catalog(cause) => {
                tracing::error!(error = ?cause, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "An internal database error occurred".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn validation_errors() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorsResponse {
            errors: vec![GENERIC_VALIDATION_ERROR.to_string()],
        }),
    )
        .into_response()
}

use crate::transport::http::handlers::{health, home, sweets, vendor_sweets, vendors};
use crate::transport::http::types::{
    AppState, CreateVendorSweetRequest, ErrorResponse, HealthResponse, SweetSummary,
    ValidationErrorsResponse, VendorDetail, VendorSummary, VendorSweetCreated, VendorSweetEntry,
};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::home_handler,
        health::healthcheck_handler,
        vendors::list_vendors_handler,
        vendors::get_vendor_handler,
        sweets::list_sweets_handler,
        sweets::get_sweet_handler,
        vendor_sweets::create_vendor_sweet_handler,
        vendor_sweets::delete_vendor_sweet_handler
    ),
    components(schemas(
        SweetSummary,
        VendorSummary,
        VendorSweetEntry,
        VendorDetail,
        VendorSweetCreated,
        CreateVendorSweetRequest,
        ErrorResponse,
        ValidationErrorsResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Catalog routes only, without docs or middleware.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/vendors", get(vendors::list_vendors_handler))
        .route("/vendors/:id", get(vendors::get_vendor_handler))
        .route("/sweets", get(sweets::list_sweets_handler))
        .route("/sweets/:id", get(sweets::get_sweet_handler))
        .route("/vendor_sweets", post(vendor_sweets::create_vendor_sweet_handler))
        .route(
            "/vendor_sweets/:id",
            delete(vendor_sweets::delete_vendor_sweet_handler),
        )
        .with_state(app_state)
}

/// The full application: routes plus Swagger UI, CORS and request tracing.
pub fn build_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

use axum::response::Html;

pub const GREETING: &str = "<h1>Sweet Vendors API</h1>";

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Static greeting", content_type = "text/html", body = String))
)]
pub async fn home_handler() -> Html<&'static str> {
    Html(GREETING)
}

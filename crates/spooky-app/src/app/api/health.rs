use salvo::{Router, handler, writing::Json};
use serde::Serialize;

use super::API_ROUTE_COMPONENT;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[handler]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Spooky Route API",
    })
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT).get(health)
}

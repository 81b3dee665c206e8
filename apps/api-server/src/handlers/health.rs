//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

/// Liveness body: build version plus the storage mode and schema in use.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub schema: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let posts = &state.posts;
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: if posts.is_durable() { "file" } else { "memory" },
        schema: posts.schema().name,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

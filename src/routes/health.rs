use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check));
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Tomolink API is running" }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let db_healthy = state.store.health_check().await.unwrap_or_else(|e| {
        tracing::warn!("Database health check failed: {}", e);
        false
    });

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

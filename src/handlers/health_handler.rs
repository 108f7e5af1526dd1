use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[get("/health/ready")]
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    let Some(db) = state.db.as_ref() else {
        return HttpResponse::Ok().json(json!({ "status": "ready", "database": "not configured" }));
    };

    match db.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ready", "database": "ok" })),
        Err(e) => {
            log::error!("Readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable()
                .json(json!({ "status": "unavailable", "database": "unreachable" }))
        }
    }
}

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;

use crate::services::brd::gemini::BrdGenerator;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    llm_service: &'static str,
    timestamp: String,
}

/// `GET /api/health`
pub async fn process(generator: web::Data<dyn BrdGenerator>) -> HttpResponse {
    let llm_service = if generator.is_live() {
        "available"
    } else {
        "fallback_mode"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        llm_service,
        timestamp: Utc::now().to_rfc3339(),
    })
}

use actix_web::{web, HttpResponse};
use common::limits::{AVAILABLE_MODELS, VALID_FILE_TYPES};
use serde::Serialize;

use crate::config::Config;

const ENDPOINTS: [&str; 5] = [
    "POST /api/generate_brd_from_input",
    "POST /api/generate_brd_with_files",
    "POST /api/export/pdf",
    "GET /api/health",
    "GET /api/info",
];

#[derive(Debug, Serialize)]
struct ServiceInfo<'a> {
    name: &'static str,
    version: &'static str,
    llm_provider: &'static str,
    default_model: &'a str,
    available_models: &'static [&'static str],
    endpoints: &'static [&'static str],
    supported_file_types: &'static [&'static str],
}

/// `GET /api/info`
pub async fn process(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        name: "BRD Studio",
        version: env!("CARGO_PKG_VERSION"),
        llm_provider: "Google Gemini",
        default_model: &config.google_model,
        available_models: &AVAILABLE_MODELS,
        endpoints: &ENDPOINTS,
        supported_file_types: &VALID_FILE_TYPES,
    })
}

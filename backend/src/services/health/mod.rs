//! # Health Service Module
//!
//! Liveness and self-description endpoints under `/api`.

mod info;
mod status;

use actix_web::web::{get, ServiceConfig};

/// # Registered Routes (under `/api`):
///
/// *   **`GET /health`**: always `healthy`; `llm_service` tells whether answers
///     come from Gemini (`available`) or the canned generator (`fallback_mode`).
/// *   **`GET /info`**: name, version, default model, endpoints and accepted
///     upload types.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/health", get().to(status::process))
        .route("/info", get().to(info::process));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::brd::gemini::{self, BrdGenerator, FallbackGenerator};
    use actix_web::{test, web, App};
    use serde_json::Value;
    use std::sync::Arc;

    async fn get_json(generator: Arc<dyn BrdGenerator>, config: Config, uri: &str) -> Value {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(generator))
                .app_data(web::Data::new(config))
                .service(web::scope("/api").configure(configure_routes)),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn health_without_key_reports_fallback_mode() {
        let body = get_json(Arc::new(FallbackGenerator), Config::default(), "/api/health").await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["llm_service"], "fallback_mode");
        let stamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[actix_web::test]
    async fn health_with_key_reports_available() {
        let config = Config {
            google_api_key: Some("k".to_string()),
            ..Config::default()
        };
        let body = get_json(gemini::from_config(&config), config, "/api/health").await;

        assert_eq!(body["llm_service"], "available");
    }

    #[actix_web::test]
    async fn info_lists_endpoints_and_model() {
        let config = Config {
            google_model: "gemini-2.5-pro".to_string(),
            ..Config::default()
        };
        let body = get_json(Arc::new(FallbackGenerator), config, "/api/info").await;

        assert_eq!(body["default_model"], "gemini-2.5-pro");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        let endpoints = body["endpoints"].as_array().unwrap();
        assert!(endpoints
            .iter()
            .any(|e| e == "POST /api/generate_brd_with_files"));
        assert_eq!(body["supported_file_types"].as_array().unwrap().len(), 4);
    }
}

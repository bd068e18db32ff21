//! # Export Service Module
//!
//! Server side of the PDF export. The browser rasterizes the rendered BRD into
//! one tall PNG; this module paginates it onto A4 pages.
//!
//! ## Sub-modules:
//! - `pdf`: decodes the image, splits it into page strips and renders the PDF.

pub mod pdf;

use actix_web::web::{post, scope, ServiceConfig};

const EXPORT_PATH: &str = "/export";

/// # Registered Routes (under `/api/export`):
///
/// *   **`POST /pdf`**:
///     - **Handler**: `pdf::process`
///     - **Description**: Takes `{ title, image_base64 }` and answers with an
///       `application/pdf` attachment named `<title>_BRD.pdf`.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(scope(EXPORT_PATH).route("/pdf", post().to(pdf::process)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn undecodable_image_is_rejected_as_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Config::default()))
                .service(web::scope("/api").configure(configure_routes)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/export/pdf")
            .set_json(json!({"title": "Fleet Tracker", "image_base64": "%%%"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid document image"));
    }
}

//! # BRD Generation Service Module
//!
//! Routes for the two generation contracts, mounted under `/api`.
//!
//! ## Sub-modules:
//! - `from_input`: description only.
//! - `with_files`: description plus extracted file contents; switches to
//!   improvement mode when an uploaded file is itself a BRD.
//! - `gemini`: the model client and the fallback used without an API key.
//! - `schema`, `markdown`, `analyze`, `prompt`: what is sent to the model and
//!   what is built from its answer.

mod analyze;
mod from_input;
pub mod gemini;
mod generate;
mod markdown;
mod prompt;
pub mod schema;
mod validate;
mod with_files;

use actix_web::web::{post, ServiceConfig};

/// # Registered Routes (under `/api`):
///
/// *   **`POST /generate_brd_from_input`**: `{ project_description, model? }`
/// *   **`POST /generate_brd_with_files`**: `{ project_description,
///     uploaded_files: [{ filename, content, type }], model? }`
///
/// Both answer with a `GenerationResult`; failures carry `{ "detail": ... }`.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/generate_brd_from_input", post().to(from_input::process))
        .route("/generate_brd_with_files", post().to(with_files::process));
}

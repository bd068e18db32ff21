//! # HTTP Services
//!
//! Every JSON endpoint lives under one `/api` scope; anything else falls
//! through to the embedded frontend.
//!
//! ## Sub-modules:
//! - `brd`: BRD generation from a description, optionally with files.
//! - `export`: PDF assembly from a rasterized document.
//! - `health`: liveness and service information.

pub mod brd;
pub mod export;
pub mod health;

use actix_web::web::scope;
use actix_web::Scope;

const API_PATH: &str = "/api";

/// Actix matches the first scope whose prefix fits, so all feature routes
/// are registered inside this single scope.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .configure(export::configure_routes)
        .configure(brd::configure_routes)
        .configure(health::configure_routes)
}

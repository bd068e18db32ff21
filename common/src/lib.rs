//! Shared types and target-independent logic for BRD Studio.
//!
//! Everything in this crate compiles for both the WASM frontend and the
//! native backend, so the file intake rules, the request composition and the
//! export planning can be unit tested without a browser.

pub mod compose;
pub mod export;
pub mod extract;
pub mod intake;
pub mod limits;
pub mod markup;
pub mod model;
pub mod state;

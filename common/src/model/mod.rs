pub mod generation;
pub mod requests;
pub mod upload;

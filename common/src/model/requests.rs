//! Request bodies of the backend JSON contracts.

use crate::model::upload::UploadedFile;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate_brd_from_input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromInputRequest {
    pub project_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Body of `POST /api/generate_brd_with_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithFilesRequest {
    pub project_description: String,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Body of `POST /api/export/pdf`: a rasterized document to paginate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPdfRequest {
    /// Document title, used for the PDF metadata and the download name.
    pub title: String,
    /// PNG bytes, standard base64 without a `data:` prefix.
    pub image_base64: String,
}

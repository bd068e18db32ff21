//! Request composition.
//!
//! Turns what the user entered plus the extracted file contents into exactly
//! one call against one of the two generation endpoints.

use crate::limits::DEFAULT_MODEL;
use crate::model::requests::{FromInputRequest, WithFilesRequest};
use crate::model::upload::UploadedFile;
use serde::Serialize;

pub const FALLBACK_NEW_PROJECT: &str =
    "Generate a Business Requirements Document for a new software project.";
pub const FALLBACK_FROM_DOCUMENTS: &str =
    "Generate a comprehensive BRD based on the uploaded documents.";
pub const FALLBACK_IMPROVE_EXISTING: &str = "Improve the existing BRD document";

const BRD_NAME_HINTS: [&str; 3] = ["brd", "business requirements", "requirements document"];

/// The two generation contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    FromInput,
    WithFiles,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FromInput => "/api/generate_brd_from_input",
            Endpoint::WithFiles => "/api/generate_brd_with_files",
        }
    }
}

/// Everything the user provided for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub description: String,
    pub additional_info: Option<String>,
    pub files: Vec<UploadedFile>,
    pub model: String,
}

/// Serialized body for the chosen endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionBody {
    FromInput(FromInputRequest),
    WithFiles(WithFilesRequest),
}

/// One outbound call, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub endpoint: Endpoint,
    pub body: SubmissionBody,
}

/// Whether any file name suggests the upload already is a requirements document.
pub fn looks_like_existing_brd<'a, I>(names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().any(|name| {
        let lower = name.to_lowercase();
        BRD_NAME_HINTS.iter().any(|hint| lower.contains(hint))
    })
}

/// Joins the description and the optional additional information into the
/// single `project_description` field of the contracts. A non-blank
/// description is sent exactly as typed; a blank one yields an empty string.
fn merged_description(description: &str, additional_info: Option<&str>) -> String {
    let blank = description.trim().is_empty();
    match additional_info.map(str::trim).filter(|info| !info.is_empty()) {
        Some(info) if blank => format!("Additional information:\n{}", info),
        Some(info) => format!("{}\n\nAdditional information:\n{}", description, info),
        None if blank => String::new(),
        None => description.to_string(),
    }
}

pub fn compose(request: GenerationRequest) -> Submission {
    let GenerationRequest {
        description,
        additional_info,
        files,
        model,
    } = request;

    let model = if model.trim().is_empty() {
        DEFAULT_MODEL.to_string()
    } else {
        model
    };
    let entered = merged_description(&description, additional_info.as_deref());

    if files.is_empty() {
        let project_description = if entered.is_empty() {
            FALLBACK_NEW_PROJECT.to_string()
        } else {
            entered
        };
        return Submission {
            endpoint: Endpoint::FromInput,
            body: SubmissionBody::FromInput(FromInputRequest {
                project_description,
                model: Some(model),
            }),
        };
    }

    let project_description = if !entered.is_empty() {
        entered
    } else if looks_like_existing_brd(files.iter().map(|f| f.filename.as_str())) {
        FALLBACK_IMPROVE_EXISTING.to_string()
    } else {
        FALLBACK_FROM_DOCUMENTS.to_string()
    };

    Submission {
        endpoint: Endpoint::WithFiles,
        body: SubmissionBody::WithFiles(WithFilesRequest {
            project_description,
            uploaded_files: files,
            model: Some(model),
        }),
    }
}

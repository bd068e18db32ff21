use common::limits::{
    is_valid_file_type, AVAILABLE_MODELS, MAX_FILES_COUNT, MAX_PROJECT_DESCRIPTION_LENGTH,
    MAX_TOTAL_CONTENT_LENGTH, MIN_PROJECT_DESCRIPTION_LENGTH,
};
use common::model::requests::{FromInputRequest, WithFilesRequest};

use crate::error::{ApiError, Result};

fn check_description_length(description: &str) -> Result<()> {
    if description.trim().chars().count() < MIN_PROJECT_DESCRIPTION_LENGTH {
        return Err(ApiError::Validation(format!(
            "Project description must be at least {} characters long",
            MIN_PROJECT_DESCRIPTION_LENGTH
        )));
    }
    if description.chars().count() > MAX_PROJECT_DESCRIPTION_LENGTH {
        return Err(ApiError::Validation(format!(
            "Project description must be less than {} characters",
            MAX_PROJECT_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// A missing or blank model means the configured default.
fn check_model(model: Option<&str>) -> Result<()> {
    match model.map(str::trim) {
        Some(name) if !name.is_empty() && !AVAILABLE_MODELS.contains(&name) => {
            Err(ApiError::Validation(format!(
                "Unsupported model: {}. Available models: {}",
                name,
                AVAILABLE_MODELS.join(", ")
            )))
        }
        _ => Ok(()),
    }
}

pub fn from_input(request: &FromInputRequest) -> Result<()> {
    check_description_length(&request.project_description)?;
    check_model(request.model.as_deref())
}

pub fn with_files(request: &WithFilesRequest) -> Result<()> {
    let has_description = !request.project_description.trim().is_empty();
    let files = &request.uploaded_files;

    if !has_description && files.is_empty() {
        return Err(ApiError::Validation(
            "Either project description or uploaded files must be provided".to_string(),
        ));
    }
    if has_description {
        check_description_length(&request.project_description)?;
    }
    if files.len() > MAX_FILES_COUNT {
        return Err(ApiError::Validation(format!(
            "Maximum {} files allowed",
            MAX_FILES_COUNT
        )));
    }

    let total: usize = files.iter().map(|f| f.content.chars().count()).sum();
    if total > MAX_TOTAL_CONTENT_LENGTH {
        return Err(ApiError::Validation(
            "Total file content size exceeds 100KB limit. Please reduce file sizes or content."
                .to_string(),
        ));
    }

    let invalid: Vec<&str> = files
        .iter()
        .filter(|f| !is_valid_file_type(&f.file_type))
        .map(|f| f.filename.as_str())
        .collect();
    if !invalid.is_empty() {
        return Err(ApiError::Validation(format!(
            "Invalid file types detected: {:?}. Only PDF, MD, and DOCX files are supported.",
            invalid
        )));
    }

    check_model(request.model.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::limits::{MIME_MARKDOWN, MIME_PDF};
    use common::model::upload::UploadedFile;

    fn file(name: &str, mime: &str, len: usize) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content: "a".repeat(len),
            file_type: mime.to_string(),
        }
    }

    fn files_request(description: &str, files: Vec<UploadedFile>) -> WithFilesRequest {
        WithFilesRequest {
            project_description: description.to_string(),
            uploaded_files: files,
            model: None,
        }
    }

    fn message(result: Result<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn text_route_checks_length_bounds() {
        let short = FromInputRequest {
            project_description: "   tiny ".to_string(),
            model: None,
        };
        assert!(message(from_input(&short)).contains("at least 10 characters"));

        let long = FromInputRequest {
            project_description: "x".repeat(5_001),
            model: None,
        };
        assert!(message(from_input(&long)).contains("less than 5000"));

        let ok = FromInputRequest {
            project_description: "A proper project description".to_string(),
            model: None,
        };
        assert!(from_input(&ok).is_ok());
    }

    #[test]
    fn files_route_needs_description_or_files() {
        assert!(message(with_files(&files_request("  ", vec![]))).contains("Either project description"));
        assert!(with_files(&files_request("", vec![file("a.md", MIME_MARKDOWN, 20)])).is_ok());
    }

    #[test]
    fn files_route_limits_count_size_and_types() {
        let eleven = (0..11).map(|i| file(&format!("{}.md", i), MIME_MARKDOWN, 1)).collect();
        assert!(message(with_files(&files_request("", eleven))).contains("Maximum 10 files"));

        let big = vec![file("a.pdf", MIME_PDF, 60_000), file("b.pdf", MIME_PDF, 40_001)];
        assert!(message(with_files(&files_request("", big))).contains("exceeds 100KB"));

        let at_limit = vec![file("a.pdf", MIME_PDF, 60_000), file("b.pdf", MIME_PDF, 40_000)];
        assert!(with_files(&files_request("", at_limit)).is_ok());

        let wrong = vec![file("notes.txt", "text/plain", 5)];
        let msg = message(with_files(&files_request("", wrong)));
        assert!(msg.contains("Invalid file types detected: [\"notes.txt\"]"));
    }

    #[test]
    fn only_listed_models_are_accepted() {
        let with_model = |model: Option<&str>| FromInputRequest {
            project_description: "A proper project description".to_string(),
            model: model.map(str::to_string),
        };
        assert!(from_input(&with_model(None)).is_ok());
        assert!(from_input(&with_model(Some(""))).is_ok());
        assert!(from_input(&with_model(Some("gemini-2.0-flash"))).is_ok());

        let msg = message(from_input(&with_model(Some("gpt-4o"))));
        assert!(msg.starts_with("Unsupported model: gpt-4o"));
        assert!(msg.contains("gemini-2.5-pro"));

        let mut files = files_request("", vec![file("a.md", MIME_MARKDOWN, 5)]);
        files.model = Some("gemini-1.0-ultra".to_string());
        assert!(message(with_files(&files)).starts_with("Unsupported model: gemini-1.0-ultra"));
    }

    #[test]
    fn short_description_with_files_is_rejected() {
        let req = files_request("short", vec![file("a.md", MIME_MARKDOWN, 5)]);
        assert!(message(with_files(&req)).contains("at least 10 characters"));
    }
}

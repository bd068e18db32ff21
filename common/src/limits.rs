//! Fixed limits shared by the UI and the server.

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of files attached to one generation.
pub const MAX_FILES_COUNT: usize = 10;

/// Characters of decoded text kept per file before truncation.
pub const MAX_FILE_CONTENT_LENGTH: usize = 50_000;

/// Upper bound on the summed `content` length the files endpoint accepts.
pub const MAX_TOTAL_CONTENT_LENGTH: usize = 100_000;

pub const MIN_PROJECT_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 5_000;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_MARKDOWN: &str = "text/markdown";
pub const MIME_X_MARKDOWN: &str = "text/x-markdown";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME types accepted at intake and by the files endpoint.
pub const VALID_FILE_TYPES: [&str; 4] = [MIME_PDF, MIME_MARKDOWN, MIME_X_MARKDOWN, MIME_DOCX];

/// Model used when the user does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Models offered in the UI selector.
pub const AVAILABLE_MODELS: [&str; 3] = ["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"];

pub fn is_valid_file_type(mime: &str) -> bool {
    VALID_FILE_TYPES.contains(&mime)
}

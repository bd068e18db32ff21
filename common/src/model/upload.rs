use serde::{Deserialize, Serialize};

/// Text derived from one accepted file, in the shape the files endpoint
/// expects inside `uploaded_files`.
///
/// `content` is either the decoded text of a markdown file (possibly
/// truncated) or a placeholder for binary formats, see `extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

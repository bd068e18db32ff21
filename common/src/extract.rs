//! Content extraction policy.
//!
//! Only markdown is decoded in the browser. PDF and DOCX are represented by a
//! placeholder line; turning those into text is the server's job.

use crate::limits::{MAX_FILE_CONTENT_LENGTH, MIME_DOCX, MIME_MARKDOWN, MIME_PDF, MIME_X_MARKDOWN};
use crate::model::upload::UploadedFile;

/// Appended after the first `MAX_FILE_CONTENT_LENGTH` characters of a long file.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length...]";

/// Whether the bytes of this type are decoded client-side.
pub fn is_text_like(mime: &str) -> bool {
    matches!(mime, MIME_MARKDOWN | MIME_X_MARKDOWN)
}

/// Placeholder for a format that is not parsed in the browser.
pub fn placeholder_for(name: &str, mime: &str) -> String {
    let kind = match mime {
        MIME_PDF => "PDF document",
        MIME_DOCX => "Word document",
        _ => "Binary document",
    };
    format!(
        "[{}: {}. Text extraction for this format is performed by the server.]",
        kind, name
    )
}

/// Keeps the first `limit` characters and appends the marker once the text
/// reaches `limit` characters.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() < limit {
        return text.to_string();
    }
    let byte_idx = text
        .char_indices()
        .nth(limit)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
    out.push_str(&text[..byte_idx]);
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Builds the extracted representation of one file.
///
/// `bytes` is `None` for binary types, which the caller does not read.
pub fn extract_content(name: &str, mime: &str, bytes: Option<&[u8]>) -> UploadedFile {
    let content = match bytes {
        Some(bytes) if is_text_like(mime) => {
            truncate_text(&String::from_utf8_lossy(bytes), MAX_FILE_CONTENT_LENGTH)
        }
        _ => placeholder_for(name, mime),
    };

    UploadedFile {
        filename: name.to_string(),
        content,
        file_type: mime.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_markdown_is_verbatim() {
        let text = "# Title\n\nSome *notes* with ünïcode.";
        let out = extract_content("notes.md", MIME_MARKDOWN, Some(text.as_bytes()));

        assert_eq!(out.content, text);
        assert_eq!(out.filename, "notes.md");
        assert_eq!(out.file_type, MIME_MARKDOWN);
    }

    #[test]
    fn text_just_under_threshold_is_verbatim() {
        let text = "a".repeat(MAX_FILE_CONTENT_LENGTH - 1);
        let out = extract_content("a.md", MIME_X_MARKDOWN, Some(text.as_bytes()));
        assert_eq!(out.content, text);
    }

    #[test]
    fn text_at_threshold_gets_marker() {
        let text = "a".repeat(MAX_FILE_CONTENT_LENGTH);
        let out = extract_content("a.md", MIME_X_MARKDOWN, Some(text.as_bytes()));
        assert_eq!(out.content, format!("{}{}", text, TRUNCATION_MARKER));
    }

    #[test]
    fn long_text_is_cut_at_char_boundary_with_marker() {
        let text = "é".repeat(MAX_FILE_CONTENT_LENGTH + 25);
        let out = extract_content("long.md", MIME_MARKDOWN, Some(text.as_bytes()));

        let expected = format!("{}{}", "é".repeat(MAX_FILE_CONTENT_LENGTH), TRUNCATION_MARKER);
        assert_eq!(out.content, expected);
    }

    #[test]
    fn binary_formats_get_placeholder() {
        let pdf = extract_content("brief.pdf", MIME_PDF, Some(b"%PDF-1.7"));
        assert!(pdf.content.starts_with("[PDF document: brief.pdf."));

        let docx = extract_content("plan.docx", MIME_DOCX, None);
        assert!(docx.content.contains("Word document: plan.docx"));
        assert_eq!(docx.file_type, MIME_DOCX);
    }
}

//! Asynchronous content extraction for the accepted files.

use common::extract::{extract_content, is_text_like};
use common::intake::FileDescriptor;
use common::model::upload::UploadedFile;
use futures_util::future::try_join_all;
use gloo_file::futures::read_as_bytes;

use super::browser_file::BrowserFile;

/// Extracts every file, in order. Only text-like files are read; the first
/// failed read fails the whole set.
pub async fn extract_all(
    files: Vec<FileDescriptor<BrowserFile>>,
) -> Result<Vec<UploadedFile>, String> {
    try_join_all(files.into_iter().map(extract_one)).await
}

async fn extract_one(file: FileDescriptor<BrowserFile>) -> Result<UploadedFile, String> {
    let bytes = if is_text_like(&file.mime_type) {
        let bytes = read_as_bytes(&file.payload.0)
            .await
            .map_err(|e| format!("Could not read {}: {}", file.name, e))?;
        Some(bytes)
    } else {
        None
    };
    Ok(extract_content(&file.name, &file.mime_type, bytes.as_deref()))
}

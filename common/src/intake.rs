//! File intake and validation.
//!
//! Candidate files arrive in batches (a picker change or a drop). Each one is
//! checked against the MIME allow-list and the per-file size cap; survivors are
//! truncated to the remaining capacity of the collection. Both limits are
//! enforced here, so nothing downstream ever has to re-check them.

use crate::limits::{is_valid_file_type, MAX_FILE_SIZE, MAX_FILES_COUNT};
use thiserror::Error;
use uuid::Uuid;

/// What intake needs to know about a candidate before accepting it.
pub trait CandidateFile {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    /// MIME type reported by the source. Browsers leave it empty for
    /// extensions they do not know (`.md` on most systems).
    fn declared_type(&self) -> String;
}

/// An accepted file. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct FileDescriptor<P> {
    pub id: String,
    pub payload: P,
    pub name: String,
    pub size: u64,
    /// Resolved type, always one of `limits::VALID_FILE_TYPES`.
    pub mime_type: String,
}

/// Outcome of one accepted batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeReport {
    pub accepted: usize,
    /// Wrong type or too large.
    pub rejected_invalid: usize,
    /// Valid, but dropped because the collection was full.
    pub rejected_over_capacity: usize,
}

impl IntakeReport {
    /// A single user-facing line summarising the rejections, if any.
    pub fn notice(&self) -> Option<String> {
        match (self.rejected_invalid, self.rejected_over_capacity) {
            (0, 0) => None,
            (invalid, 0) => Some(format!(
                "{} file(s) were rejected. Only PDF, Markdown and DOCX files up to 10MB are allowed.",
                invalid
            )),
            (0, over) => Some(format!(
                "Maximum {} files allowed. {} file(s) were not added.",
                MAX_FILES_COUNT, over
            )),
            (invalid, over) => Some(format!(
                "{} file(s) were rejected (type or size) and {} exceeded the {} file limit.",
                invalid, over, MAX_FILES_COUNT
            )),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Maximum {0} files allowed. Remove a file before adding more.")]
    CapacityReached(usize),
}

/// Resolves the MIME type used for validation.
///
/// The declared type wins; an empty one falls back to a guess from the file
/// extension.
pub fn resolve_mime_type(declared: &str, name: &str) -> String {
    let declared = declared.trim();
    if !declared.is_empty() {
        return declared.to_ascii_lowercase();
    }
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default()
}

/// Ordered collection of accepted files.
#[derive(Debug, Clone)]
pub struct FileIntake<P> {
    files: Vec<FileDescriptor<P>>,
    max_files: usize,
    max_file_size: u64,
}

impl<P> Default for FileIntake<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FileIntake<P> {
    pub fn new() -> Self {
        Self::with_limits(MAX_FILES_COUNT, MAX_FILE_SIZE)
    }

    pub fn with_limits(max_files: usize, max_file_size: u64) -> Self {
        Self {
            files: Vec::new(),
            max_files,
            max_file_size,
        }
    }

    /// Accepted files in insertion order.
    pub fn files(&self) -> &[FileDescriptor<P>] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_files.saturating_sub(self.files.len())
    }

    /// Removes the file with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }
}

impl<P: CandidateFile> FileIntake<P> {
    /// Validates a batch and appends the survivors.
    ///
    /// Invalid candidates are dropped and counted. Valid ones are kept in
    /// their original order up to the remaining capacity. A non-empty batch
    /// arriving when the collection is already full is refused as a whole.
    pub fn accept_batch<I>(&mut self, batch: I) -> Result<IntakeReport, IntakeError>
    where
        I: IntoIterator<Item = P>,
    {
        let batch: Vec<P> = batch.into_iter().collect();
        if batch.is_empty() {
            return Ok(IntakeReport::default());
        }

        let capacity = self.remaining_capacity();
        if capacity == 0 {
            return Err(IntakeError::CapacityReached(self.max_files));
        }

        let mut report = IntakeReport::default();
        for candidate in batch {
            let name = candidate.name();
            let size = candidate.size();
            let mime_type = resolve_mime_type(&candidate.declared_type(), &name);

            if !is_valid_file_type(&mime_type) || size > self.max_file_size {
                report.rejected_invalid += 1;
                continue;
            }
            if report.accepted == capacity {
                report.rejected_over_capacity += 1;
                continue;
            }

            self.files.push(FileDescriptor {
                id: Uuid::new_v4().to_string(),
                payload: candidate,
                name,
                size,
                mime_type,
            });
            report.accepted += 1;
        }

        Ok(report)
    }
}

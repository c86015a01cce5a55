use std::fmt;

use serde::{Deserialize, Serialize};

/// Defensive per-file cap. Uploads are held in memory for the duration of a
/// single pipeline run, so unbounded inputs are rejected at the boundary.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Declared kind of an uploaded file. Routing only - the tabular stage still
/// falls back from spreadsheet to CSV parsing per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Spreadsheet,
    Csv,
}

/// A single uploaded file: raw bytes plus the declared name and kind.
/// Immutable once constructed; owned by the extraction stage that consumes it
/// and discarded with the pipeline run.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub kind: SourceKind,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum InputError {
    TooLarge { name: String, size: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::TooLarge { name, size } => write!(
                f,
                "uploaded file '{}' is {} bytes, exceeding the {} byte limit",
                name, size, MAX_UPLOAD_BYTES
            ),
        }
    }
}

impl std::error::Error for InputError {}

impl UploadedFile {
    pub fn new(name: String, kind: SourceKind, bytes: Vec<u8>) -> Result<Self, InputError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(InputError::TooLarge {
                name,
                size: bytes.len(),
            });
        }
        Ok(Self { name, kind, bytes })
    }
}

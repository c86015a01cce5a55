//! PDF extraction stage: turns uploaded PDF bytes into one plain-text blob.

use serde::Serialize;
use tracing::{debug, warn};

use crate::input::UploadedFile;

/// Result of extracting a batch of PDF uploads. The batch never aborts:
/// files that cannot be parsed are recorded in `skipped` and the remaining
/// files still contribute to `text`.
#[derive(Debug, Clone)]
pub struct PdfExtraction {
    /// Concatenated page text across all parsable files, in upload order
    /// then physical page order, each page followed by a newline.
    pub text: String,
    pub skipped: Vec<SkippedFile>,
}

/// A file the extraction stage gave up on, with the parser's reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

/// Extract text from all uploaded PDFs. Empty input yields an empty string.
///
/// Pure transformation over the input bytes; the only side effect is
/// logging. Unreadable files are skipped, not fatal, since a report missing
/// one source is more useful than no report.
pub fn extract_text(files: &[UploadedFile]) -> PdfExtraction {
    let mut text = String::new();
    let mut skipped = Vec::new();

    for file in files {
        match pdf_extract::extract_text_from_mem_by_pages(&file.bytes) {
            Ok(pages) => {
                debug!(
                    file = %file.name,
                    pages = pages.len(),
                    "Extracted text from PDF"
                );
                for page in pages {
                    text.push_str(&page);
                    text.push('\n');
                }
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "Skipping unreadable PDF");
                skipped.push(SkippedFile {
                    name: file.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    PdfExtraction { text, skipped }
}

//! High-level pipeline: orchestrates extract → summarize → prompt →
//! generate → emit for one report request.
//!
//! This module provides the top-level orchestration logic for assembling a
//! report from a set of uploaded files. It implements a coordinated pipeline
//! that:
//!   - Extracts plain text from the uploaded PDFs (unreadable files are
//!     skipped and recorded, never fatal)
//!   - Renders a compact preview of each uploaded spreadsheet/CSV file
//!   - Builds the fixed-template generation prompt from both
//!   - Requests a single completion through the [`contract::Generator`] seam
//!   - Serializes the completion into a Word document buffer
//!
//! # Responsibilities
//! - Strict stage ordering: each stage consumes only its predecessor's output
//! - Fail-fast after extraction: a generation or emission failure
//!   short-circuits the run and no document bytes are produced
//! - Invokes logging throughout for traceability; each run carries a fresh
//!   id so concurrent invocations can be told apart in logs
//! - Holds no state between invocations: all inputs are in-memory and
//!   request-scoped
//!
//! # Callable From
//! - Used by the CLI crate and by integration tests
//! - Expects a concrete (async) [`Generator`] implementation for the
//!   completion call
//!
//! # Error Handling
//! Generation and emission failures return immediately with the originating
//! stage's detail; callers log and surface these to users. Extraction
//! failures degrade to per-file skip entries on the returned report.

use sha2::{Digest, Sha256};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::ReportConfig;
use crate::contract::Generator;
use crate::extract::{self, SkippedFile};
use crate::{emit, prompt, tabular};

use crate::input::UploadedFile;

/// Outcome of a successful pipeline run: the complete document buffer plus
/// audit details. No partial documents exist - failure yields no bytes.
#[derive(Debug)]
pub struct AssembledReport {
    pub document: Vec<u8>,
    /// SHA256 of `document`, hex encoded, for downstream audit logs.
    pub content_hash: String,
    /// PDF uploads the extraction stage could not read.
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug)]
pub enum PipelineError {
    Generation(String),
    Emission(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Generation(reason) => write!(f, "generation failed: {reason}"),
            PipelineError::Emission(reason) => write!(f, "emission failed: {reason}"),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Run the full report pipeline over one request's uploads.
///
/// Deterministic given identical inputs and an identical generator response:
/// identical runs yield byte-identical documents.
pub async fn assemble<G>(
    config: &ReportConfig,
    generator: &G,
    pdf_files: &[UploadedFile],
    table_files: &[UploadedFile],
) -> Result<AssembledReport, PipelineError>
where
    G: Generator,
{
    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        pdf_files = pdf_files.len(),
        table_files = table_files.len(),
        "[REPORT] Starting report assembly pipeline"
    );

    // --- Stage 1: PDF extraction (skip-and-continue) ---
    let extraction = extract::extract_text(pdf_files);
    if !extraction.skipped.is_empty() {
        match serde_json::to_string(&extraction.skipped) {
            Ok(json) => {
                debug!(%run_id, skipped = %json, "[REPORT] Extraction skipped unreadable files")
            }
            Err(e) => error!(%run_id, error = ?e, "[REPORT] Failed to serialize skip list"),
        }
    }
    info!(
        %run_id,
        extracted_chars = extraction.text.chars().count(),
        skipped = extraction.skipped.len(),
        "[REPORT] PDF extraction complete"
    );

    // --- Stage 2: Tabular summaries ---
    let table_summary = tabular::summarize(table_files);
    info!(
        %run_id,
        summary_chars = table_summary.chars().count(),
        "[REPORT] Tabular summarization complete"
    );

    // --- Stage 3: Prompt assembly ---
    let prompt = prompt::build(&extraction.text, &table_summary);
    debug!(%run_id, prompt_chars = prompt.chars().count(), "[REPORT] Prompt assembled");

    // --- Stage 4: Generation call ---
    let report_text = match generator.complete(&prompt).await {
        Ok(text) => {
            info!(
                %run_id,
                report_chars = text.chars().count(),
                "[REPORT] Generation call succeeded"
            );
            text
        }
        Err(e) => {
            error!(%run_id, error = ?e, "[REPORT][ERROR] Generation call failed");
            return Err(PipelineError::Generation(format!("{e}")));
        }
    };
    if report_text.trim().is_empty() {
        error!(%run_id, "[REPORT][ERROR] Generation returned no usable content");
        return Err(PipelineError::Generation(
            "completion contained no usable content".to_string(),
        ));
    }

    // --- Stage 5: Document emission ---
    let document = match emit::emit(&config.title, &report_text) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%run_id, error = %e, "[REPORT][ERROR] Document emission failed");
            return Err(PipelineError::Emission(e.to_string()));
        }
    };

    let content_hash = {
        let mut hasher = Sha256::new();
        hasher.update(&document);
        format!("{:x}", hasher.finalize())
    };

    info!(
        %run_id,
        bytes = document.len(),
        content_hash = %content_hash,
        "[REPORT] Report assembled"
    );

    Ok(AssembledReport {
        document,
        content_hash,
        skipped: extraction.skipped,
    })
}

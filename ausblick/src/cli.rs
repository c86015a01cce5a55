///
/// This module implements the full CLI interface for ausblick - command
/// parsing, argument validation, main entrypoints, and user-visible
/// invocations.
///
/// All core business logic (data models, pipeline stages, report assembly)
/// lives in the [`ausblick-core`] crate. This module is strictly for CLI
/// glue, ergonomic argument exposure, and orchestration.
///
/// ## Features
/// - Entry struct [`Cli`] defines all user-facing options and subcommands.
/// - Subcommand routing (`generate`) and argument validation.
/// - Async entrypoint (`run`) for programmatic invocation and integration
///   testing.
/// - Logging, tracing, and structured error output at CLI level.
///
/// ## How To Use
/// - For command-line users: use the installed `ausblick` binary with
///   `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
///
/// ## Extending
/// When adding features or subcommands, update [`Commands`] below and keep
/// all non-trivial business logic inside `ausblick-core`.
///
use crate::client::OpenAiClient;
use crate::load_config::load_config;
use anyhow::{Context, Result};
use ausblick_core::assemble::assemble;
use ausblick_core::emit::DOCX_MIME;
use ausblick_core::input::{SourceKind, UploadedFile};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// CLI for ausblick: assemble economic outlook reports from uploaded sources.
#[derive(Parser)]
#[clap(
    name = "ausblick",
    version,
    about = "Assemble a Word outlook report from PDF and spreadsheet sources via a text-generation model"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a report from the given source files and write the DOCX output
    Generate {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// PDF source files (repeatable)
        #[clap(long = "pdf")]
        pdfs: Vec<PathBuf>,
        /// Spreadsheet or CSV source files (repeatable)
        #[clap(long = "table")]
        tables: Vec<PathBuf>,
        /// Where to write the emitted document
        #[clap(long, default_value = "Volkswirtschaftlicher_Ausblick.docx")]
        output: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate {
            config,
            pdfs,
            tables,
            output,
        } => {
            let config = load_config(config)?;
            config.trace_loaded();
            tracing::info!(command = "generate", "Starting report generation");

            // Credential sourcing fails fast, before any file is touched.
            let generator = OpenAiClient::new_from_env(&config)
                .map_err(anyhow::Error::from_boxed)
                .context("Failed to construct generation client from environment")?;

            let pdf_files = read_uploads(&pdfs, |_| SourceKind::Pdf)?;
            let table_files = read_uploads(&tables, table_kind)?;

            match assemble(&config, &generator, &pdf_files, &table_files).await {
                Ok(report) => {
                    std::fs::write(&output, &report.document).with_context(|| {
                        format!("Failed to write report document to {}", output.display())
                    })?;
                    for skipped in &report.skipped {
                        tracing::warn!(
                            file = %skipped.name,
                            reason = %skipped.reason,
                            "Source file was skipped during extraction"
                        );
                    }
                    tracing::info!(
                        command = "generate",
                        output = %output.display(),
                        bytes = report.document.len(),
                        content_hash = %report.content_hash,
                        media_type = DOCX_MIME,
                        "Report generation complete"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "generate", error = %e, "Report generation failed");
                    Err(anyhow::Error::msg(e.to_string()))
                }
            }
        }
    }
}

fn read_uploads(
    paths: &[PathBuf],
    kind_for: impl Fn(&Path) -> SourceKind,
) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        let file = UploadedFile::new(name, kind_for(path), bytes)
            .with_context(|| format!("Rejected source file {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

fn table_kind(path: &Path) -> SourceKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceKind::Csv,
        _ => SourceKind::Spreadsheet,
    }
}

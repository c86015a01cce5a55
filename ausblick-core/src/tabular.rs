//! Tabular summary stage: renders a compact preview of each uploaded
//! spreadsheet or CSV file for inclusion in the generation prompt.
//!
//! Every file is first tried as a spreadsheet workbook and, when that fails,
//! as CSV. A file that fails both is reported as an inline error line inside
//! the summary instead of aborting the batch - the inline message is part of
//! the user-visible prompt content and must stay.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::{debug, warn};

use crate::input::UploadedFile;

/// Number of data rows shown per file. A preview, not an analysis.
pub const PREVIEW_ROWS: usize = 3;

struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Summarize all uploaded tabular files, concatenated in upload order and
/// separated by blank lines. Empty input yields an empty string.
pub fn summarize(files: &[UploadedFile]) -> String {
    let mut summaries: Vec<String> = Vec::new();

    for file in files {
        let summary = match summarize_file(file) {
            Ok(s) => {
                debug!(file = %file.name, "Summarized tabular file");
                s
            }
            Err(reason) => {
                warn!(file = %file.name, reason = %reason, "Tabular file unreadable, embedding inline error");
                format!("Fehler beim Einlesen der Datei {}: {}", file.name, reason)
            }
        };
        summaries.push(summary);
    }

    summaries.join("\n\n")
}

fn summarize_file(file: &UploadedFile) -> Result<String, String> {
    match parse_workbook(&file.bytes) {
        Ok(table) => Ok(render_summary(&file.name, &table)),
        Err(workbook_err) => match parse_csv(&file.bytes) {
            Ok(table) => Ok(render_summary(&file.name, &table)),
            Err(csv_err) => Err(format!("{workbook_err}; CSV: {csv_err}")),
        },
    }
}

/// First worksheet only; the header row becomes the column list.
fn parse_workbook(bytes: &[u8]) -> Result<Table, String> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Arbeitsmappe enthält kein Tabellenblatt".to_string())?
        .map_err(|e| e.to_string())?;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(render_cell).collect())
        .unwrap_or_default();
    if columns.is_empty() {
        return Err("leeres Tabellenblatt".to_string());
    }

    let rows = rows_iter
        .take(PREVIEW_ROWS)
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    Ok(Table { columns, rows })
}

fn parse_csv(bytes: &[u8]) -> Result<Table, String> {
    let mut reader = csv::Reader::from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        return Err("CSV ohne Kopfzeile".to_string());
    }

    let mut rows = Vec::new();
    for record in reader.records().take(PREVIEW_ROWS) {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { columns, rows })
}

fn render_summary(name: &str, table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&format!("Datei: {name}\n"));
    out.push_str(&format!("Spalten: {}\n", table.columns.join(", ")));
    out.push_str("Vorschau:");
    for row in &table.rows {
        out.push('\n');
        out.push_str(&row.join("  "));
    }
    out
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if *f == (*f as i64) as f64 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Int(i) => format!("{i}"),
        Data::Bool(b) => format!("{b}"),
        Data::DateTime(dt) => format!("{dt}"),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

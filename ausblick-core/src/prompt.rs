//! Prompt assembly stage: combines extracted PDF text and the tabular
//! summary into the fixed instruction template for the generation model.

/// Maximum characters of extracted PDF text interpolated into the prompt.
pub const PDF_TEXT_BUDGET: usize = 6000;
/// Maximum characters of tabular summary interpolated into the prompt.
pub const TABLE_SUMMARY_BUDGET: usize = 3000;

/// Build the generation prompt. Deterministic for identical inputs.
///
/// Both segments are plain prefixes of their inputs - truncation may cut
/// mid-sentence. Budgets count characters, not bytes, so multi-byte text
/// never splits a code point.
pub fn build(pdf_text: &str, table_summary: &str) -> String {
    let pdf_part = truncate_chars(pdf_text, PDF_TEXT_BUDGET);
    let table_part = truncate_chars(table_summary, TABLE_SUMMARY_BUDGET);

    format!(
        "Du bist ein Experte für Volkswirtschaft, Zentralbankpolitik und Zinsprognosen.\n\
         Erstelle einen professionellen, strukturierten volkswirtschaftlichen Ausblick für eine Bank.\n\
         \n\
         Verwende diese Inhalte aus PDFs:\n\
         {pdf_part}\n\
         \n\
         Und diese Excel-Daten (Vorschau):\n\
         {table_part}\n\
         \n\
         Struktur des Ausblicks:\n\
         1. Aktuelle wirtschaftliche Lage\n\
         2. Zinsumfeld (EZB, FED, Markt)\n\
         3. Inflationsausblick\n\
         4. Risiken & Unsicherheiten\n\
         5. Mittelfristiger Ausblick und Zinsprojektion\n\
         \n\
         Sprache: sachlich, professionell, deutsch."
    )
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

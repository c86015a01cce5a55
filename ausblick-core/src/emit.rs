//! Document emission stage: serializes the generated report text into a
//! Word document buffer.

use std::fmt;
use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use tracing::debug;

/// Media type of the emitted artifact, for download/transport boundaries.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING_STYLE_ID: &str = "Heading1";

#[derive(Debug)]
pub enum EmitError {
    Serialize(String),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Serialize(reason) => write!(f, "document serialization failed: {reason}"),
        }
    }
}

impl std::error::Error for EmitError {}

/// Emit a complete Word document: one top-level heading set to `title`,
/// then the report text split on `'\n'` into one paragraph per line.
/// Blank lines become empty paragraphs so the generated spacing survives.
///
/// Returns an independently valid byte buffer; nothing is written to disk.
pub fn emit(title: &str, report_text: &str) -> Result<Vec<u8>, EmitError> {
    let heading = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
        .name("Heading 1")
        .size(48)
        .bold();

    let mut docx = Docx::new().add_style(heading).add_paragraph(numbered(
        0,
        Paragraph::new()
            .style(HEADING_STYLE_ID)
            .add_run(Run::new().add_text(title)),
    ));

    for (i, line) in report_text.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        docx = docx.add_paragraph(numbered(
            i + 1,
            Paragraph::new().add_run(Run::new().add_text(line)),
        ));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| EmitError::Serialize(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(bytes = bytes.len(), title = %title, "Emitted Word document");
    Ok(bytes)
}

// Paragraph ids default to a process-global counter; pin them so identical
// inputs always serialize to byte-identical buffers.
fn numbered(index: usize, mut paragraph: Paragraph) -> Paragraph {
    paragraph.id = format!("{:08x}", index + 1);
    paragraph
}

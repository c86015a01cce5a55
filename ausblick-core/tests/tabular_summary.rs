use std::io::{Cursor, Write};

use ausblick_core::input::{SourceKind, UploadedFile};
use ausblick_core::tabular::summarize;

/// Builds a one-sheet XLSX workbook in memory: a header row of shared
/// strings followed by one data row (numbers stay numeric cells).
fn minimal_xlsx(columns: &[&str], row: &[&str]) -> Vec<u8> {
    let mut strings: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let mut cells = String::new();

    for (i, _) in columns.iter().enumerate() {
        let col = (b'A' + i as u8) as char;
        cells.push_str(&format!(
            "<c r=\"{col}1\" t=\"s\"><v>{i}</v></c>",
        ));
    }
    let mut data_cells = String::new();
    for (i, value) in row.iter().enumerate() {
        let col = (b'A' + i as u8) as char;
        if value.parse::<f64>().is_ok() {
            data_cells.push_str(&format!("<c r=\"{col}2\"><v>{value}</v></c>"));
        } else {
            let index = strings.len();
            strings.push(value.to_string());
            data_cells.push_str(&format!("<c r=\"{col}2\" t=\"s\"><v>{index}</v></c>"));
        }
    }

    let shared: String = strings
        .iter()
        .map(|s| format!("<si><t>{s}</t></si>"))
        .collect();

    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#;
    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
    let workbook = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    let workbook_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;
    let shared_strings = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{n}" uniqueCount="{n}">{shared}</sst>"#,
        n = strings.len()
    );
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1">{cells}</row><row r="2">{data_cells}</row></sheetData></worksheet>"#
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    let entries = [
        ("[Content_Types].xml", content_types.to_string()),
        ("_rels/.rels", root_rels.to_string()),
        ("xl/workbook.xml", workbook.to_string()),
        ("xl/_rels/workbook.xml.rels", workbook_rels.to_string()),
        ("xl/sharedStrings.xml", shared_strings),
        ("xl/worksheets/sheet1.xml", sheet),
    ];
    for (name, body) in entries {
        zip.start_file(name, options).expect("zip entry");
        zip.write_all(body.as_bytes()).expect("zip body");
    }
    zip.finish().expect("zip finish").into_inner()
}

fn upload(name: &str, kind: SourceKind, bytes: Vec<u8>) -> UploadedFile {
    UploadedFile::new(name.to_string(), kind, bytes)
        .expect("Fixture should be within the upload size limit")
}

#[test]
fn summarize_returns_empty_string_for_no_files() {
    assert_eq!(summarize(&[]), "");
}

#[test]
fn summarize_renders_name_columns_and_preview_for_csv() {
    let csv = b"Rate,Date\n2.5,2024-01-01\n3.0,2024-02-01\n".to_vec();
    let summary = summarize(&[upload("zinsen.csv", SourceKind::Csv, csv)]);

    assert!(summary.contains("Datei: zinsen.csv"), "got: {summary}");
    assert!(
        summary.contains("Spalten: Rate, Date"),
        "Column names in original order, got: {summary}"
    );
    assert!(summary.contains("Vorschau:"), "got: {summary}");
    assert!(summary.contains("2.5  2024-01-01"), "got: {summary}");
}

#[test]
fn summarize_limits_preview_to_three_rows() {
    let csv = b"Rate\n1.0\n2.0\n3.0\n4.0\n5.0\n".to_vec();
    let summary = summarize(&[upload("viele.csv", SourceKind::Csv, csv)]);

    assert!(summary.contains("3.0"), "got: {summary}");
    assert!(
        !summary.contains("4.0"),
        "Preview must stop after three rows, got: {summary}"
    );
}

#[test]
fn summarize_preserves_upload_order_and_blank_line_separation() {
    let first = b"Rate,Date\n2.5,2024-01-01\n".to_vec();
    let second = b"Index,Level\nDAX,18000\n".to_vec();
    let summary = summarize(&[
        upload("erste.csv", SourceKind::Csv, first),
        upload("zweite.csv", SourceKind::Csv, second),
    ]);

    let a = summary.find("Datei: erste.csv").expect("first entry present");
    let b = summary
        .find("Datei: zweite.csv")
        .expect("second entry present");
    assert!(a < b, "Entries must keep upload order, got: {summary}");
    assert!(
        summary.contains("\n\nDatei: zweite.csv"),
        "Entries are separated by a blank line, got: {summary}"
    );
}

#[test]
fn summarize_reads_xlsx_workbooks() {
    let xlsx = minimal_xlsx(&["Rate", "Date"], &["2.5", "2024-01-01"]);
    let summary = summarize(&[upload("zinsdaten.xlsx", SourceKind::Spreadsheet, xlsx)]);

    assert!(summary.contains("Datei: zinsdaten.xlsx"), "got: {summary}");
    assert!(summary.contains("Spalten: Rate, Date"), "got: {summary}");
    assert!(summary.contains("2.5"), "got: {summary}");
    assert!(summary.contains("2024-01-01"), "got: {summary}");
}

#[test]
fn summarize_embeds_inline_error_when_nothing_parses() {
    // Invalid UTF-8, so neither the workbook nor the CSV reader accepts it.
    let garbage = vec![0xff, 0xfe, 0x00, 0x01, 0x02, 0xff];
    let summary = summarize(&[
        upload("kaputt.bin", SourceKind::Spreadsheet, garbage),
        upload("ok.csv", SourceKind::Csv, b"Rate\n2.5\n".to_vec()),
    ]);

    assert!(
        summary.contains("Fehler beim Einlesen der Datei kaputt.bin"),
        "Inline error must name the file, got: {summary}"
    );
    assert!(
        summary.contains("Datei: ok.csv"),
        "Later files still summarize, got: {summary}"
    );
}

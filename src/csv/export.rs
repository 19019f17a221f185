use crate::attributes::{MAX_ATTRIBUTE_KEYS, MAX_KEY_LENGTH, REQUIRED_FIELDS, STATUS_VALUES};
use crate::vstore::FileRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::json;

/// Header of the full export.
pub const EXPORT_HEADER: [&str; 7] = [
    "File Name",
    "File ID",
    "Size (bytes)",
    "Created At",
    "Purpose",
    "Vector Store ID",
    "Attributes",
];

/// Header the importer expects.
pub const IMPORT_HEADER: [&str; 2] = ["File Name", "Attributes"];

/// Serialize every record with all of its metadata, one row per file.
pub fn export_csv(records: &[FileRecord]) -> csv::Result<String> {
    let rows = records.iter().map(|r| {
        vec![
            r.filename.clone(),
            r.id.clone(),
            r.bytes.to_string(),
            r.created_at_display(),
            r.purpose.clone(),
            r.vector_store_id.clone(),
            attributes_json(r),
        ]
    });
    let out = write_quoted(header_line(&EXPORT_HEADER), rows)?;
    Ok(into_text(out))
}

/// Serialize records in the two-column layout `parse_import` reads back.
pub fn export_import_layout(records: &[FileRecord]) -> csv::Result<String> {
    let rows = records
        .iter()
        .map(|r| vec![r.filename.clone(), attributes_json(r)]);
    let out = write_quoted(header_line(&IMPORT_HEADER), rows)?;
    Ok(into_text(out))
}

/// A starter CSV documenting the attribute schema, with example rows.
pub fn template_csv() -> csv::Result<String> {
    let examples = [
        (
            "water-quality-standard.pdf",
            json!({
                "title": "Water Quality Standard",
                "documentCategory": "Regulation",
                "documentType": "Standard",
                "year": 2023,
                "version": "2.1",
                "referenceCode": "WQS-2023-01",
                "status": "active",
                "jurisdiction": "National"
            }),
        ),
        (
            "building-code-draft",
            json!({
                "title": "Residential Building Code",
                "documentCategory": "Code",
                "documentType": "Draft Code",
                "year": 2024,
                "version": "0.9",
                "referenceCode": "RBC-2024-D",
                "status": "draft",
                "jurisdiction": "State",
                "author": "Standards Committee"
            }),
        ),
    ];
    let rows = examples
        .iter()
        .map(|(name, attributes)| vec![name.to_string(), attributes.to_string()]);
    let mut out = write_quoted(header_line(&IMPORT_HEADER), rows)?;

    out.extend_from_slice(b"\nInstructions:\n");
    let notes = [
        "1. Put one file per row: the file name in the first column and a JSON object of attributes in the second.".to_string(),
        "2. A file name without an extension also matches the same name ending in .pdf.".to_string(),
        format!("3. Required keys: {}.", REQUIRED_FIELDS.join(", ")),
        "4. year must be a number.".to_string(),
        format!("5. status must be one of: {}.", STATUS_VALUES.join(", ")),
        format!(
            "6. At most {MAX_ATTRIBUTE_KEYS} keys per file and each key at most {MAX_KEY_LENGTH} characters."
        ),
        "7. Any invalid row cancels the whole import; fix it and import again.".to_string(),
    ];
    // Single quoted cells so the importer skips them as short rows.
    let out = write_quoted(out, notes.into_iter().map(|n| vec![n]))?;
    Ok(into_text(out))
}

fn attributes_json(record: &FileRecord) -> String {
    serde_json::to_string(&record.attributes).unwrap_or_else(|_| "{}".to_string())
}

/// The header row is written bare; every data cell is quoted.
fn header_line(columns: &[&str]) -> Vec<u8> {
    let mut line = columns.join(",").into_bytes();
    line.push(b'\n');
    line
}

/// Append rows to `out`, quoting every cell and ending each row with `\n`.
fn write_quoted<I>(out: Vec<u8>, rows: I) -> csv::Result<Vec<u8>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

//! Import parser for the two-column `File Name,Attributes` CSV.
//!
//! Parsing is all-or-nothing: a bad header, unparsable attributes, or a
//! schema violation on any row rejects the whole file, so no remote update
//! runs for a partially valid import.

use crate::attributes::validate_metadata;
use crate::error::{AdminError, AdminResult};
use crate::vstore::AttributeSet;
use tracing::debug;

/// Lines starting with this token are free text, not data.
const INSTRUCTIONS_PREFIX: &str = "Instructions:";

/// One data row of an import CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub file_name: String,
    pub attributes: AttributeSet,
}

/// Split on `\n` or `\r\n`, dropping blank lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .collect()
}

/// Split one CSV line into fields, honoring quoted fields and `""` escapes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// The first column must be "File Name" and the second must mention
/// "Attributes", both case-insensitively.
pub fn validate_header(fields: &[String]) -> AdminResult<()> {
    let first = fields.first().map(|f| f.trim().to_lowercase());
    let second = fields.get(1).map(|f| f.trim().to_lowercase());
    match (first.as_deref(), second.as_deref()) {
        (Some("file name"), Some(s)) if s.contains("attributes") => Ok(()),
        _ => Err(AdminError::InvalidFormat(
            "expected header \"File Name,Attributes\"".to_string(),
        )),
    }
}

fn strip_wrapping_quotes(cell: &str) -> &str {
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        &cell[1..cell.len() - 1]
    } else {
        cell
    }
}

/// Decode an attributes cell into a JSON object.
///
/// Strips one layer of wrapping quotes, turns `\"` into `"`, drops any
/// remaining backslashes, then parses.
pub fn decode_attributes(file_name: &str, cell: &str) -> AdminResult<AttributeSet> {
    let cleaned = strip_wrapping_quotes(cell.trim())
        .replace("\\\"", "\"")
        .replace('\\', "");
    serde_json::from_str(&cleaned).map_err(|source| AdminError::InvalidJson {
        file_name: file_name.to_string(),
        source,
    })
}

/// Parse and validate a whole import CSV.
pub fn parse_import(text: &str) -> AdminResult<Vec<ImportRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines = split_lines(text);
    let (header, data) = lines
        .split_first()
        .ok_or_else(|| AdminError::InvalidFormat("file is empty".to_string()))?;
    validate_header(&parse_csv_line(header))?;

    let mut rows = Vec::new();
    for line in data {
        if line.trim_start().starts_with(INSTRUCTIONS_PREFIX) {
            continue;
        }
        let fields = parse_csv_line(line);
        if fields.len() < 2 {
            continue;
        }
        let file_name = strip_wrapping_quotes(fields[0].trim()).trim().to_string();
        let attributes = decode_attributes(&file_name, &fields[1])?;
        validate_metadata(&file_name, &attributes)?;
        rows.push(ImportRow {
            file_name,
            attributes,
        });
    }

    if rows.is_empty() {
        return Err(AdminError::NoValidRows);
    }
    debug!(rows = rows.len(), "parsed import CSV");
    Ok(rows)
}

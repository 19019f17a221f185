use crate::error::{AdminError, AdminResult};
use crate::vstore::AttributeSet;
use serde_json::Value;

/// Keys every imported document must carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "title",
    "documentCategory",
    "documentType",
    "year",
    "version",
    "referenceCode",
    "status",
    "jurisdiction",
];

/// Allowed values of the `status` key.
pub const STATUS_VALUES: [&str; 5] = ["active", "draft", "superseded", "withdrawn", "legacy"];

/// Check an imported row's attributes against the document metadata schema.
///
/// A key that is absent, `null`, or an empty string counts as missing.
pub fn validate_metadata(file_name: &str, attributes: &AttributeSet) -> AdminResult<()> {
    let violation = |reason: String| AdminError::SchemaViolation {
        file_name: file_name.to_string(),
        reason,
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| is_blank(attributes.get(*field)))
        .collect();
    if !missing.is_empty() {
        return Err(violation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )));
    }

    let year = attributes.get("year").unwrap_or(&Value::Null);
    if !is_numeric(year) {
        return Err(violation(format!("year must be numeric, got {year}")));
    }

    let status = attributes.get("status").unwrap_or(&Value::Null);
    match status.as_str() {
        Some(s) if STATUS_VALUES.contains(&s) => Ok(()),
        _ => Err(violation(format!(
            "status must be one of {}, got {status}",
            STATUS_VALUES.join(", ")
        ))),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

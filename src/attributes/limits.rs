use crate::error::{AdminError, AdminResult};
use crate::vstore::AttributeSet;

/// Most keys a file's attribute map may hold.
pub const MAX_ATTRIBUTE_KEYS: usize = 16;

/// Longest an attribute key may be, in characters.
pub const MAX_KEY_LENGTH: usize = 256;

/// Enforce the service's attribute limits before any remote write.
pub fn check_attribute_limits(attributes: &AttributeSet) -> AdminResult<()> {
    if attributes.len() > MAX_ATTRIBUTE_KEYS {
        return Err(AdminError::AttributeLimit(format!(
            "{} keys given, at most {MAX_ATTRIBUTE_KEYS} allowed",
            attributes.len()
        )));
    }
    if let Some(key) = attributes
        .keys()
        .find(|k| k.chars().count() > MAX_KEY_LENGTH)
    {
        return Err(AdminError::AttributeLimit(format!(
            "key of {} characters exceeds {MAX_KEY_LENGTH}",
            key.chars().count()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs_with(n: usize) -> AttributeSet {
        (0..n).map(|i| (format!("k{i}"), json!(i))).collect()
    }

    #[test]
    fn sixteen_keys_is_allowed() {
        assert!(check_attribute_limits(&attrs_with(16)).is_ok());
    }

    #[test]
    fn seventeen_keys_is_rejected() {
        let err = check_attribute_limits(&attrs_with(17)).unwrap_err();
        assert!(matches!(err, AdminError::AttributeLimit(_)));
        assert!(err.to_string().contains("17 keys"));
    }

    #[test]
    fn key_length_boundary() {
        let mut attrs = AttributeSet::new();
        attrs.insert("k".repeat(MAX_KEY_LENGTH), json!(true));
        assert!(check_attribute_limits(&attrs).is_ok());

        attrs.insert("k".repeat(MAX_KEY_LENGTH + 1), json!(true));
        assert!(matches!(
            check_attribute_limits(&attrs),
            Err(AdminError::AttributeLimit(_))
        ));
    }
}

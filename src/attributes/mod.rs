//! Attribute rules: the service's size limits and the document metadata
//! schema imports must satisfy.

pub mod limits;
pub mod metadata;

pub use limits::{check_attribute_limits, MAX_ATTRIBUTE_KEYS, MAX_KEY_LENGTH};
pub use metadata::{validate_metadata, REQUIRED_FIELDS, STATUS_VALUES};

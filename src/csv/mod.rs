//! CSV export and import of file attributes.

pub mod export;
pub mod parse;

pub use export::{export_csv, export_import_layout, template_csv};
pub use parse::{parse_import, ImportRow};

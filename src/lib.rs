//! Admin tooling for files stored in a hosted vector store: list, edit
//! attributes, delete, upload, and bulk attribute import/export via CSV.

pub mod attributes;
pub mod config;
pub mod csv;
pub mod error;
pub mod import;
pub mod logging;
pub mod session;
pub mod vstore;

pub use error::{AdminError, AdminResult, ApiError};
pub use import::{reconcile, run_import, FailedRow, ImportSummary};
pub use session::{FileDetails, Notice, NoticeKind, Session};

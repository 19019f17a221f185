//! Vector-store file management
//!
//! Talks to the hosted vector-store service, mirrors the selected store's
//! file list in memory, and renders it as a table.

pub mod schema;
pub mod client;
pub mod index;
pub mod storage;
pub mod extract;
pub mod table;

pub use schema::{AttributeSet, FileObject, FileRecord, VectorStoreFile, VectorStoreSummary};
pub use client::{OpenAiClient, VectorStoreApi};
pub use index::FileIndex;
pub use storage::FileStorage;
pub use table::ColumnLayout;

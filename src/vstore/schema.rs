use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value metadata attached to a file inside a vector store.
pub type AttributeSet = Map<String, Value>;

/// A file in the selected vector store, joined with its file object metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub filename: String,
    /// Alternate display name some listings report alongside `filename`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: AttributeSet,
    pub vector_store_id: String,
    pub bytes: u64,
    /// Unix seconds.
    pub created_at: i64,
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl FileRecord {
    /// Join a vector-store file entry with the file object it points at.
    pub fn from_parts(entry: VectorStoreFile, file: Option<FileObject>) -> Self {
        let (filename, bytes, created_at, purpose) = match file {
            Some(f) => (f.filename, f.bytes, f.created_at, f.purpose),
            None => (
                entry.id.clone(),
                entry.usage_bytes,
                entry.created_at,
                String::new(),
            ),
        };
        Self {
            id: entry.id,
            filename,
            name: None,
            attributes: entry.attributes.unwrap_or_default(),
            vector_store_id: entry.vector_store_id,
            bytes,
            created_at,
            purpose,
            status: entry.status,
        }
    }

    /// Creation time rendered as RFC 3339, or the raw number if out of range.
    pub fn created_at_display(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.created_at, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| self.created_at.to_string())
    }
}

/// Entry returned by `GET /vector_stores/{id}/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreFile {
    pub id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub vector_store_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub usage_bytes: u64,
    #[serde(default)]
    pub attributes: Option<AttributeSet>,
}

/// File object returned by `GET /files/{id}` and `POST /files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: i64,
    pub filename: String,
    #[serde(default)]
    pub purpose: String,
}

/// Vector store summary returned by `GET /vector_stores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub usage_bytes: u64,
    #[serde(default)]
    pub file_counts: Option<FileCounts>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileCounts {
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub total: u64,
}

/// Cursor-paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub last_id: Option<String>,
}

/// Body of `POST /vector_stores/{id}/files/{file_id}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateAttributesRequest<'a> {
    pub attributes: &'a AttributeSet,
}

/// Body of `POST /vector_stores/{id}/files`.
#[derive(Debug, Serialize)]
pub(crate) struct AttachFileRequest<'a> {
    pub file_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<&'a AttributeSet>,
}

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;
use vsadmin::vstore::{
    AttributeSet, FileObject, FileRecord, VectorStoreApi, VectorStoreFile, VectorStoreSummary,
};
use vsadmin::ApiError;

/// A call the fake service received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListFiles(String),
    Retrieve(String),
    Update { file_id: String, attributes: AttributeSet },
    Delete(String),
    Upload(String),
}

/// In-process stand-in for the vector-store service.
#[derive(Default)]
pub struct FakeApi {
    pub files: Mutex<Vec<FileRecord>>,
    pub calls: Mutex<Vec<Call>>,
    /// File ids whose updates and deletes are rejected with HTTP 500.
    pub rejects: HashSet<String>,
}

impl FakeApi {
    pub fn with_files(files: Vec<FileRecord>) -> Self {
        Self {
            files: Mutex::new(files),
            ..Self::default()
        }
    }

    pub fn rejecting(mut self, file_id: &str) -> Self {
        self.rejects.insert(file_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn reject(&self, file_id: &str) -> Result<(), ApiError> {
        if self.rejects.contains(file_id) {
            return Err(ApiError::Status {
                status: 500,
                message: "internal error".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStoreApi for FakeApi {
    async fn list_vector_stores(&self) -> Result<Vec<VectorStoreSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn list_files(&self, vector_store_id: &str) -> Result<Vec<FileRecord>, ApiError> {
        self.record(Call::ListFiles(vector_store_id.to_string()));
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.vector_store_id == vector_store_id)
            .cloned()
            .collect())
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, ApiError> {
        self.record(Call::Retrieve(file_id.to_string()));
        let files = self.files.lock().unwrap();
        let f = files
            .iter()
            .find(|f| f.id == file_id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "No such file".into(),
            })?;
        Ok(FileObject {
            id: f.id.clone(),
            bytes: f.bytes,
            created_at: f.created_at,
            filename: f.filename.clone(),
            purpose: f.purpose.clone(),
        })
    }

    async fn update_attributes(
        &self,
        vector_store_id: &str,
        file_id: &str,
        attributes: &AttributeSet,
    ) -> Result<VectorStoreFile, ApiError> {
        self.record(Call::Update {
            file_id: file_id.to_string(),
            attributes: attributes.clone(),
        });
        self.reject(file_id)?;
        let mut files = self.files.lock().unwrap();
        if let Some(f) = files.iter_mut().find(|f| f.id == file_id) {
            f.attributes = attributes.clone();
        }
        Ok(VectorStoreFile {
            id: file_id.to_string(),
            created_at: 0,
            vector_store_id: vector_store_id.to_string(),
            status: Some("completed".into()),
            usage_bytes: 0,
            attributes: Some(attributes.clone()),
        })
    }

    async fn delete_file(&self, _vector_store_id: &str, file_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(file_id.to_string()));
        self.reject(file_id)?;
        self.files.lock().unwrap().retain(|f| f.id != file_id);
        Ok(())
    }

    async fn upload_file(
        &self,
        vector_store_id: &str,
        filename: &str,
        _mime_type: &str,
        data: Vec<u8>,
        attributes: Option<&AttributeSet>,
    ) -> Result<FileRecord, ApiError> {
        self.record(Call::Upload(filename.to_string()));
        let record = FileRecord {
            id: format!("file-{}", self.files.lock().unwrap().len() + 1),
            filename: filename.to_string(),
            name: None,
            attributes: attributes.cloned().unwrap_or_default(),
            vector_store_id: vector_store_id.to_string(),
            bytes: data.len() as u64,
            created_at: 1_700_000_000,
            purpose: "assistants".into(),
            status: Some("in_progress".into()),
        };
        self.files.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

pub const STORE: &str = "vs_test";

pub fn file(id: &str, filename: &str, attributes: Value) -> FileRecord {
    FileRecord {
        id: id.into(),
        filename: filename.into(),
        name: None,
        attributes: attributes.as_object().cloned().unwrap_or_default(),
        vector_store_id: STORE.into(),
        bytes: 1024,
        created_at: 1_700_000_000,
        purpose: "assistants".into(),
        status: Some("completed".into()),
    }
}

/// Attributes that satisfy the document metadata schema.
pub fn valid_metadata(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "documentCategory": "Regulation",
        "documentType": "Standard",
        "year": 2023,
        "version": "1.0",
        "referenceCode": "REF-1",
        "status": "active",
        "jurisdiction": "National"
    })
}

/// Build a `File Name,Attributes` CSV from (name, attributes) pairs.
pub fn import_csv(rows: &[(&str, Value)]) -> String {
    let mut lines = vec!["File Name,Attributes".to_string()];
    for (name, attrs) in rows {
        lines.push(format!(
            "\"{}\",\"{}\"",
            name,
            attrs.to_string().replace('"', "\"\"")
        ));
    }
    lines.join("\n")
}

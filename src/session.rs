//! Per-store admin session.
//!
//! Owns the in-memory mirror of the selected vector store and routes every
//! mutation through the service first. The mirror only changes after the
//! service confirms.

use crate::attributes::check_attribute_limits;
use crate::error::{AdminError, AdminResult, ApiError};
use crate::vstore::{AttributeSet, FileIndex, FileObject, FileRecord, VectorStoreApi};
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short user-facing message about the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// What is known about one file: the mirrored record, or the service's file
/// object when the file is not in the selected store.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FileDetails<'a> {
    Mirrored(&'a FileRecord),
    Remote(FileObject),
}

pub struct Session<A> {
    api: A,
    vector_store_id: String,
    index: FileIndex,
    notices: Vec<Notice>,
}

impl<A: VectorStoreApi> Session<A> {
    pub fn new(api: A, vector_store_id: impl Into<String>) -> Self {
        Self {
            api,
            vector_store_id: vector_store_id.into(),
            index: FileIndex::new(),
            notices: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn vector_store_id(&self) -> &str {
        &self.vector_store_id
    }

    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    pub fn files(&self) -> &[FileRecord] {
        self.index.records()
    }

    /// Switch to another vector store. The mirror and pending notices are
    /// reset; call [`Session::refresh`] to load the new store.
    pub fn select_vector_store(&mut self, vector_store_id: impl Into<String>) {
        let id = vector_store_id.into();
        if id != self.vector_store_id {
            self.vector_store_id = id;
            self.index.clear();
            self.notices.clear();
        }
    }

    /// Reload the file list from the service.
    pub async fn refresh(&mut self) -> AdminResult<&[FileRecord]> {
        let records = self.api.list_files(&self.vector_store_id).await?;
        info!(
            vector_store_id = %self.vector_store_id,
            files = records.len(),
            "loaded file list"
        );
        self.index.replace_all(records);
        Ok(self.index.records())
    }

    /// Fetch the service's file object for one file.
    pub async fn retrieve(&self, file_id: &str) -> AdminResult<FileObject> {
        self.api.retrieve_file(file_id).await.map_err(|e| match e {
            ApiError::Status { status: 404, .. } => AdminError::NotFound {
                file_id: file_id.to_string(),
            },
            other => other.into(),
        })
    }

    /// Describe a file from the mirror, fetching it only when it is not there.
    pub async fn describe(&self, file_id: &str) -> AdminResult<FileDetails<'_>> {
        match self.index.get(file_id) {
            Some(record) => Ok(FileDetails::Mirrored(record)),
            None => self.retrieve(file_id).await.map(FileDetails::Remote),
        }
    }

    /// Replace a file's attributes. Limits are checked before the remote call.
    pub async fn update_attributes(
        &mut self,
        file_id: &str,
        attributes: AttributeSet,
    ) -> AdminResult<()> {
        if let Err(e) = check_attribute_limits(&attributes) {
            self.notify(NoticeKind::Error, format!("Failed to update attributes: {e}"));
            return Err(e);
        }

        let result = self
            .api
            .update_attributes(&self.vector_store_id, file_id, &attributes)
            .await;
        match result {
            Ok(updated) => {
                let confirmed = updated.attributes.unwrap_or(attributes);
                self.index.replace_attributes(file_id, confirmed);
                self.notify(NoticeKind::Success, format!("Updated attributes of {file_id}"));
                Ok(())
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("Failed to update attributes: {e}"));
                Err(e.into())
            }
        }
    }

    /// Delete a file from the store. The mirror entry goes only on success.
    pub async fn delete_file(&mut self, file_id: &str) -> AdminResult<()> {
        let result = self.api.delete_file(&self.vector_store_id, file_id).await;
        match result {
            Ok(()) => {
                let label = self
                    .index
                    .remove(file_id)
                    .map(|r| r.filename)
                    .unwrap_or_else(|| file_id.to_string());
                self.notify(NoticeKind::Success, format!("Deleted {label}"));
                Ok(())
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("Failed to delete {file_id}: {e}"));
                Err(e.into())
            }
        }
    }

    /// Upload a file and attach it to the store, optionally with attributes.
    pub async fn upload_file(
        &mut self,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
        attributes: Option<AttributeSet>,
    ) -> AdminResult<FileRecord> {
        if let Some(attrs) = &attributes {
            check_attribute_limits(attrs)?;
        }
        let result = self
            .api
            .upload_file(
                &self.vector_store_id,
                filename,
                mime_type,
                data,
                attributes.as_ref(),
            )
            .await;
        match result {
            Ok(record) => {
                self.notify(
                    NoticeKind::Success,
                    format!("Uploaded {} as {}", record.filename, record.id),
                );
                self.index.insert(record.clone());
                Ok(record)
            }
            Err(e) => {
                self.notify(NoticeKind::Error, format!("Failed to upload {filename}: {e}"));
                Err(e.into())
            }
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, kind: NoticeKind, message: String) {
        match kind {
            NoticeKind::Success => info!("{message}"),
            NoticeKind::Error => error!("{message}"),
        }
        self.notices.push(Notice { kind, message });
    }
}

//! Vector-store service client.
//!
//! [`VectorStoreApi`] is the seam between the admin logic and the hosted
//! service; [`OpenAiClient`] implements it against an OpenAI-compatible
//! `/v1` REST API.

use super::schema::{
    AttachFileRequest, AttributeSet, FileObject, FileRecord, ListPage, UpdateAttributesRequest,
    VectorStoreFile, VectorStoreSummary,
};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const PAGE_LIMIT: &str = "100";
const UPLOAD_PURPOSE: &str = "assistants";

/// Operations the admin tool consumes from the vector-store service.
#[async_trait]
pub trait VectorStoreApi: Send + Sync {
    /// List every vector store visible to the API key.
    async fn list_vector_stores(&self) -> Result<Vec<VectorStoreSummary>, ApiError>;

    /// List every file in a vector store, joined with file object metadata.
    async fn list_files(&self, vector_store_id: &str) -> Result<Vec<FileRecord>, ApiError>;

    /// Retrieve a single file object.
    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, ApiError>;

    /// Replace the attribute map of a file in a vector store.
    async fn update_attributes(
        &self,
        vector_store_id: &str,
        file_id: &str,
        attributes: &AttributeSet,
    ) -> Result<VectorStoreFile, ApiError>;

    /// Remove a file from a vector store, then delete the file object.
    ///
    /// Succeeds once the file is detached from the store; a failure to
    /// delete the underlying file object is only logged.
    async fn delete_file(&self, vector_store_id: &str, file_id: &str) -> Result<(), ApiError>;

    /// Upload a new file and attach it to a vector store.
    async fn upload_file(
        &self,
        vector_store_id: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
        attributes: Option<&AttributeSet>,
    ) -> Result<FileRecord, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed client for an OpenAI-compatible API.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn paginate<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let mut request = self
                .client
                .get(self.url(path))
                .query(&[("limit", PAGE_LIMIT)]);
            if let Some(cursor) = after.as_deref() {
                request = request.query(&[("after", cursor)]);
            }
            let page: ListPage<T> = self.send(request).await?;
            debug!(path, count = page.data.len(), has_more = page.has_more, "fetched page");
            items.extend(page.data);
            match (page.has_more, page.last_id) {
                (true, Some(last)) => after = Some(last),
                _ => break,
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl VectorStoreApi for OpenAiClient {
    async fn list_vector_stores(&self) -> Result<Vec<VectorStoreSummary>, ApiError> {
        self.paginate("vector_stores").await
    }

    async fn list_files(&self, vector_store_id: &str) -> Result<Vec<FileRecord>, ApiError> {
        let entries: Vec<VectorStoreFile> = self
            .paginate(&format!("vector_stores/{vector_store_id}/files"))
            .await?;

        let mut records = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if entry.vector_store_id.is_empty() {
                entry.vector_store_id = vector_store_id.to_string();
            }
            let file = match self.retrieve_file(&entry.id).await {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!(file_id = %entry.id, error = %e, "could not retrieve file object");
                    None
                }
            };
            records.push(FileRecord::from_parts(entry, file));
        }
        Ok(records)
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, ApiError> {
        debug!(file_id, "retrieving file");
        self.send(self.client.get(self.url(&format!("files/{file_id}"))))
            .await
    }

    async fn update_attributes(
        &self,
        vector_store_id: &str,
        file_id: &str,
        attributes: &AttributeSet,
    ) -> Result<VectorStoreFile, ApiError> {
        debug!(vector_store_id, file_id, keys = attributes.len(), "updating attributes");
        let request = self
            .client
            .post(self.url(&format!("vector_stores/{vector_store_id}/files/{file_id}")))
            .json(&UpdateAttributesRequest { attributes });
        self.send(request).await
    }

    async fn delete_file(&self, vector_store_id: &str, file_id: &str) -> Result<(), ApiError> {
        debug!(vector_store_id, file_id, "deleting file");
        let _: serde_json::Value = self
            .send(
                self.client
                    .delete(self.url(&format!("vector_stores/{vector_store_id}/files/{file_id}"))),
            )
            .await?;

        let deleted: Result<serde_json::Value, ApiError> = self
            .send(self.client.delete(self.url(&format!("files/{file_id}"))))
            .await;
        // The detach above already removed the file from the store.
        match deleted {
            Ok(_) | Err(ApiError::Status { status: 404, .. }) => {}
            Err(e) => warn!(file_id, error = %e, "detached file but could not delete file object"),
        }
        Ok(())
    }

    async fn upload_file(
        &self,
        vector_store_id: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
        attributes: Option<&AttributeSet>,
    ) -> Result<FileRecord, ApiError> {
        debug!(vector_store_id, filename, size = data.len(), "uploading file");
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().text("purpose", UPLOAD_PURPOSE).part("file", part);
        let file: FileObject = self
            .send(self.client.post(self.url("files")).multipart(form))
            .await?;

        let request = self
            .client
            .post(self.url(&format!("vector_stores/{vector_store_id}/files")))
            .json(&AttachFileRequest {
                file_id: &file.id,
                attributes,
            });
        let mut entry: VectorStoreFile = self.send(request).await?;
        if entry.vector_store_id.is_empty() {
            entry.vector_store_id = vector_store_id.to_string();
        }
        Ok(FileRecord::from_parts(entry, Some(file)))
    }
}

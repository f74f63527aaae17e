//! Document upload pipeline
//!
//! One `submit` call runs a full attempt: local validation, image
//! normalization, blob upload, metadata record insert, and remote
//! verification. A failure anywhere after the blob exists triggers
//! best-effort compensating cleanup so a failed attempt leaves nothing the
//! session can reach.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use core_kernel::{DocumentId, OperationMetadata, ProfileId, VerificationStatus};

use crate::error::DocumentError;
use crate::normalize::{self, MAX_DIMENSION};
use crate::ports::{BlobStoragePort, DocumentRecordPort, DocumentVerifierPort, NewDocumentRecord};

/// Upload size cap, checked before any port call
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for identity documents
pub const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Document category stored on the metadata record
const DOCUMENT_TYPE: &str = "identity";

/// Where an upload attempt currently is, for UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Idle,
    Validating,
    Normalizing,
    Uploading,
    RecordingMetadata,
    RemoteVerifying,
    Verified,
    Failed,
    /// The file failed local validation; nothing left the process
    RejectedLocally,
}

/// An uploaded file as received from the form
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload attempt
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub document_id: DocumentId,
    pub file_name: String,
    pub status: VerificationStatus,
    pub details: Option<serde_json::Value>,
}

/// Runs document upload attempts against the three backing ports
pub struct DocumentClient {
    storage: Arc<dyn BlobStoragePort>,
    records: Arc<dyn DocumentRecordPort>,
    verifier: Arc<dyn DocumentVerifierPort>,
    stage: RwLock<UploadStage>,
}

impl DocumentClient {
    pub fn new(
        storage: Arc<dyn BlobStoragePort>,
        records: Arc<dyn DocumentRecordPort>,
        verifier: Arc<dyn DocumentVerifierPort>,
    ) -> Self {
        Self {
            storage,
            records,
            verifier,
            stage: RwLock::new(UploadStage::Idle),
        }
    }

    /// Stage of the most recent attempt
    pub async fn stage(&self) -> UploadStage {
        *self.stage.read().await
    }

    async fn set_stage(&self, stage: UploadStage) {
        debug!(?stage, "upload stage");
        *self.stage.write().await = stage;
    }

    /// Runs one upload attempt end to end
    ///
    /// # Errors
    ///
    /// `LocalValidation` when the file's type or size is unacceptable (no
    /// port is called); `Normalize` when the bytes do not decode;
    /// `Transfer` when the blob upload or record insert fails;
    /// `RemoteVerification` when the verifier rejects the document or is
    /// unreachable. Everything stored by a failed attempt is cleaned up
    /// best-effort before the error is returned.
    pub async fn submit(
        &self,
        profile_id: ProfileId,
        file: DocumentFile,
    ) -> Result<DocumentOutcome, DocumentError> {
        self.set_stage(UploadStage::Validating).await;

        if !ACCEPTED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            self.set_stage(UploadStage::RejectedLocally).await;
            return Err(DocumentError::local(format!(
                "unsupported content type {}",
                file.content_type
            )));
        }
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            self.set_stage(UploadStage::RejectedLocally).await;
            return Err(DocumentError::local(format!(
                "file is {} bytes, limit is {MAX_UPLOAD_BYTES}",
                file.bytes.len()
            )));
        }

        self.set_stage(UploadStage::Normalizing).await;
        let normalized = match normalize::normalize(&file.bytes, MAX_DIMENSION, MAX_DIMENSION) {
            Ok(normalized) => normalized,
            Err(error) => {
                self.set_stage(UploadStage::Failed).await;
                return Err(error.into());
            }
        };

        let object_name = object_name_for(&file.file_name);
        let metadata = OperationMetadata::with_correlation_id(object_name.clone());

        self.set_stage(UploadStage::Uploading).await;
        if let Err(error) = self
            .storage
            .put(
                &object_name,
                "image/jpeg",
                normalized.jpeg_bytes.clone(),
                Some(metadata.clone()),
            )
            .await
        {
            self.set_stage(UploadStage::Failed).await;
            return Err(DocumentError::transfer("blob upload", error));
        }

        let file_url = match self.storage.public_url(&object_name, Some(metadata.clone())).await {
            Ok(url) => url,
            Err(error) => {
                self.cleanup(&object_name, None).await;
                self.set_stage(UploadStage::Failed).await;
                return Err(DocumentError::transfer("public url", error));
            }
        };

        self.set_stage(UploadStage::RecordingMetadata).await;
        let record = match self
            .records
            .create(
                NewDocumentRecord {
                    profile_id,
                    file_url: file_url.clone(),
                    document_type: DOCUMENT_TYPE.to_string(),
                },
                Some(metadata.clone()),
            )
            .await
        {
            Ok(record) => record,
            Err(error) => {
                self.cleanup(&object_name, None).await;
                self.set_stage(UploadStage::Failed).await;
                return Err(DocumentError::transfer("metadata record", error));
            }
        };

        self.set_stage(UploadStage::RemoteVerifying).await;
        let report = match self
            .verifier
            .verify(record.id, &file_url, &normalized.data_url(), Some(metadata))
            .await
        {
            Ok(report) => report,
            Err(error) => {
                self.cleanup(&object_name, Some(record.id)).await;
                self.set_stage(UploadStage::Failed).await;
                return Err(DocumentError::RemoteVerification(error.to_string()));
            }
        };

        if !report.success {
            self.cleanup(&object_name, Some(record.id)).await;
            self.set_stage(UploadStage::Failed).await;
            return Err(DocumentError::RemoteVerification(
                report
                    .error
                    .unwrap_or_else(|| "document rejected".to_string()),
            ));
        }

        self.set_stage(UploadStage::Verified).await;
        info!(document_id = %record.id, "document verified");

        Ok(DocumentOutcome {
            document_id: record.id,
            file_name: file.file_name,
            status: report.status.unwrap_or(VerificationStatus::Verified),
            details: report.details,
        })
    }

    /// Removes a stored document, blob and record
    ///
    /// Each step is best-effort: a failure is logged and the next step still
    /// runs, so the caller can always clear the draft afterwards.
    pub async fn remove(&self, document_id: DocumentId) {
        match self.records.fetch(document_id, None).await {
            Ok(record) => {
                if let Some(object_name) = object_name_from_url(&record.file_url) {
                    if let Err(error) = self.storage.delete(object_name, None).await {
                        warn!(%document_id, %error, "blob delete failed during remove");
                    }
                }
            }
            Err(error) => {
                warn!(%document_id, %error, "record fetch failed during remove");
            }
        }

        if let Err(error) = self.records.delete(document_id, None).await {
            warn!(%document_id, %error, "record delete failed during remove");
        }
        self.set_stage(UploadStage::Idle).await;
    }

    /// Compensating cleanup after a failed attempt
    ///
    /// Deletes the blob, then the record. Failures are logged at warn and
    /// swallowed so the original error reaches the caller.
    async fn cleanup(&self, object_name: &str, record_id: Option<DocumentId>) {
        if let Err(error) = self.storage.delete(object_name, None).await {
            warn!(object_name, %error, "blob cleanup failed");
        }
        if let Some(id) = record_id {
            if let Err(error) = self.records.delete(id, None).await {
                warn!(document_id = %id, %error, "record cleanup failed");
            }
        }
    }
}

/// Fresh random object name keeping the original extension
fn object_name_for(file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("jpg");
    format!("{}.{}", Uuid::new_v4(), extension)
}

/// Extracts the object name back out of a public URL
fn object_name_from_url(file_url: &str) -> Option<&str> {
    file_url.rsplit('/').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_keeps_extension() {
        let name = object_name_for("selfie.PNG");
        assert!(name.ends_with(".PNG"));
        assert_eq!(name.len(), 36 + 1 + 3);

        let fallback = object_name_for("noextension");
        assert!(fallback.ends_with(".jpg"));
    }

    #[test]
    fn test_object_name_from_url() {
        assert_eq!(
            object_name_from_url("https://blobs.test/documents/abc.jpg"),
            Some("abc.jpg")
        );
        assert_eq!(object_name_from_url("https://blobs.test/documents/"), None);
    }
}

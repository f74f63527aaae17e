//! Document Domain Ports
//!
//! Three ports back the upload pipeline: blob storage for the image bytes,
//! a metadata record store, and the remote verifier. The `infra_remote`
//! crate provides the REST adapters; the `mock` module here provides
//! in-memory adapters for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    DocumentId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
    ProfileId, VerificationStatus,
};

/// A stored document metadata record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub profile_id: ProfileId,
    /// Public URL of the stored blob
    pub file_url: String,
    /// Document category, currently always `"identity"`
    pub document_type: String,
    pub verification_status: VerificationStatus,
    /// Verifier output, shape owned by the verifier
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a document metadata record
#[derive(Debug, Clone)]
pub struct NewDocumentRecord {
    pub profile_id: ProfileId,
    pub file_url: String,
    pub document_type: String,
}

/// The verifier's verdict on a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub success: bool,
    pub status: Option<VerificationStatus>,
    pub details: Option<serde_json::Value>,
    pub error: Option<String>,
}

/// Port for document blob storage
#[async_trait]
pub trait BlobStoragePort: DomainPort + HealthCheckable {
    /// Stores a blob under an object name
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Resolves the public URL for an object
    async fn public_url(
        &self,
        object_name: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<String, PortError>;

    /// Deletes an object; deleting an absent object is not an error
    async fn delete(
        &self,
        object_name: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Port for document metadata records
#[async_trait]
pub trait DocumentRecordPort: DomainPort + HealthCheckable {
    /// Creates a record with status pending and returns it
    async fn create(
        &self,
        record: NewDocumentRecord,
        metadata: Option<OperationMetadata>,
    ) -> Result<DocumentRecord, PortError>;

    /// Fetches a record by id
    async fn fetch(
        &self,
        id: DocumentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<DocumentRecord, PortError>;

    /// Deletes a record by id
    async fn delete(
        &self,
        id: DocumentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Port for the remote document verifier
#[async_trait]
pub trait DocumentVerifierPort: DomainPort + HealthCheckable {
    /// Submits a document for verification
    ///
    /// `image_payload` is the normalized image as a `data:image/jpeg`
    /// base64 payload.
    async fn verify(
        &self,
        document_id: DocumentId,
        file_url: &str,
        image_payload: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<VerificationReport, PortError>;
}

/// In-memory mock adapters for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn healthy(adapter_id: &str) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: core_kernel::AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("Mock adapter always healthy".to_string()),
            checked_at: Utc::now(),
        }
    }

    /// In-memory mock implementation of BlobStoragePort
    #[derive(Debug, Default)]
    pub struct MockBlobStoragePort {
        blobs: Arc<RwLock<HashMap<String, (String, Vec<u8>)>>>,
        put_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        fail_put: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl MockBlobStoragePort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_puts(&self) {
            self.fail_put.store(true, Ordering::SeqCst);
        }

        pub fn fail_deletes(&self) {
            self.fail_delete.store(true, Ordering::SeqCst);
        }

        pub fn put_count(&self) -> usize {
            self.put_calls.load(Ordering::SeqCst)
        }

        pub fn delete_count(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }

        pub async fn stored_objects(&self) -> Vec<String> {
            self.blobs.read().await.keys().cloned().collect()
        }
    }

    impl DomainPort for MockBlobStoragePort {}

    #[async_trait]
    impl HealthCheckable for MockBlobStoragePort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-blob-storage-port")
        }
    }

    #[async_trait]
    impl BlobStoragePort for MockBlobStoragePort {
        async fn put(
            &self,
            object_name: &str,
            content_type: &str,
            bytes: Vec<u8>,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.put_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_put.load(Ordering::SeqCst) {
                return Err(PortError::connection("blob store unavailable"));
            }
            self.blobs
                .write()
                .await
                .insert(object_name.to_string(), (content_type.to_string(), bytes));
            Ok(())
        }

        async fn public_url(
            &self,
            object_name: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<String, PortError> {
            Ok(format!("https://blobs.test/documents/{object_name}"))
        }

        async fn delete(
            &self,
            object_name: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(PortError::connection("blob store unavailable"));
            }
            self.blobs.write().await.remove(object_name);
            Ok(())
        }
    }

    /// In-memory mock implementation of DocumentRecordPort
    #[derive(Debug, Default)]
    pub struct MockDocumentRecordPort {
        records: Arc<RwLock<HashMap<DocumentId, DocumentRecord>>>,
        create_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        fail_create: AtomicBool,
    }

    impl MockDocumentRecordPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_creates(&self) {
            self.fail_create.store(true, Ordering::SeqCst);
        }

        pub fn create_count(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn delete_count(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }

        pub async fn stored_records(&self) -> Vec<DocumentRecord> {
            self.records.read().await.values().cloned().collect()
        }
    }

    impl DomainPort for MockDocumentRecordPort {}

    #[async_trait]
    impl HealthCheckable for MockDocumentRecordPort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-document-record-port")
        }
    }

    #[async_trait]
    impl DocumentRecordPort for MockDocumentRecordPort {
        async fn create(
            &self,
            record: NewDocumentRecord,
            _metadata: Option<OperationMetadata>,
        ) -> Result<DocumentRecord, PortError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(PortError::connection("record store unavailable"));
            }
            let stored = DocumentRecord {
                id: DocumentId::new(),
                profile_id: record.profile_id,
                file_url: record.file_url,
                document_type: record.document_type,
                verification_status: VerificationStatus::Pending,
                details: None,
                created_at: Utc::now(),
            };
            self.records.write().await.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn fetch(
            &self,
            id: DocumentId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<DocumentRecord, PortError> {
            self.records
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("DocumentRecord", id))
        }

        async fn delete(
            &self,
            id: DocumentId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.records.write().await.remove(&id);
            Ok(())
        }
    }

    /// In-memory mock implementation of DocumentVerifierPort
    #[derive(Debug)]
    pub struct MockDocumentVerifierPort {
        report: RwLock<VerificationReport>,
        verify_calls: AtomicUsize,
        fail_transport: AtomicBool,
        last_payload: RwLock<Option<String>>,
    }

    impl Default for MockDocumentVerifierPort {
        fn default() -> Self {
            Self {
                report: RwLock::new(VerificationReport {
                    success: true,
                    status: Some(VerificationStatus::Verified),
                    details: None,
                    error: None,
                }),
                verify_calls: AtomicUsize::new(0),
                fail_transport: AtomicBool::new(false),
                last_payload: RwLock::new(None),
            }
        }
    }

    impl MockDocumentVerifierPort {
        /// Verifier that accepts everything
        pub fn new() -> Self {
            Self::default()
        }

        /// Arms the verifier to answer with a rejection
        pub async fn reject_with(&self, error: impl Into<String>) {
            *self.report.write().await = VerificationReport {
                success: false,
                status: Some(VerificationStatus::Failed),
                details: None,
                error: Some(error.into()),
            };
        }

        /// Arms the verifier to fail at the transport level
        pub fn fail_transport(&self) {
            self.fail_transport.store(true, Ordering::SeqCst);
        }

        pub fn verify_count(&self) -> usize {
            self.verify_calls.load(Ordering::SeqCst)
        }

        pub async fn last_payload(&self) -> Option<String> {
            self.last_payload.read().await.clone()
        }
    }

    impl DomainPort for MockDocumentVerifierPort {}

    #[async_trait]
    impl HealthCheckable for MockDocumentVerifierPort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-document-verifier-port")
        }
    }

    #[async_trait]
    impl DocumentVerifierPort for MockDocumentVerifierPort {
        async fn verify(
            &self,
            _document_id: DocumentId,
            _file_url: &str,
            image_payload: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<VerificationReport, PortError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_transport.load(Ordering::SeqCst) {
                return Err(PortError::Timeout {
                    operation: "verify_document".to_string(),
                    duration_ms: 5000,
                });
            }
            *self.last_payload.write().await = Some(image_payload.to_string());
            Ok(self.report.read().await.clone())
        }
    }
}

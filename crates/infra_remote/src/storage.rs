//! REST adapter for document blob storage

use async_trait::async_trait;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_document::BlobStoragePort;

use crate::client::RestClient;

/// Bucket holding uploaded identity documents
const BUCKET: &str = "documents";

/// Blob storage backed by the backend's storage API
#[derive(Debug, Clone)]
pub struct RestStorageAdapter {
    client: RestClient,
}

impl RestStorageAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestStorageAdapter {}

#[async_trait]
impl HealthCheckable for RestStorageAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-storage-adapter").await
    }
}

#[async_trait]
impl BlobStoragePort for RestStorageAdapter {
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .post_bytes(
                &format!("storage/v1/object/{BUCKET}/{object_name}"),
                content_type,
                bytes,
                "blob upload",
            )
            .await
    }

    async fn public_url(
        &self,
        object_name: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<String, PortError> {
        // Deterministic; no round trip needed
        Ok(format!(
            "{}/storage/v1/object/public/{BUCKET}/{object_name}",
            self.client.base_url()
        ))
    }

    async fn delete(
        &self,
        object_name: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .delete(
                &format!("storage/v1/object/{BUCKET}/{object_name}"),
                "blob delete",
            )
            .await
    }
}

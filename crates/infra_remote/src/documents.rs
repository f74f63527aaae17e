//! REST adapter for document metadata records

use async_trait::async_trait;

use core_kernel::{
    DocumentId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_document::{DocumentRecord, DocumentRecordPort, NewDocumentRecord};

use crate::client::RestClient;

/// Document metadata storage backed by the backend's `documents` table
#[derive(Debug, Clone)]
pub struct RestDocumentAdapter {
    client: RestClient,
}

impl RestDocumentAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestDocumentAdapter {}

#[async_trait]
impl HealthCheckable for RestDocumentAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-document-adapter").await
    }
}

#[async_trait]
impl DocumentRecordPort for RestDocumentAdapter {
    async fn create(
        &self,
        record: NewDocumentRecord,
        _metadata: Option<OperationMetadata>,
    ) -> Result<DocumentRecord, PortError> {
        let body = serde_json::json!({
            "profile_id": record.profile_id,
            "file_url": record.file_url,
            "document_type": record.document_type,
            "verification_status": "pending",
        });
        let rows: Vec<DocumentRecord> = self
            .client
            .post_json("rest/v1/documents", &body, "insert document record")
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PortError::internal("insert document record: empty representation"))
    }

    async fn fetch(
        &self,
        id: DocumentId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<DocumentRecord, PortError> {
        let rows: Vec<DocumentRecord> = self
            .client
            .get_json(
                &format!("rest/v1/documents?id=eq.{}&select=*", id.as_uuid()),
                "fetch document record",
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PortError::not_found("DocumentRecord", id))
    }

    async fn delete(
        &self,
        id: DocumentId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .delete(
                &format!("rest/v1/documents?id=eq.{}", id.as_uuid()),
                "delete document record",
            )
            .await
    }
}

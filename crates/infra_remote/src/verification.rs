//! REST adapter for the document verification function

use async_trait::async_trait;
use serde::Serialize;

use core_kernel::{
    DocumentId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_document::{DocumentVerifierPort, VerificationReport};

use crate::client::RestClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    document_id: DocumentId,
    document_url: &'a str,
    image_data: &'a str,
}

/// Verifier backed by the backend's `verify-document` function
#[derive(Debug, Clone)]
pub struct RestVerifierAdapter {
    client: RestClient,
}

impl RestVerifierAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestVerifierAdapter {}

#[async_trait]
impl HealthCheckable for RestVerifierAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-verifier-adapter").await
    }
}

#[async_trait]
impl DocumentVerifierPort for RestVerifierAdapter {
    async fn verify(
        &self,
        document_id: DocumentId,
        file_url: &str,
        image_payload: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<VerificationReport, PortError> {
        self.client
            .post_json(
                "functions/v1/verify-document",
                &VerifyRequest {
                    document_id,
                    document_url: file_url,
                    image_data: image_payload,
                },
                "verify document",
            )
            .await
    }
}

//! REST adapter for the confirmation email function

use async_trait::async_trait;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_registration::{ConfirmationEmail, EmailPort};

use crate::client::RestClient;

/// Email delivery backed by the backend's `send-confirmation` function
#[derive(Debug, Clone)]
pub struct RestEmailAdapter {
    client: RestClient,
}

impl RestEmailAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestEmailAdapter {}

#[async_trait]
impl HealthCheckable for RestEmailAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-email-adapter").await
    }
}

#[async_trait]
impl EmailPort for RestEmailAdapter {
    async fn send_confirmation(
        &self,
        email: ConfirmationEmail,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .post_json_unit("functions/v1/send-confirmation", &email, "send confirmation")
            .await
    }
}

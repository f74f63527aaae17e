//! REST adapter for fan profile storage

use async_trait::async_trait;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_registration::{FanProfile, NewFanProfile, ProfilePort};

use crate::client::RestClient;

/// Profile storage backed by the backend's `profiles` table
#[derive(Debug, Clone)]
pub struct RestProfileAdapter {
    client: RestClient,
}

impl RestProfileAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestProfileAdapter {}

#[async_trait]
impl HealthCheckable for RestProfileAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-profile-adapter").await
    }
}

#[async_trait]
impl ProfilePort for RestProfileAdapter {
    async fn find_by_cpf(
        &self,
        cpf: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<FanProfile>, PortError> {
        let rows: Vec<FanProfile> = self
            .client
            .get_json(
                &format!("rest/v1/profiles?cpf=eq.{cpf}&select=*"),
                "find profile by cpf",
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(
        &self,
        profile: NewFanProfile,
        _metadata: Option<OperationMetadata>,
    ) -> Result<FanProfile, PortError> {
        let rows: Vec<FanProfile> = self
            .client
            .post_json("rest/v1/profiles", &profile, "insert profile")
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PortError::internal("insert profile: empty representation"))
    }
}

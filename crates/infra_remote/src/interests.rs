//! REST adapter for gaming-interest and fandom records

use async_trait::async_trait;
use serde::Deserialize;

use core_kernel::{
    DomainPort, FandomRecordId, GamingRecordId, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};
use domain_registration::{InterestPort, NewFandomRecord, NewGamingInterests};

use crate::client::RestClient;

#[derive(Debug, Deserialize)]
struct InsertedGamingRow {
    id: GamingRecordId,
}

#[derive(Debug, Deserialize)]
struct InsertedFandomRow {
    id: FandomRecordId,
}

/// Interest storage backed by the backend's `gaming_interests` and
/// `fandom_records` tables
#[derive(Debug, Clone)]
pub struct RestInterestAdapter {
    client: RestClient,
}

impl RestInterestAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestInterestAdapter {}

#[async_trait]
impl HealthCheckable for RestInterestAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-interest-adapter").await
    }
}

#[async_trait]
impl InterestPort for RestInterestAdapter {
    async fn insert_gaming(
        &self,
        record: NewGamingInterests,
        _metadata: Option<OperationMetadata>,
    ) -> Result<GamingRecordId, PortError> {
        let rows: Vec<InsertedGamingRow> = self
            .client
            .post_json("rest/v1/gaming_interests", &record, "insert gaming interests")
            .await?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| PortError::internal("insert gaming interests: empty representation"))
    }

    async fn insert_fandom(
        &self,
        record: NewFandomRecord,
        _metadata: Option<OperationMetadata>,
    ) -> Result<FandomRecordId, PortError> {
        let rows: Vec<InsertedFandomRow> = self
            .client
            .post_json("rest/v1/fandom_records", &record, "insert fandom record")
            .await?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| PortError::internal("insert fandom record: empty representation"))
    }
}

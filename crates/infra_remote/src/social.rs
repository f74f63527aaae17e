//! REST adapter for the social OAuth functions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError, ProfileId,
};
use domain_social::{AuthSession, SocialAuthPort, SocialPlatform};

use crate::client::RestClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BeginRequest {
    platform: SocialPlatform,
    profile_id: ProfileId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BeginResponse {
    auth_url: String,
    state: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    code: &'a str,
    state: &'a str,
    platform: SocialPlatform,
    profile_id: ProfileId,
}

/// Social OAuth backed by the backend's `social-auth` functions
#[derive(Debug, Clone)]
pub struct RestSocialAuthAdapter {
    client: RestClient,
}

impl RestSocialAuthAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DomainPort for RestSocialAuthAdapter {}

#[async_trait]
impl HealthCheckable for RestSocialAuthAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.probe_health("rest-social-auth-adapter").await
    }
}

#[async_trait]
impl SocialAuthPort for RestSocialAuthAdapter {
    async fn begin(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<AuthSession, PortError> {
        let response: BeginResponse = self
            .client
            .post_json(
                "functions/v1/social-auth",
                &BeginRequest {
                    platform,
                    profile_id,
                },
                "begin social auth",
            )
            .await?;
        Ok(AuthSession {
            auth_url: response.auth_url,
            state: response.state,
        })
    }

    async fn exchange(
        &self,
        code: &str,
        state: &str,
        platform: SocialPlatform,
        profile_id: ProfileId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .post_json_unit(
                "functions/v1/verify-social-auth",
                &ExchangeRequest {
                    code,
                    state,
                    platform,
                    profile_id,
                },
                "exchange social auth code",
            )
            .await
    }

    async fn unlink(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.client
            .delete(
                &format!(
                    "rest/v1/social_connections?profile_id=eq.{}&platform=eq.{}",
                    profile_id.as_uuid(),
                    platform.code()
                ),
                "unlink social account",
            )
            .await
    }
}

//! Social Domain Ports
//!
//! The OAuth handshake itself lives behind `SocialAuthPort`: obtaining the
//! provider authorization URL, exchanging the callback code, and unlinking a
//! connected account. The `infra_remote` crate provides the REST adapter;
//! the `mock` module here provides an in-memory adapter for testing.

use async_trait::async_trait;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError, ProfileId,
};

use crate::connection::SocialPlatform;

/// An authorization session issued by the auth backend
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Provider URL the user is sent to
    pub auth_url: String,
    /// Opaque anti-forgery token; the callback echoes it back
    pub state: String,
}

/// Port for the social OAuth backend
#[async_trait]
pub trait SocialAuthPort: DomainPort + HealthCheckable {
    /// Starts an authorization flow for a platform
    async fn begin(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
        metadata: Option<OperationMetadata>,
    ) -> Result<AuthSession, PortError>;

    /// Exchanges the callback code, creating the account link
    async fn exchange(
        &self,
        code: &str,
        state: &str,
        platform: SocialPlatform,
        profile_id: ProfileId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Deletes the account link for a platform
    async fn unlink(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// In-memory mock adapter for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of SocialAuthPort
    ///
    /// Issues deterministic state tokens (`state-1`, `state-2`, ...) and
    /// records successful exchanges.
    #[derive(Debug, Default)]
    pub struct MockSocialAuthPort {
        counter: AtomicUsize,
        exchanges: Arc<RwLock<Vec<(SocialPlatform, ProfileId)>>>,
        unlinks: Arc<RwLock<Vec<(SocialPlatform, ProfileId)>>>,
        fail_begin: AtomicBool,
        fail_exchange: AtomicBool,
    }

    impl MockSocialAuthPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_begins(&self) {
            self.fail_begin.store(true, Ordering::SeqCst);
        }

        pub fn fail_exchanges(&self) {
            self.fail_exchange.store(true, Ordering::SeqCst);
        }

        pub async fn exchanged(&self) -> Vec<(SocialPlatform, ProfileId)> {
            self.exchanges.read().await.clone()
        }

        pub async fn unlinked(&self) -> Vec<(SocialPlatform, ProfileId)> {
            self.unlinks.read().await.clone()
        }
    }

    impl DomainPort for MockSocialAuthPort {}

    #[async_trait]
    impl HealthCheckable for MockSocialAuthPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-social-auth-port".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl SocialAuthPort for MockSocialAuthPort {
        async fn begin(
            &self,
            platform: SocialPlatform,
            _profile_id: ProfileId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<AuthSession, PortError> {
            if self.fail_begin.load(Ordering::SeqCst) {
                return Err(PortError::connection("auth backend unavailable"));
            }
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AuthSession {
                auth_url: format!("https://auth.test/{}/authorize", platform.code()),
                state: format!("state-{n}"),
            })
        }

        async fn exchange(
            &self,
            _code: &str,
            _state: &str,
            platform: SocialPlatform,
            profile_id: ProfileId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            if self.fail_exchange.load(Ordering::SeqCst) {
                return Err(PortError::Unauthorized {
                    message: "code rejected".to_string(),
                });
            }
            self.exchanges.write().await.push((platform, profile_id));
            Ok(())
        }

        async fn unlink(
            &self,
            platform: SocialPlatform,
            profile_id: ProfileId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.unlinks.write().await.push((platform, profile_id));
            Ok(())
        }
    }
}

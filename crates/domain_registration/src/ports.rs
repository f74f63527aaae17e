//! Registration Domain Ports
//!
//! Port interfaces for everything the wizard needs from the outside world:
//! profile storage, interest/fandom storage, confirmation email, and
//! postal-code lookup. The `infra_remote` crate provides the REST adapters;
//! the `mock` module here provides in-memory adapters for testing.

use async_trait::async_trait;

use core_kernel::{
    DomainPort, FandomRecordId, GamingRecordId, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError, ProfileId,
};

use crate::draft::PostalAddress;
use crate::interests::{ConfirmationEmail, NewFandomRecord, NewGamingInterests};
use crate::profile::{FanProfile, NewFanProfile};

/// Port for fan profile storage
///
/// Profiles are unique on CPF; `find_by_cpf` plus `insert` is the upsert
/// primitive the wizard builds on.
#[async_trait]
pub trait ProfilePort: DomainPort + HealthCheckable {
    /// Finds the profile registered under a digits-only CPF
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no profile carries this CPF; this is the upsert miss,
    /// not an error.
    async fn find_by_cpf(
        &self,
        cpf: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<FanProfile>, PortError>;

    /// Inserts a new profile and returns the stored record
    async fn insert(
        &self,
        profile: NewFanProfile,
        metadata: Option<OperationMetadata>,
    ) -> Result<FanProfile, PortError>;
}

/// Port for gaming-interest and fandom record storage
#[async_trait]
pub trait InterestPort: DomainPort + HealthCheckable {
    /// Inserts a gaming-interest record
    async fn insert_gaming(
        &self,
        record: NewGamingInterests,
        metadata: Option<OperationMetadata>,
    ) -> Result<GamingRecordId, PortError>;

    /// Inserts a fandom record
    async fn insert_fandom(
        &self,
        record: NewFandomRecord,
        metadata: Option<OperationMetadata>,
    ) -> Result<FandomRecordId, PortError>;
}

/// Port for transactional email delivery
#[async_trait]
pub trait EmailPort: DomainPort + HealthCheckable {
    /// Sends the post-submission confirmation email
    async fn send_confirmation(
        &self,
        email: ConfirmationEmail,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Port for postal-code address lookup
#[async_trait]
pub trait PostalLookupPort: DomainPort + HealthCheckable {
    /// Resolves an 8-digit postal code to an address
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the code is well-formed but unknown to the registry.
    async fn lookup(
        &self,
        postal_code: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<PostalAddress>, PortError>;
}

/// In-memory mock adapters for testing
///
/// The mocks count calls and can be armed to fail or to delay, which is how
/// the wizard tests observe partial persistence and the finalize race.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
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

    /// In-memory mock implementation of ProfilePort
    #[derive(Debug, Default)]
    pub struct MockProfilePort {
        profiles: Arc<RwLock<HashMap<ProfileId, FanProfile>>>,
        insert_calls: AtomicUsize,
        find_calls: AtomicUsize,
        fail_insert: AtomicBool,
        /// Artificial latency applied to `insert`, for race tests
        insert_delay: RwLock<Option<Duration>>,
    }

    impl MockProfilePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with profiles for testing
        pub async fn with_profiles(profiles: Vec<FanProfile>) -> Self {
            let port = Self::new();
            for profile in profiles {
                port.profiles.write().await.insert(profile.id, profile);
            }
            port
        }

        /// Arms the next inserts to fail with a connection error
        pub fn fail_inserts(&self) {
            self.fail_insert.store(true, Ordering::SeqCst);
        }

        pub async fn set_insert_delay(&self, delay: Duration) {
            *self.insert_delay.write().await = Some(delay);
        }

        pub fn insert_count(&self) -> usize {
            self.insert_calls.load(Ordering::SeqCst)
        }

        pub fn find_count(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }

        pub async fn stored_profiles(&self) -> Vec<FanProfile> {
            self.profiles.read().await.values().cloned().collect()
        }
    }

    impl DomainPort for MockProfilePort {}

    #[async_trait]
    impl HealthCheckable for MockProfilePort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-profile-port")
        }
    }

    #[async_trait]
    impl ProfilePort for MockProfilePort {
        async fn find_by_cpf(
            &self,
            cpf: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<FanProfile>, PortError> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .profiles
                .read()
                .await
                .values()
                .find(|p| p.cpf == cpf)
                .cloned())
        }

        async fn insert(
            &self,
            profile: NewFanProfile,
            _metadata: Option<OperationMetadata>,
        ) -> Result<FanProfile, PortError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = *self.insert_delay.read().await {
                tokio::time::sleep(delay).await;
            }
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(PortError::connection("profile store unavailable"));
            }
            let record = FanProfile {
                id: ProfileId::new_v7(),
                email: profile.email,
                full_name: profile.full_name,
                cpf: profile.cpf,
                birth_date: profile.birth_date,
                gender: profile.gender,
                phone: profile.phone,
                street: profile.street,
                city: profile.city,
                state: profile.state,
                neighborhood: profile.neighborhood,
                postal_code: profile.postal_code,
                created_at: Utc::now(),
            };
            self.profiles.write().await.insert(record.id, record.clone());
            Ok(record)
        }
    }

    /// In-memory mock implementation of InterestPort
    #[derive(Debug, Default)]
    pub struct MockInterestPort {
        gaming: Arc<RwLock<Vec<NewGamingInterests>>>,
        fandom: Arc<RwLock<Vec<NewFandomRecord>>>,
        fail_gaming: AtomicBool,
        fail_fandom: AtomicBool,
        /// Artificial latency applied to `insert_gaming`, for race tests
        gaming_delay: RwLock<Option<Duration>>,
    }

    impl MockInterestPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_gaming_delay(&self, delay: Duration) {
            *self.gaming_delay.write().await = Some(delay);
        }

        pub fn fail_gaming_inserts(&self) {
            self.fail_gaming.store(true, Ordering::SeqCst);
        }

        pub fn fail_fandom_inserts(&self) {
            self.fail_fandom.store(true, Ordering::SeqCst);
        }

        pub async fn gaming_records(&self) -> Vec<NewGamingInterests> {
            self.gaming.read().await.clone()
        }

        pub async fn fandom_records(&self) -> Vec<NewFandomRecord> {
            self.fandom.read().await.clone()
        }
    }

    impl DomainPort for MockInterestPort {}

    #[async_trait]
    impl HealthCheckable for MockInterestPort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-interest-port")
        }
    }

    #[async_trait]
    impl InterestPort for MockInterestPort {
        async fn insert_gaming(
            &self,
            record: NewGamingInterests,
            _metadata: Option<OperationMetadata>,
        ) -> Result<GamingRecordId, PortError> {
            if let Some(delay) = *self.gaming_delay.read().await {
                tokio::time::sleep(delay).await;
            }
            if self.fail_gaming.load(Ordering::SeqCst) {
                return Err(PortError::connection("interest store unavailable"));
            }
            self.gaming.write().await.push(record);
            Ok(GamingRecordId::new())
        }

        async fn insert_fandom(
            &self,
            record: NewFandomRecord,
            _metadata: Option<OperationMetadata>,
        ) -> Result<FandomRecordId, PortError> {
            if self.fail_fandom.load(Ordering::SeqCst) {
                return Err(PortError::connection("interest store unavailable"));
            }
            self.fandom.write().await.push(record);
            Ok(FandomRecordId::new())
        }
    }

    /// In-memory mock implementation of EmailPort
    #[derive(Debug, Default)]
    pub struct MockEmailPort {
        sent: Arc<RwLock<Vec<ConfirmationEmail>>>,
        fail_send: AtomicBool,
    }

    impl MockEmailPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_sends(&self) {
            self.fail_send.store(true, Ordering::SeqCst);
        }

        pub async fn sent_emails(&self) -> Vec<ConfirmationEmail> {
            self.sent.read().await.clone()
        }
    }

    impl DomainPort for MockEmailPort {}

    #[async_trait]
    impl HealthCheckable for MockEmailPort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-email-port")
        }
    }

    #[async_trait]
    impl EmailPort for MockEmailPort {
        async fn send_confirmation(
            &self,
            email: ConfirmationEmail,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            if self.fail_send.load(Ordering::SeqCst) {
                return Err(PortError::ServiceUnavailable {
                    service: "email".to_string(),
                });
            }
            self.sent.write().await.push(email);
            Ok(())
        }
    }

    /// In-memory mock implementation of PostalLookupPort
    #[derive(Debug, Default)]
    pub struct MockPostalLookupPort {
        addresses: Arc<RwLock<HashMap<String, PostalAddress>>>,
        lookup_calls: AtomicUsize,
        fail_lookups: AtomicBool,
    }

    impl MockPostalLookupPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_address(self, postal_code: impl Into<String>, address: PostalAddress) -> Self {
            self.addresses.write().await.insert(postal_code.into(), address);
            self
        }

        pub fn fail_next_lookups(&self) {
            self.fail_lookups.store(true, Ordering::SeqCst);
        }

        pub fn lookup_count(&self) -> usize {
            self.lookup_calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockPostalLookupPort {}

    #[async_trait]
    impl HealthCheckable for MockPostalLookupPort {
        async fn health_check(&self) -> HealthCheckResult {
            healthy("mock-postal-lookup-port")
        }
    }

    #[async_trait]
    impl PostalLookupPort for MockPostalLookupPort {
        async fn lookup(
            &self,
            postal_code: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<PostalAddress>, PortError> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lookups.load(Ordering::SeqCst) {
                return Err(PortError::connection("postal registry unreachable"));
            }
            Ok(self.addresses.read().await.get(postal_code).cloned())
        }
    }
}

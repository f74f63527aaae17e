//! Social connection flow
//!
//! Connecting a platform is a two-phase handshake: `begin_connect` obtains
//! the provider authorization URL and parks a pending slot keyed by the
//! anti-forgery state token; the OAuth callback later lands in
//! `handle_callback`, which consumes the slot and exchanges the code.
//!
//! Slots are strictly one-shot. The first matching callback consumes the
//! slot, a timeout expires it, and either way it is gone afterwards, so a
//! duplicate or stale callback can never connect an account twice.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use core_kernel::ProfileId;

use crate::error::SocialAuthError;
use crate::ports::SocialAuthPort;

/// How long a pending connection waits for its callback
pub const DEFAULT_PENDING_TTL: Duration = Duration::from_secs(10 * 60);

/// Platforms a fan can connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Instagram,
    Twitch,
    Youtube,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::Twitter,
        SocialPlatform::Instagram,
        SocialPlatform::Twitch,
        SocialPlatform::Youtube,
    ];

    /// The wire code, also used in the draft's connected set
    pub fn code(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Twitch => "twitch",
            SocialPlatform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SocialPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.code() == s)
            .ok_or_else(|| format!("unknown social platform: {s}"))
    }
}

/// A connection waiting for its OAuth callback
#[derive(Debug, Clone)]
pub struct PendingConnection {
    pub platform: SocialPlatform,
    pub profile_id: ProfileId,
    pub auth_url: String,
    pub state: String,
}

#[derive(Debug, Clone)]
struct PendingSlot {
    platform: SocialPlatform,
    profile_id: ProfileId,
    deadline: Instant,
}

/// Drives social connections for one session
pub struct SocialConnectClient {
    port: Arc<dyn SocialAuthPort>,
    pending: RwLock<HashMap<String, PendingSlot>>,
    ttl: Duration,
}

impl SocialConnectClient {
    pub fn new(port: Arc<dyn SocialAuthPort>) -> Self {
        Self::with_ttl(port, DEFAULT_PENDING_TTL)
    }

    pub fn with_ttl(port: Arc<dyn SocialAuthPort>, ttl: Duration) -> Self {
        Self {
            port,
            pending: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Starts an authorization flow and parks its callback slot
    pub async fn begin_connect(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
    ) -> Result<PendingConnection, SocialAuthError> {
        let session = self
            .port
            .begin(platform, profile_id, None)
            .await
            .map_err(|e| SocialAuthError::begin(e.to_string()))?;

        let mut pending = self.pending.write().await;
        prune_expired(&mut pending);
        pending.insert(
            session.state.clone(),
            PendingSlot {
                platform,
                profile_id,
                deadline: Instant::now() + self.ttl,
            },
        );
        debug!(%platform, state = %session.state, "authorization started");

        Ok(PendingConnection {
            platform,
            profile_id,
            auth_url: session.auth_url,
            state: session.state,
        })
    }

    /// Handles an OAuth callback, at most once per state token
    ///
    /// Consumes the pending slot whether or not the exchange succeeds.
    /// A callback with an unknown or already-consumed token is tolerated;
    /// users navigate away and providers redeliver.
    ///
    /// # Returns
    ///
    /// The connected platform, for the caller to add to the draft's
    /// connected set.
    pub async fn handle_callback(
        &self,
        state: &str,
        code: &str,
    ) -> Result<SocialPlatform, SocialAuthError> {
        let slot = self.pending.write().await.remove(state);

        let Some(slot) = slot else {
            warn!(state, "callback for unknown state token ignored");
            return Err(SocialAuthError::UnknownState);
        };
        if slot.deadline <= Instant::now() {
            warn!(state, platform = %slot.platform, "callback after expiry ignored");
            return Err(SocialAuthError::Expired);
        }

        self.port
            .exchange(code, state, slot.platform, slot.profile_id, None)
            .await
            .map_err(|e| SocialAuthError::exchange(e.to_string()))?;

        debug!(platform = %slot.platform, "social account connected");
        Ok(slot.platform)
    }

    /// Deletes the remote account link for a platform
    pub async fn disconnect(
        &self,
        platform: SocialPlatform,
        profile_id: ProfileId,
    ) -> Result<(), SocialAuthError> {
        self.port
            .unlink(platform, profile_id, None)
            .await
            .map_err(|e| SocialAuthError::exchange(e.to_string()))
    }

    /// Number of callback slots still waiting
    pub async fn pending_count(&self) -> usize {
        let mut pending = self.pending.write().await;
        prune_expired(&mut pending);
        pending.len()
    }
}

fn prune_expired(pending: &mut HashMap<String, PendingSlot>) {
    let now = Instant::now();
    pending.retain(|state, slot| {
        let alive = slot.deadline > now;
        if !alive {
            warn!(state, platform = %slot.platform, "pending connection expired");
        }
        alive
    });
}

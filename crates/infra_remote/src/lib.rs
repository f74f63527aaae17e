//! Remote Infrastructure Adapters
//!
//! Production implementations of the domain ports, all REST:
//!
//! - the backend-as-a-service API (profiles, interests, documents, blobs,
//!   and the verification / email / social-auth functions), reached through
//!   one shared bearer-authenticated [`RestClient`];
//! - the public ViaCEP registry for postal-code lookups.
//!
//! Configuration comes from `REMOTE_*` environment variables via
//! [`RemoteConfig::from_env`].

pub mod client;
pub mod config;
pub mod documents;
pub mod email;
pub mod interests;
pub mod postal;
pub mod profiles;
pub mod social;
pub mod storage;
pub mod verification;

pub use client::RestClient;
pub use config::RemoteConfig;
pub use documents::RestDocumentAdapter;
pub use email::RestEmailAdapter;
pub use interests::RestInterestAdapter;
pub use postal::ViaCepAdapter;
pub use profiles::RestProfileAdapter;
pub use social::RestSocialAuthAdapter;
pub use storage::RestStorageAdapter;
pub use verification::RestVerifierAdapter;

//! Social Connections Domain
//!
//! Optional social account connections for the registration wizard. The
//! OAuth handshake runs against a backend function behind `SocialAuthPort`;
//! this crate owns the session-side bookkeeping: one-shot callback slots
//! keyed by state token, with a timeout, so late or duplicate callbacks are
//! harmless.

pub mod connection;
pub mod error;
pub mod ports;

pub use connection::{
    PendingConnection, SocialConnectClient, SocialPlatform, DEFAULT_PENDING_TTL,
};
pub use error::SocialAuthError;
pub use ports::{AuthSession, SocialAuthPort};

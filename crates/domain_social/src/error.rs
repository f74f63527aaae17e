//! Social domain errors

use thiserror::Error;

/// Errors from the social connection flow
#[derive(Debug, Error)]
pub enum SocialAuthError {
    /// Starting the authorization flow failed
    #[error("Could not start authorization: {0}")]
    Begin(String),

    /// Exchanging the callback code failed
    #[error("Code exchange failed: {0}")]
    Exchange(String),

    /// The callback's state token matches no pending connection
    #[error("Unknown or already-consumed state token")]
    UnknownState,

    /// The pending connection timed out before the callback arrived
    #[error("Authorization expired before completion")]
    Expired,
}

impl SocialAuthError {
    pub fn begin(message: impl Into<String>) -> Self {
        SocialAuthError::Begin(message.into())
    }

    pub fn exchange(message: impl Into<String>) -> Self {
        SocialAuthError::Exchange(message.into())
    }
}

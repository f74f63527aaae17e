//! Document domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors from image normalization
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The bytes could not be decoded as an image
    #[error("Image decode failed: {0}")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the resized image failed
    #[error("Image encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Errors from the document upload pipeline
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file failed local validation; no remote call was made
    #[error("Rejected locally: {0}")]
    LocalValidation(String),

    /// The image could not be normalized
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// Blob upload or metadata recording failed
    #[error("Transfer failed during {operation}: {source}")]
    Transfer {
        operation: &'static str,
        #[source]
        source: PortError,
    },

    /// The remote verifier rejected the document or was unreachable
    #[error("Remote verification failed: {0}")]
    RemoteVerification(String),
}

impl DocumentError {
    pub fn local(message: impl Into<String>) -> Self {
        DocumentError::LocalValidation(message.into())
    }

    pub fn transfer(operation: &'static str, source: PortError) -> Self {
        DocumentError::Transfer { operation, source }
    }
}

//! Identity Document Domain
//!
//! This crate handles the identity-document step of registration: images
//! are validated locally, normalized to a bounded JPEG, stored as a blob
//! with a metadata record, and sent to the remote verifier. Failed attempts
//! are compensated so nothing half-uploaded stays reachable.
//!
//! # Pipeline
//!
//! ```text
//! Idle -> Validating -> Normalizing -> Uploading -> RecordingMetadata
//!              |                                          |
//!              v                                          v
//!       RejectedLocally                     RemoteVerifying -> Verified
//!                                                 |
//!                                                 v
//!                                               Failed (cleaned up)
//! ```

pub mod error;
pub mod normalize;
pub mod ports;
pub mod upload;

pub use error::{DocumentError, NormalizeError};
pub use normalize::{clamp_dimensions, normalize, NormalizedImage, MAX_DIMENSION};
pub use ports::{
    BlobStoragePort, DocumentRecord, DocumentRecordPort, DocumentVerifierPort, NewDocumentRecord,
    VerificationReport,
};
pub use upload::{
    DocumentClient, DocumentFile, DocumentOutcome, UploadStage, ACCEPTED_CONTENT_TYPES,
    MAX_UPLOAD_BYTES,
};

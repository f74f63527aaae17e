//! Document verification status
//!
//! Shared between the registration draft (which records the status of the
//! uploaded document) and the document pipeline (which produces it).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verification status of an identity document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Recorded, awaiting the verifier's verdict
    Pending,
    /// The verifier accepted the document
    Verified,
    /// The verifier rejected the document
    Failed,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Failed => write!(f, "failed"),
        }
    }
}

//! Core Kernel - Foundational types and utilities for the fan registration system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for profiles, documents and interest records
//! - Ports-and-adapters infrastructure shared by mocks and remote adapters
//! - The document verification status vocabulary

pub mod identifiers;
pub mod ports;
pub mod verification;

pub use identifiers::{DocumentId, FandomRecordId, GamingRecordId, ProfileId};
pub use verification::VerificationStatus;
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};

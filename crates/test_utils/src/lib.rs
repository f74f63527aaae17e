//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fan registration test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for drafts, files, and identifiers
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for registration types
//! - `generators`: Property-based test data generators
//! - `tracing`: One-time tracing setup for test binaries

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod tracing;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use tracing::init_tracing;

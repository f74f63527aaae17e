//! Fan Registration Domain
//!
//! This crate drives the multi-step fan registration wizard: the in-session
//! draft, per-step completion gates, the profile upsert, interest and fandom
//! persistence, postal-code autofill, and the final submission chain.
//!
//! # Wizard Flow
//!
//! A session moves linearly through six steps:
//!
//! 1. **Personal info** — identity and address; completing it upserts the
//!    durable profile by CPF
//! 2. **Gaming** — favorite games, platforms, play habits
//! 3. **Fandom** — teams, players, merchandise and event history
//! 4. **Document** — identity document upload and verification (handled by
//!    `domain_document`, recorded on the draft here)
//! 5. **Social** — optional social account connections
//! 6. **Review** — terms acceptance and submission
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_registration::{WizardController, DraftPatch, Gender};
//! use domain_registration::ports::mock::{
//!     MockEmailPort, MockInterestPort, MockPostalLookupPort, MockProfilePort,
//! };
//! use chrono::NaiveDate;
//!
//! let wizard = WizardController::new(
//!     Arc::new(MockProfilePort::new()),
//!     Arc::new(MockInterestPort::new()),
//!     Arc::new(MockEmailPort::new()),
//!     Arc::new(MockPostalLookupPort::new()),
//! );
//!
//! wizard.update(DraftPatch {
//!     full_name: Some("Ana Souza".to_string()),
//!     email: Some("ana@example.com".to_string()),
//!     cpf: Some("123.456.789-01".to_string()),
//!     birth_date: NaiveDate::from_ymd_opt(1999, 4, 12),
//!     gender: Some(Gender::Female),
//!     postal_code: Some("01310-100".to_string()),
//!     ..Default::default()
//! }).await;
//!
//! // Completing the identity step upserts the profile
//! wizard.advance().await?;
//! assert!(wizard.draft().await.profile_id.is_some());
//! ```

pub mod cep;
pub mod draft;
pub mod error;
pub mod interests;
pub mod ports;
pub mod profile;
pub mod steps;
pub mod wizard;

pub use core_kernel::VerificationStatus;
pub use draft::{Draft, DraftPatch, PostalAddress};
pub use error::RegistrationError;
pub use interests::{
    AttendedEvents, ConfirmationEmail, EsportsSince, FanSince, NewFandomRecord,
    NewGamingInterests, WatchingPreference, WeeklyHours, GAME_TITLES, ORG_TEAMS, PLATFORMS,
};
pub use ports::{EmailPort, InterestPort, PostalLookupPort, ProfilePort};
pub use profile::{
    digits_only, format_cpf, format_phone, format_postal_code, BrState, FanProfile, Gender,
    NewFanProfile,
};
pub use steps::{can_advance, WizardStep};
pub use wizard::{FinalizeOutcome, WizardController, WizardState};

//! Registration domain errors
//!
//! Every error here is user-presentable; nothing in the wizard is fatal to
//! the process. Remote failures carry the underlying port error message so
//! the UI can show it and the user can retry the same action.

use thiserror::Error;

/// Errors that can occur while driving the registration wizard
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The current step's required fields are not yet filled in
    #[error("Step {0} is incomplete")]
    StepIncomplete(usize),

    /// Creating or recovering the remote fan profile failed
    #[error("Profile creation failed: {0}")]
    ProfileCreation(String),

    /// Persisting the gaming-interest or fandom record failed
    #[error("Submission failed: {0}")]
    Persistence(String),

    /// The terms of service have not been accepted
    #[error("Terms of service must be accepted before submitting")]
    TermsNotAccepted,

    /// The requested transition is not valid in the current wizard state
    #[error("Invalid wizard state: {0}")]
    InvalidState(String),
}

impl RegistrationError {
    /// Creates a ProfileCreation error from any displayable source
    pub fn profile_creation(source: impl std::fmt::Display) -> Self {
        RegistrationError::ProfileCreation(source.to_string())
    }

    /// Creates a Persistence error from any displayable source
    pub fn persistence(source: impl std::fmt::Display) -> Self {
        RegistrationError::Persistence(source.to_string())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        RegistrationError::InvalidState(message.into())
    }
}

//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for registration types that give
//! more meaningful error messages than standard assertions.

use core_kernel::ProfileId;
use domain_registration::{can_advance, Draft, FinalizeOutcome, WizardStep};

/// Asserts that a draft clears the gate for a step
///
/// # Panics
///
/// Panics if the step gate rejects the draft
pub fn assert_step_clear(step: WizardStep, draft: &Draft) {
    assert!(
        can_advance(step, draft, true),
        "Expected {:?} gate to pass for draft: {:?}",
        step,
        draft
    );
}

/// Asserts that a draft is blocked at a step
pub fn assert_step_blocked(step: WizardStep, draft: &Draft) {
    assert!(
        !can_advance(step, draft, true),
        "Expected {:?} gate to block, but it passed",
        step
    );
}

/// Asserts that a finalize outcome is a clean submission and returns its
/// profile id
///
/// # Panics
///
/// Panics on `AlreadyInFlight` or when the confirmation email failed
pub fn assert_submitted(outcome: &FinalizeOutcome) -> ProfileId {
    match outcome {
        FinalizeOutcome::Submitted {
            profile_id,
            email_error: None,
            ..
        } => *profile_id,
        FinalizeOutcome::Submitted {
            email_error: Some(err),
            ..
        } => panic!("Submission succeeded but email failed: {err}"),
        FinalizeOutcome::AlreadyInFlight => {
            panic!("Expected a submission, got AlreadyInFlight")
        }
    }
}

/// Asserts that a string holds only ASCII digits of the given length
///
/// Useful for checking CPF and postal-code normalization.
pub fn assert_digits(value: &str, len: usize) {
    assert_eq!(
        value.len(),
        len,
        "Expected {len} digits, got {} in {value:?}",
        value.len()
    );
    assert!(
        value.chars().all(|c| c.is_ascii_digit()),
        "Expected only digits, got {value:?}"
    );
}

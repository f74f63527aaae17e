//! Comprehensive tests for domain_registration

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_registration::ports::mock::{
    MockEmailPort, MockInterestPort, MockPostalLookupPort, MockProfilePort,
};
use domain_registration::{
    can_advance, Draft, DraftPatch, FinalizeOutcome, Gender, PostalAddress, RegistrationError,
    WizardController, WizardState, WizardStep,
};

fn identity_patch() -> DraftPatch {
    DraftPatch {
        full_name: Some("Ana Souza".to_string()),
        email: Some("ana@example.com".to_string()),
        cpf: Some("123.456.789-01".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1999, 4, 12),
        gender: Some(Gender::Female),
        phone: Some("11987654321".to_string()),
        postal_code: Some("01310-100".to_string()),
        ..Default::default()
    }
}

struct Harness {
    wizard: Arc<WizardController>,
    profiles: Arc<MockProfilePort>,
    interests: Arc<MockInterestPort>,
    email: Arc<MockEmailPort>,
}

fn harness() -> Harness {
    let profiles = Arc::new(MockProfilePort::new());
    let interests = Arc::new(MockInterestPort::new());
    let email = Arc::new(MockEmailPort::new());
    let postal = Arc::new(MockPostalLookupPort::new());
    let wizard = Arc::new(WizardController::new(
        profiles.clone(),
        interests.clone(),
        email.clone(),
        postal,
    ));
    Harness {
        wizard,
        profiles,
        interests,
        email,
    }
}

/// Drives a wizard from a fresh session to the review step
async fn drive_to_review(h: &Harness) {
    h.wizard.update(identity_patch()).await;
    h.wizard
        .update(DraftPatch {
            favorite_games: Some(["Counter-Strike 2".to_string()].into()),
            favorite_teams: Some(["FURIA CS2".to_string()].into()),
            ..Default::default()
        })
        .await;
    h.wizard.advance().await.unwrap(); // PersonalInfo -> Gaming
    h.wizard.advance().await.unwrap(); // Gaming -> Fandom
    h.wizard.advance().await.unwrap(); // Fandom -> Document

    h.wizard
        .with_draft(|d| {
            d.set_document(
                "rg.jpg",
                core_kernel::DocumentId::new(),
                domain_registration::VerificationStatus::Verified,
            )
        })
        .await;
    h.wizard.advance().await.unwrap(); // Document -> Social
    h.wizard.advance().await.unwrap(); // Social -> Review
}

// ============================================================================
// Draft Tests
// ============================================================================

mod draft_tests {
    use super::*;

    #[test]
    fn test_merge_preserves_untouched_sections() {
        let mut draft = Draft::new();
        draft.merge(identity_patch());
        draft.merge(DraftPatch {
            favorite_games: Some(["Valorant".to_string()].into()),
            ..Default::default()
        });

        assert_eq!(draft.full_name, "Ana Souza");
        assert_eq!(draft.favorite_games.len(), 1);
        assert!(draft.favorite_teams.is_empty());
    }

    #[test]
    fn test_postal_autofill_round_trip() {
        let mut draft = Draft::new();
        draft.merge(identity_patch());
        draft.apply_postal_autofill(PostalAddress {
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: None,
        });

        // A lookup without a state leaves any existing state value alone
        assert!(draft.address_locked);
        assert_eq!(draft.street.as_deref(), Some("Avenida Paulista"));
        assert!(draft.state.is_none());
    }
}

// ============================================================================
// Step Gate Tests
// ============================================================================

mod steps_tests {
    use super::*;

    fn complete_identity_draft() -> Draft {
        let mut draft = Draft::new();
        draft.merge(identity_patch());
        draft
    }

    #[test]
    fn test_complete_identity_passes_step_zero() {
        assert!(can_advance(
            WizardStep::PersonalInfo,
            &complete_identity_draft(),
            false
        ));
    }

    proptest! {
        /// Dropping any non-empty subset of required identity fields fails
        /// the step-0 gate; dropping none passes it.
        #[test]
        fn prop_step_zero_requires_all_identity_fields(
            drop_name in any::<bool>(),
            drop_email in any::<bool>(),
            drop_cpf in any::<bool>(),
            drop_birth in any::<bool>(),
            drop_gender in any::<bool>(),
            drop_cep in any::<bool>(),
        ) {
            let mut draft = complete_identity_draft();
            if drop_name {
                draft.full_name.clear();
            }
            if drop_email {
                draft.email.clear();
            }
            if drop_cpf {
                draft.cpf.clear();
            }
            if drop_birth {
                draft.birth_date = None;
            }
            if drop_gender {
                draft.gender = None;
            }
            if drop_cep {
                draft.postal_code.clear();
            }

            let any_dropped =
                drop_name || drop_email || drop_cpf || drop_birth || drop_gender || drop_cep;
            prop_assert_eq!(
                can_advance(WizardStep::PersonalInfo, &draft, false),
                !any_dropped
            );
        }
    }
}

// ============================================================================
// Wizard Tests
// ============================================================================

mod wizard_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_walkthrough_submits_and_emails() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);

        let outcome = h.wizard.finalize().await.unwrap();
        let FinalizeOutcome::Submitted {
            profile_id,
            email_error,
            close_countdown,
        } = outcome
        else {
            panic!("expected a submitted outcome");
        };

        assert!(email_error.is_none());
        assert_eq!(close_countdown, Duration::from_secs(5));
        assert_eq!(h.wizard.state().await, WizardState::Submitted);

        let gaming = h.interests.gaming_records().await;
        let fandom = h.interests.fandom_records().await;
        assert_eq!(gaming.len(), 1);
        assert_eq!(fandom.len(), 1);
        assert_eq!(gaming[0].profile_id, profile_id);
        assert_eq!(fandom[0].profile_id, profile_id);

        let sent = h.email.sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "ana@example.com");
        assert_eq!(sent[0].name, "Ana Souza");
    }

    #[tokio::test]
    async fn test_finalize_requires_terms() {
        let h = harness();
        drive_to_review(&h).await;

        let err = h.wizard.finalize().await.unwrap_err();
        assert!(matches!(err, RegistrationError::TermsNotAccepted));
        assert_eq!(
            h.wizard.state().await,
            WizardState::OnStep(WizardStep::Review)
        );
        assert!(h.interests.gaming_records().await.is_empty());
    }

    #[tokio::test]
    async fn test_gaming_insert_failure_keeps_review_and_writes_nothing_more() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.interests.fail_gaming_inserts();

        let err = h.wizard.finalize().await.unwrap_err();
        assert!(matches!(err, RegistrationError::Persistence(_)));
        assert_eq!(
            h.wizard.state().await,
            WizardState::OnStep(WizardStep::Review)
        );
        assert!(h.interests.fandom_records().await.is_empty());
        assert!(h.email.sent_emails().await.is_empty());
    }

    #[tokio::test]
    async fn test_fandom_insert_failure_leaves_gaming_row_behind() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.interests.fail_fandom_inserts();

        let err = h.wizard.finalize().await.unwrap_err();
        assert!(matches!(err, RegistrationError::Persistence(_)));

        // Fail-fast with no rollback: the gaming row persists
        assert_eq!(h.interests.gaming_records().await.len(), 1);
        assert!(h.interests.fandom_records().await.is_empty());
        assert_eq!(
            h.wizard.state().await,
            WizardState::OnStep(WizardStep::Review)
        );
    }

    #[tokio::test]
    async fn test_email_failure_is_a_warning_not_an_error() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.email.fail_sends();

        let outcome = h.wizard.finalize().await.unwrap();
        let FinalizeOutcome::Submitted { email_error, .. } = outcome else {
            panic!("expected a submitted outcome");
        };
        assert!(email_error.is_some());
        assert_eq!(h.wizard.state().await, WizardState::Submitted);
        assert_eq!(h.interests.gaming_records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_finalize_yields_one_insert_set() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.interests
            .set_gaming_delay(Duration::from_millis(50))
            .await;

        let (first, second) = tokio::join!(h.wizard.finalize(), h.wizard.finalize());

        let outcomes = [first.unwrap(), second.unwrap()];
        assert!(outcomes
            .iter()
            .any(|o| matches!(o, FinalizeOutcome::Submitted { .. })));
        assert!(outcomes
            .iter()
            .any(|o| matches!(o, FinalizeOutcome::AlreadyInFlight)));

        assert_eq!(h.interests.gaming_records().await.len(), 1);
        assert_eq!(h.interests.fandom_records().await.len(), 1);
        assert_eq!(h.email.sent_emails().await.len(), 1);
    }

    #[tokio::test]
    async fn test_finalize_after_submission_is_rejected() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.wizard.finalize().await.unwrap();

        let err = h.wizard.finalize().await.unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidState(_)));
        assert_eq!(h.interests.gaming_records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_resubmission_on_fresh_session_duplicates_interest_rows() {
        let h = harness();
        drive_to_review(&h).await;
        h.wizard.set_terms_accepted(true);
        h.wizard.finalize().await.unwrap();

        // Same person registers again: profile is reused, interest rows are
        // appended (interest storage has no uniqueness on profile)
        let second = Harness {
            wizard: Arc::new(WizardController::new(
                h.profiles.clone(),
                h.interests.clone(),
                h.email.clone(),
                Arc::new(MockPostalLookupPort::new()),
            )),
            profiles: h.profiles.clone(),
            interests: h.interests.clone(),
            email: h.email.clone(),
        };
        drive_to_review(&second).await;
        second.wizard.set_terms_accepted(true);
        second.wizard.finalize().await.unwrap();

        assert_eq!(h.profiles.insert_count(), 1);
        assert_eq!(h.interests.gaming_records().await.len(), 2);
        assert_eq!(h.interests.fandom_records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_marketing_flag_is_session_state() {
        let h = harness();
        assert!(!h.wizard.marketing_accepted());
        h.wizard.set_marketing_accepted(true);
        assert!(h.wizard.marketing_accepted());
        assert!(!h.wizard.terms_accepted());
    }
}

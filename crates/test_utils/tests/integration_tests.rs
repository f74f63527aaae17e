//! Integration Tests for the Fan Registration Suite
//!
//! These tests verify cross-domain workflows and end-to-end scenarios
//! that involve multiple crates working together.

use std::sync::Arc;

use domain_document::ports::mock::{
    MockBlobStoragePort, MockDocumentRecordPort, MockDocumentVerifierPort,
};
use domain_document::{DocumentClient, DocumentError, UploadStage};
use domain_registration::ports::mock::{
    MockEmailPort, MockInterestPort, MockPostalLookupPort, MockProfilePort,
};
use domain_registration::{DraftPatch, PostalAddress, WizardController, WizardState, WizardStep};
use domain_social::ports::mock::MockSocialAuthPort;
use domain_social::{SocialConnectClient, SocialPlatform};
use test_utils::{
    assert_step_blocked, assert_step_clear, assert_submitted, init_tracing, DraftFixtures,
    FileFixtures,
};

/// The three session-scoped clients wired to fresh mocks
struct Session {
    wizard: WizardController,
    documents: DocumentClient,
    socials: SocialConnectClient,
    profiles: Arc<MockProfilePort>,
    interests: Arc<MockInterestPort>,
    email: Arc<MockEmailPort>,
    records: Arc<MockDocumentRecordPort>,
}

impl Session {
    fn new() -> Self {
        init_tracing();
        let profiles = Arc::new(MockProfilePort::new());
        let interests = Arc::new(MockInterestPort::new());
        let email = Arc::new(MockEmailPort::new());
        let postal = Arc::new(MockPostalLookupPort::new());
        let records = Arc::new(MockDocumentRecordPort::new());
        Self {
            wizard: WizardController::new(
                profiles.clone(),
                interests.clone(),
                email.clone(),
                postal.clone(),
            ),
            documents: DocumentClient::new(
                Arc::new(MockBlobStoragePort::new()),
                records.clone(),
                Arc::new(MockDocumentVerifierPort::new()),
            ),
            socials: SocialConnectClient::new(Arc::new(MockSocialAuthPort::new())),
            profiles,
            interests,
            email,
            records,
        }
    }
}

mod full_registration_workflow {
    use super::*;

    /// Walks the whole wizard: identity, interests, a real document upload,
    /// a social connection, then finalize.
    #[tokio::test]
    async fn test_complete_registration_end_to_end() {
        let session = Session::new();
        let wizard = &session.wizard;

        // Identity step; advancing creates the profile
        wizard.update(DraftFixtures::identity_patch()).await;
        wizard.advance().await.expect("identity step");
        assert_eq!(session.profiles.insert_count(), 1);
        let profile_id = wizard.draft().await.profile_id.expect("profile linked");

        // Gaming and fandom steps
        wizard
            .update(DraftPatch {
                favorite_games: Some(["Counter-Strike 2".to_string()].into()),
                ..Default::default()
            })
            .await;
        wizard.advance().await.expect("gaming step");
        wizard
            .update(DraftPatch {
                favorite_teams: Some(["FURIA CS2".to_string()].into()),
                ..Default::default()
            })
            .await;
        wizard.advance().await.expect("fandom step");

        // Document step backed by the upload pipeline
        let outcome = session
            .documents
            .submit(profile_id, FileFixtures::small_png())
            .await
            .expect("upload");
        wizard
            .with_draft(|draft| {
                draft.set_document(outcome.file_name.clone(), outcome.document_id, outcome.status)
            })
            .await;
        wizard.advance().await.expect("document step");

        // Social step backed by the OAuth flow
        let pending = session
            .socials
            .begin_connect(SocialPlatform::Twitch, profile_id)
            .await
            .expect("begin connect");
        let platform = session
            .socials
            .handle_callback(&pending.state, "auth-code")
            .await
            .expect("callback");
        wizard
            .with_draft(|draft| draft.add_social(platform.code()))
            .await;
        wizard.advance().await.expect("social step");

        // Review and finalize
        assert_eq!(wizard.current_step().await, Some(WizardStep::Review));
        wizard.set_terms_accepted(true);
        let outcome = wizard.finalize().await.expect("finalize");
        assert_eq!(assert_submitted(&outcome), profile_id);

        assert_eq!(wizard.state().await, WizardState::Submitted);
        assert_eq!(session.interests.gaming_records().await.len(), 1);
        assert_eq!(session.interests.fandom_records().await.len(), 1);
        assert_eq!(session.email.sent_emails().await.len(), 1);
        // Advancing created the profile; finalize reuses the linkage
        assert_eq!(session.profiles.insert_count(), 1);
    }

    /// Tests that the profile created while advancing is found again by CPF
    /// in a later session instead of being inserted twice
    #[tokio::test]
    async fn test_returning_visitor_reuses_profile_by_cpf() {
        let first = Session::new();
        first.wizard.update(DraftFixtures::identity_patch()).await;
        first.wizard.advance().await.expect("identity step");
        let existing = first.profiles.stored_profiles().await;
        assert_eq!(existing.len(), 1);

        // Same person, fresh session, shared backing store
        let profiles = Arc::new(MockProfilePort::with_profiles(existing.clone()).await);
        let wizard = WizardController::new(
            profiles.clone(),
            Arc::new(MockInterestPort::new()),
            Arc::new(MockEmailPort::new()),
            Arc::new(MockPostalLookupPort::new()),
        );
        wizard.update(DraftFixtures::identity_patch()).await;
        wizard.advance().await.expect("identity step");

        assert_eq!(profiles.insert_count(), 0);
        assert_eq!(
            wizard.draft().await.profile_id,
            Some(existing[0].id),
            "linked to the profile found by CPF"
        );
    }
}

mod document_workflow {
    use super::*;

    /// Tests that a locally rejected file leaves the draft gate closed and
    /// never reaches the backend
    #[tokio::test]
    async fn test_rejected_upload_keeps_document_gate_closed() {
        let session = Session::new();
        let profile_id = test_utils::IdFixtures::profile_id();

        let error = session
            .documents
            .submit(profile_id, FileFixtures::gif())
            .await
            .expect_err("gif must be rejected");
        assert!(matches!(error, DocumentError::LocalValidation(_)));
        assert_eq!(session.documents.stage().await, UploadStage::RejectedLocally);

        let draft = DraftFixtures::submission_ready();
        let mut blocked = draft.clone();
        blocked.clear_document();
        assert_step_blocked(WizardStep::Document, &blocked);
        assert_step_clear(WizardStep::Document, &draft);
    }

    /// Tests the replace flow: upload, remove, upload again
    #[tokio::test]
    async fn test_remove_then_reupload() {
        let session = Session::new();
        let profile_id = test_utils::IdFixtures::profile_id();

        let first = session
            .documents
            .submit(profile_id, FileFixtures::small_png())
            .await
            .expect("first upload");
        session.documents.remove(first.document_id).await;
        assert_eq!(session.records.delete_count(), 1);
        assert_eq!(session.documents.stage().await, UploadStage::Idle);

        let second = session
            .documents
            .submit(profile_id, FileFixtures::small_png())
            .await
            .expect("second upload");
        assert_ne!(first.document_id, second.document_id);
    }
}

mod social_workflow {
    use super::*;

    /// Tests that connections land in the draft's connected set and that
    /// disconnecting removes them
    #[tokio::test]
    async fn test_connect_and_disconnect_updates_draft() {
        let session = Session::new();
        let wizard = &session.wizard;
        let profile_id = test_utils::IdFixtures::profile_id();

        for platform in [SocialPlatform::Twitter, SocialPlatform::Instagram] {
            let pending = session
                .socials
                .begin_connect(platform, profile_id)
                .await
                .expect("begin");
            let connected = session
                .socials
                .handle_callback(&pending.state, "auth-code")
                .await
                .expect("callback");
            wizard
                .with_draft(|draft| draft.add_social(connected.code()))
                .await;
        }
        assert_eq!(wizard.draft().await.connected_socials.len(), 2);

        session
            .socials
            .disconnect(SocialPlatform::Twitter, profile_id)
            .await
            .expect("disconnect");
        wizard
            .with_draft(|draft| draft.remove_social(SocialPlatform::Twitter.code()))
            .await;

        let socials = wizard.draft().await.connected_socials;
        assert!(!socials.contains("twitter"));
        assert!(socials.contains("instagram"));
    }
}

mod postal_autofill_workflow {
    use super::*;
    use domain_registration::BrState;

    /// Tests that a lookup hit fills and locks the address through the wizard
    #[tokio::test]
    async fn test_autofill_fills_and_locks_address() {
        init_tracing();
        let postal = Arc::new(
            MockPostalLookupPort::new()
                .with_address(
                    "01310100",
                    PostalAddress {
                        street: "Avenida Paulista".to_string(),
                        neighborhood: "Bela Vista".to_string(),
                        city: "São Paulo".to_string(),
                        state: Some(BrState::SP),
                    },
                )
                .await,
        );
        let wizard = WizardController::new(
            Arc::new(MockProfilePort::new()),
            Arc::new(MockInterestPort::new()),
            Arc::new(MockEmailPort::new()),
            postal,
        );

        wizard.update(DraftFixtures::identity_patch()).await;
        assert!(wizard.autofill_address().await);

        let draft = wizard.draft().await;
        assert_eq!(draft.street.as_deref(), Some("Avenida Paulista"));
        assert_eq!(draft.city.as_deref(), Some("São Paulo"));
        assert!(draft.address_locked);
    }
}

//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the registration wizard. Fixtures are
//! deterministic unless a method says otherwise, so assertions can depend
//! on exact values.

use std::io::Cursor;

use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::{DocumentId, ProfileId};
use domain_document::DocumentFile;
use domain_registration::{BrState, Draft, DraftPatch, Gender};

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn profile_id() -> ProfileId {
        ProfileId::new_v7()
    }

    pub fn document_id() -> DocumentId {
        DocumentId::new()
    }
}

/// Fixture for draft test data
pub struct DraftFixtures;

impl DraftFixtures {
    /// The standard identity patch used across the suite
    pub fn identity_patch() -> DraftPatch {
        DraftPatch {
            full_name: Some("Ana Souza".to_string()),
            email: Some("ana@example.com".to_string()),
            cpf: Some("123.456.789-01".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1999, 4, 12),
            gender: Some(Gender::Female),
            phone: Some("11987654321".to_string()),
            postal_code: Some("01310-100".to_string()),
            state: Some(BrState::SP),
            ..Default::default()
        }
    }

    /// A draft that passes the identity step gate
    pub fn identity_complete() -> Draft {
        let mut draft = Draft::new();
        draft.merge(Self::identity_patch());
        draft
    }

    /// A draft that passes every gate up to review
    pub fn submission_ready() -> Draft {
        let mut draft = Self::identity_complete();
        draft.merge(DraftPatch {
            favorite_games: Some(["Counter-Strike 2".to_string()].into()),
            favorite_teams: Some(["FURIA CS2".to_string()].into()),
            ..Default::default()
        });
        draft.set_document(
            "rg.jpg",
            IdFixtures::document_id(),
            core_kernel::VerificationStatus::Verified,
        );
        draft
    }

    /// An identity patch with randomized but plausible name and email
    pub fn random_identity_patch() -> DraftPatch {
        DraftPatch {
            full_name: Some(Name().fake()),
            email: Some(SafeEmail().fake()),
            ..Self::identity_patch()
        }
    }
}

/// Fixture for uploaded-file test data
pub struct FileFixtures;

impl FileFixtures {
    /// A small valid PNG document
    pub fn small_png() -> DocumentFile {
        let source = image::RgbImage::from_pixel(32, 48, image::Rgb([40, 40, 180]));
        let mut bytes = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("in-memory png encode");
        DocumentFile {
            file_name: "rg.png".to_string(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }

    /// A file over the upload size cap
    pub fn oversized_jpeg() -> DocumentFile {
        DocumentFile {
            file_name: "huge.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0u8; domain_document::MAX_UPLOAD_BYTES + 1],
        }
    }

    /// A content type the pipeline refuses
    pub fn gif() -> DocumentFile {
        DocumentFile {
            file_name: "animation.gif".to_string(),
            content_type: "image/gif".to_string(),
            bytes: vec![0u8; 64],
        }
    }
}

//! Comprehensive unit tests for the Identifiers module
//!
//! Tests cover all identifier types, their creation, parsing,
//! conversion, and display formatting.

use core_kernel::{DocumentId, FandomRecordId, GamingRecordId, ProfileId};
use uuid::Uuid;

mod profile_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ProfileId::new();
        let id2 = ProfileId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ProfileId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ProfileId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ProfileId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ProfileId::prefix(), "PRF");
    }

    #[test]
    fn test_display_format() {
        let id = ProfileId::new();
        let display = id.to_string();
        assert!(display.starts_with("PRF-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ProfileId::new();
        let string = original.to_string();
        let parsed: ProfileId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ProfileId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_invalid() {
        let result: Result<ProfileId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }
}

mod document_id_tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(DocumentId::prefix(), "DOC");
    }

    #[test]
    fn test_roundtrip() {
        let original = DocumentId::new();
        let parsed: DocumentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_serde_transparent() {
        let id = DocumentId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Serializes as the bare UUID, not the prefixed display form
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

mod remaining_id_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(GamingRecordId::prefix(), "GAM");
        assert_eq!(FandomRecordId::prefix(), "FAN");
        assert_eq!(DocumentId::prefix(), "DOC");
    }

    #[test]
    fn test_ids_of_different_types_are_distinct_types() {
        // Compile-time property: the following would not compile if the
        // newtypes were interchangeable.
        let gaming = GamingRecordId::new();
        let fandom = FandomRecordId::new();
        assert_ne!(gaming.as_uuid(), fandom.as_uuid());
    }
}

//! The registration draft aggregate
//!
//! A `Draft` is the single mutable record carried across wizard steps. It is
//! session-local and never persisted in this shape; only the derived
//! per-step payloads (profile, gaming, fandom, document) leave the process.
//!
//! Mutation happens in exactly three ways:
//!
//! - [`Draft::merge`] for plain form fields (whole-field overwrite of the
//!   keys present in the patch, everything else preserved, no validation);
//! - dedicated grouped setters for the invariant-bearing field groups: the
//!   document group ([`Draft::set_document`] / [`Draft::clear_document`]),
//!   whose status moves atomically with the uploaded flag, and the
//!   assign-once profile linkage ([`Draft::assign_profile`]);
//! - [`Draft::apply_postal_autofill`], the one sanctioned cross-step side
//!   effect (the postal lookup filling address fields and locking them).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{DocumentId, ProfileId, VerificationStatus};

use crate::interests::{
    AttendedEvents, EsportsSince, FanSince, WatchingPreference, WeeklyHours,
};
use crate::profile::{BrState, Gender};

/// Address fields returned by a postal-code lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: Option<BrState>,
}

/// The in-session registration draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    // Identity
    pub full_name: String,
    pub email: String,
    /// CPF, digits-only internally; display formatting is applied at the edge
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,

    // Address
    /// Postal code, digits-only internally (8 digits when complete)
    pub postal_code: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub neighborhood: Option<String>,
    /// Set when a postal lookup auto-filled the address; locked fields are
    /// not manually editable until the postal code changes
    pub address_locked: bool,

    // Gaming
    pub favorite_games: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    pub weekly_hours: Option<WeeklyHours>,
    pub esports_since: Option<EsportsSince>,
    pub watching_preference: Option<WatchingPreference>,

    // Fandom
    pub favorite_teams: BTreeSet<String>,
    pub fan_since: Option<FanSince>,
    pub favorite_players: String,
    pub purchased_merchandise: Option<bool>,
    pub attended_events: Option<AttendedEvents>,
    pub motivation: String,

    // Document (mutated only through set_document / clear_document)
    pub document_uploaded: bool,
    pub document_name: String,
    pub document_id: Option<DocumentId>,
    pub document_status: Option<VerificationStatus>,

    // Social
    pub connected_socials: BTreeSet<String>,

    // Linkage (assign-once)
    pub profile_id: Option<ProfileId>,
}

/// A partial update to a draft
///
/// Every field is optional; `merge` overwrites exactly the fields that are
/// present. Sets are replaced wholesale, matching the form's
/// toggle-and-replace update pattern.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,

    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub neighborhood: Option<String>,

    pub favorite_games: Option<BTreeSet<String>>,
    pub platforms: Option<BTreeSet<String>>,
    pub weekly_hours: Option<WeeklyHours>,
    pub esports_since: Option<EsportsSince>,
    pub watching_preference: Option<WatchingPreference>,

    pub favorite_teams: Option<BTreeSet<String>>,
    pub fan_since: Option<FanSince>,
    pub favorite_players: Option<String>,
    pub purchased_merchandise: Option<bool>,
    pub attended_events: Option<AttendedEvents>,
    pub motivation: Option<String>,

    pub connected_socials: Option<BTreeSet<String>>,
}

impl Draft {
    /// Creates an empty draft at session start
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial update, overwriting only the fields present
    ///
    /// Purely structural; no validation is performed here. Changing the
    /// postal code unlocks any previously auto-filled address fields.
    pub fn merge(&mut self, patch: DraftPatch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.cpf {
            self.cpf = crate::profile::digits_only(&v);
        }
        if let Some(v) = patch.birth_date {
            self.birth_date = Some(v);
        }
        if let Some(v) = patch.gender {
            self.gender = Some(v);
        }
        if let Some(v) = patch.phone {
            self.phone = Some(v);
        }

        if let Some(v) = patch.postal_code {
            let digits = crate::profile::digits_only(&v);
            if digits != self.postal_code {
                self.address_locked = false;
            }
            self.postal_code = digits;
        }
        if let Some(v) = patch.street {
            self.street = Some(v);
        }
        if let Some(v) = patch.city {
            self.city = Some(v);
        }
        if let Some(v) = patch.state {
            self.state = Some(v);
        }
        if let Some(v) = patch.neighborhood {
            self.neighborhood = Some(v);
        }

        if let Some(v) = patch.favorite_games {
            self.favorite_games = v;
        }
        if let Some(v) = patch.platforms {
            self.platforms = v;
        }
        if let Some(v) = patch.weekly_hours {
            self.weekly_hours = Some(v);
        }
        if let Some(v) = patch.esports_since {
            self.esports_since = Some(v);
        }
        if let Some(v) = patch.watching_preference {
            self.watching_preference = Some(v);
        }

        if let Some(v) = patch.favorite_teams {
            self.favorite_teams = v;
        }
        if let Some(v) = patch.fan_since {
            self.fan_since = Some(v);
        }
        if let Some(v) = patch.favorite_players {
            self.favorite_players = v;
        }
        if let Some(v) = patch.purchased_merchandise {
            self.purchased_merchandise = Some(v);
        }
        if let Some(v) = patch.attended_events {
            self.attended_events = Some(v);
        }
        if let Some(v) = patch.motivation {
            self.motivation = v;
        }

        if let Some(v) = patch.connected_socials {
            self.connected_socials = v;
        }
    }

    /// Assigns the remote profile identifier, once
    ///
    /// The linkage transitions absent -> present exactly one time; later
    /// calls keep the original identifier. Returns the effective id.
    pub fn assign_profile(&mut self, id: ProfileId) -> ProfileId {
        *self.profile_id.get_or_insert(id)
    }

    /// Records a successful document upload
    ///
    /// The uploaded flag and the verification status change together; there
    /// is no state where one is set without the other.
    pub fn set_document(
        &mut self,
        name: impl Into<String>,
        id: DocumentId,
        status: VerificationStatus,
    ) {
        self.document_uploaded = true;
        self.document_name = name.into();
        self.document_id = Some(id);
        self.document_status = Some(status);
    }

    /// Resets the document group to "no document"
    pub fn clear_document(&mut self) {
        self.document_uploaded = false;
        self.document_name.clear();
        self.document_id = None;
        self.document_status = None;
    }

    /// Applies a postal-code lookup result and locks the filled fields
    pub fn apply_postal_autofill(&mut self, address: PostalAddress) {
        self.street = Some(address.street);
        self.neighborhood = Some(address.neighborhood);
        self.city = Some(address.city);
        if address.state.is_some() {
            self.state = address.state;
        }
        self.address_locked = true;
    }

    /// Adds a platform code to the connected-socials set
    ///
    /// Idempotent: connecting an already-connected platform is a no-op,
    /// which makes late or duplicate OAuth callbacks harmless.
    pub fn add_social(&mut self, platform: impl Into<String>) -> bool {
        self.connected_socials.insert(platform.into())
    }

    /// Removes a platform code from the connected-socials set
    pub fn remove_social(&mut self, platform: &str) -> bool {
        self.connected_socials.remove(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let mut draft = Draft::new();
        draft.merge(DraftPatch {
            full_name: Some("Ana Souza".to_string()),
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        });

        draft.merge(DraftPatch {
            cpf: Some("123.456.789-01".to_string()),
            ..Default::default()
        });

        assert_eq!(draft.full_name, "Ana Souza");
        assert_eq!(draft.email, "ana@example.com");
        // CPF is normalized to digits on merge
        assert_eq!(draft.cpf, "12345678901");
    }

    #[test]
    fn test_sets_have_no_duplicates() {
        let mut draft = Draft::new();
        let games: BTreeSet<String> = ["Valorant", "Valorant", "Dota 2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        draft.merge(DraftPatch {
            favorite_games: Some(games),
            ..Default::default()
        });
        assert_eq!(draft.favorite_games.len(), 2);
    }

    #[test]
    fn test_assign_profile_is_assign_once() {
        let mut draft = Draft::new();
        let first = ProfileId::new_v7();
        let second = ProfileId::new_v7();

        assert_eq!(draft.assign_profile(first), first);
        assert_eq!(draft.assign_profile(second), first);
        assert_eq!(draft.profile_id, Some(first));
    }

    #[test]
    fn test_document_flags_move_together() {
        let mut draft = Draft::new();
        assert!(!draft.document_uploaded);
        assert!(draft.document_status.is_none());

        let id = DocumentId::new();
        draft.set_document("rg.jpg", id, VerificationStatus::Verified);
        assert!(draft.document_uploaded);
        assert_eq!(draft.document_id, Some(id));
        assert_eq!(draft.document_status, Some(VerificationStatus::Verified));

        draft.clear_document();
        assert!(!draft.document_uploaded);
        assert!(draft.document_name.is_empty());
        assert!(draft.document_id.is_none());
        assert!(draft.document_status.is_none());
    }

    #[test]
    fn test_postal_autofill_locks_and_code_change_unlocks() {
        let mut draft = Draft::new();
        draft.merge(DraftPatch {
            postal_code: Some("01310-100".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.postal_code, "01310100");

        draft.apply_postal_autofill(PostalAddress {
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: BrState::parse("SP"),
        });
        assert!(draft.address_locked);
        assert_eq!(draft.state, Some(BrState::SP));

        draft.merge(DraftPatch {
            postal_code: Some("22041-011".to_string()),
            ..Default::default()
        });
        assert!(!draft.address_locked);
    }

    #[test]
    fn test_add_social_is_idempotent() {
        let mut draft = Draft::new();
        assert!(draft.add_social("twitch"));
        assert!(!draft.add_social("twitch"));
        assert_eq!(draft.connected_socials.len(), 1);
        assert!(draft.remove_social("twitch"));
        assert!(!draft.remove_social("twitch"));
    }
}

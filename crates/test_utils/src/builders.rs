//! Test Data Builders
//!
//! Fluent builders over the fixtures. Each builder starts from a complete,
//! valid object so a test only has to state what it cares about.

use chrono::NaiveDate;

use domain_registration::{
    AttendedEvents, BrState, Draft, DraftPatch, EsportsSince, FanSince, Gender,
    WatchingPreference, WeeklyHours,
};

use crate::fixtures::DraftFixtures;

/// Builder for drafts that already clear every step gate
#[derive(Debug, Clone)]
pub struct DraftBuilder {
    draft: Draft,
}

impl DraftBuilder {
    /// Starts from a submission-ready draft
    pub fn new() -> Self {
        Self {
            draft: DraftFixtures::submission_ready(),
        }
    }

    /// Starts from an empty draft
    pub fn blank() -> Self {
        Self {
            draft: Draft::new(),
        }
    }

    pub fn with_full_name(mut self, full_name: &str) -> Self {
        self.draft.full_name = full_name.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.draft.email = email.to_string();
        self
    }

    /// Accepts a formatted or raw CPF; stored digits-only like user input
    pub fn with_cpf(mut self, cpf: &str) -> Self {
        self.draft.merge(DraftPatch {
            cpf: Some(cpf.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_birth_date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.draft.birth_date = NaiveDate::from_ymd_opt(year, month, day);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.draft.gender = Some(gender);
        self
    }

    pub fn with_postal_code(mut self, postal_code: &str) -> Self {
        self.draft.merge(DraftPatch {
            postal_code: Some(postal_code.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_state(mut self, state: BrState) -> Self {
        self.draft.state = Some(state);
        self
    }

    pub fn with_games<I: IntoIterator<Item = S>, S: Into<String>>(mut self, games: I) -> Self {
        self.draft.favorite_games = games.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_teams<I: IntoIterator<Item = S>, S: Into<String>>(mut self, teams: I) -> Self {
        self.draft.favorite_teams = teams.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weekly_hours(mut self, hours: WeeklyHours) -> Self {
        self.draft.weekly_hours = Some(hours);
        self
    }

    pub fn with_esports_since(mut self, since: EsportsSince) -> Self {
        self.draft.esports_since = Some(since);
        self
    }

    pub fn with_watching_preference(mut self, preference: WatchingPreference) -> Self {
        self.draft.watching_preference = Some(preference);
        self
    }

    pub fn with_fan_since(mut self, since: FanSince) -> Self {
        self.draft.fan_since = Some(since);
        self
    }

    pub fn with_attended_events(mut self, attended: AttendedEvents) -> Self {
        self.draft.attended_events = Some(attended);
        self
    }

    pub fn with_motivation(mut self, motivation: &str) -> Self {
        self.draft.motivation = motivation.to_string();
        self
    }

    /// Forgets the document group, failing the document step gate
    pub fn without_document(mut self) -> Self {
        self.draft.clear_document();
        self
    }

    pub fn build(self) -> Draft {
        self.draft
    }
}

impl Default for DraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

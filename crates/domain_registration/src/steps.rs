//! Wizard step ordering and per-step completion gates

use serde::{Deserialize, Serialize};

use crate::draft::Draft;

/// The six wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    Gaming,
    Fandom,
    Document,
    Social,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::PersonalInfo,
        WizardStep::Gaming,
        WizardStep::Fandom,
        WizardStep::Document,
        WizardStep::Social,
        WizardStep::Review,
    ];

    /// Zero-based position in the wizard
    pub fn index(&self) -> usize {
        match self {
            WizardStep::PersonalInfo => 0,
            WizardStep::Gaming => 1,
            WizardStep::Fandom => 2,
            WizardStep::Document => 3,
            WizardStep::Social => 4,
            WizardStep::Review => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, `None` at the last step
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, `None` at the first step
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// Whether the draft satisfies the completion gate for `step`
///
/// Pure and deterministic; the controller calls this before advancing.
/// `terms_accepted` is session state owned by the controller, not the draft,
/// so it is passed in explicitly.
pub fn can_advance(step: WizardStep, draft: &Draft, terms_accepted: bool) -> bool {
    match step {
        WizardStep::PersonalInfo => {
            !draft.full_name.trim().is_empty()
                && !draft.email.trim().is_empty()
                && !draft.cpf.trim().is_empty()
                && draft.birth_date.is_some()
                && draft.gender.is_some()
                && !draft.postal_code.trim().is_empty()
        }
        WizardStep::Gaming => !draft.favorite_games.is_empty(),
        WizardStep::Fandom => !draft.favorite_teams.is_empty(),
        WizardStep::Document => draft.document_uploaded,
        WizardStep::Social => true,
        WizardStep::Review => terms_accepted,
    }
}

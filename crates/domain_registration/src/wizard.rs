//! Wizard controller
//!
//! Drives a single registration session through the six steps: holds the
//! draft, enforces the per-step gates, performs the profile upsert when the
//! identity step completes, and runs the final submission chain.
//!
//! # Concurrency
//!
//! One controller serves one logical session. All remote calls are
//! sequential awaits; the only re-entrancy hazard is a double `finalize`
//! (impatient double-click on submit), which is absorbed by an atomic
//! in-flight guard so at most one set of inserts is ever issued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use core_kernel::ProfileId;

use crate::cep;
use crate::draft::{Draft, DraftPatch};
use crate::error::RegistrationError;
use crate::interests::{ConfirmationEmail, NewFandomRecord, NewGamingInterests};
use crate::ports::{EmailPort, InterestPort, PostalLookupPort, ProfilePort};
use crate::profile::NewFanProfile;
use crate::steps::{can_advance, WizardStep};

/// How long the UI keeps the success screen up before closing
const CLOSE_COUNTDOWN: Duration = Duration::from_secs(5);

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Collecting input on a step
    OnStep(WizardStep),
    /// Submission completed; the session is terminal
    Submitted,
}

/// Result of a finalize call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The submission went through
    Submitted {
        profile_id: ProfileId,
        /// Set when the confirmation email could not be sent; the
        /// submission itself still succeeded
        email_error: Option<String>,
        /// UI hint for the auto-close timer
        close_countdown: Duration,
    },
    /// Another finalize on this session is still pending; nothing was done
    AlreadyInFlight,
}

/// Resets the in-flight flag when the finalize attempt ends, however it ends
struct InFlightReset<'a>(&'a AtomicBool);

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The registration wizard for one session
pub struct WizardController {
    draft: RwLock<Draft>,
    state: RwLock<WizardState>,
    terms_accepted: AtomicBool,
    marketing_accepted: AtomicBool,
    finalize_in_flight: AtomicBool,
    profiles: Arc<dyn ProfilePort>,
    interests: Arc<dyn InterestPort>,
    email: Arc<dyn EmailPort>,
    postal: Arc<dyn PostalLookupPort>,
}

impl WizardController {
    pub fn new(
        profiles: Arc<dyn ProfilePort>,
        interests: Arc<dyn InterestPort>,
        email: Arc<dyn EmailPort>,
        postal: Arc<dyn PostalLookupPort>,
    ) -> Self {
        Self {
            draft: RwLock::new(Draft::new()),
            state: RwLock::new(WizardState::OnStep(WizardStep::PersonalInfo)),
            terms_accepted: AtomicBool::new(false),
            marketing_accepted: AtomicBool::new(false),
            finalize_in_flight: AtomicBool::new(false),
            profiles,
            interests,
            email,
            postal,
        }
    }

    /// Current state
    pub async fn state(&self) -> WizardState {
        *self.state.read().await
    }

    /// The step the session is on, `None` once submitted
    pub async fn current_step(&self) -> Option<WizardStep> {
        match *self.state.read().await {
            WizardState::OnStep(step) => Some(step),
            WizardState::Submitted => None,
        }
    }

    /// Snapshot of the draft
    pub async fn draft(&self) -> Draft {
        self.draft.read().await.clone()
    }

    /// Merges form input into the draft
    pub async fn update(&self, patch: DraftPatch) {
        self.draft.write().await.merge(patch);
    }

    /// Mutates the draft in place; used for the grouped document and social
    /// setters that a plain patch cannot express
    pub async fn with_draft<R>(&self, f: impl FnOnce(&mut Draft) -> R) -> R {
        f(&mut *self.draft.write().await)
    }

    pub fn set_terms_accepted(&self, accepted: bool) {
        self.terms_accepted.store(accepted, Ordering::SeqCst);
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted.load(Ordering::SeqCst)
    }

    pub fn set_marketing_accepted(&self, accepted: bool) {
        self.marketing_accepted.store(accepted, Ordering::SeqCst);
    }

    pub fn marketing_accepted(&self) -> bool {
        self.marketing_accepted.load(Ordering::SeqCst)
    }

    /// Resolves the draft's postal code and auto-fills the address fields
    ///
    /// Best-effort; a miss or lookup failure leaves the draft unchanged.
    pub async fn autofill_address(&self) -> bool {
        let mut draft = self.draft.write().await;
        cep::fill_address_from_lookup(&mut draft, self.postal.as_ref()).await
    }

    /// Moves to the next step if the current step's gate passes
    ///
    /// Completing the identity step also runs the profile upsert, so later
    /// steps can attach records to a known profile id.
    ///
    /// # Errors
    ///
    /// `StepIncomplete` when the gate fails; `ProfileCreation` when the
    /// upsert fails (the step is not advanced); `InvalidState` after
    /// submission or on the review step, which finishes via [`finalize`].
    ///
    /// [`finalize`]: WizardController::finalize
    pub async fn advance(&self) -> Result<WizardState, RegistrationError> {
        let step = match *self.state.read().await {
            WizardState::OnStep(step) => step,
            WizardState::Submitted => {
                return Err(RegistrationError::invalid_state(
                    "session already submitted",
                ))
            }
        };

        let next = step.next().ok_or_else(|| {
            RegistrationError::invalid_state("review step completes via finalize")
        })?;

        {
            let draft = self.draft.read().await;
            if !can_advance(step, &draft, self.terms_accepted()) {
                return Err(RegistrationError::StepIncomplete(step.index()));
            }
        }

        if step == WizardStep::PersonalInfo {
            self.ensure_profile().await?;
        }

        let mut state = self.state.write().await;
        *state = WizardState::OnStep(next);
        Ok(*state)
    }

    /// Moves back one step; no validation is re-run
    pub async fn retreat(&self) -> Result<WizardState, RegistrationError> {
        let mut state = self.state.write().await;
        match *state {
            WizardState::OnStep(step) => {
                if let Some(prev) = step.prev() {
                    *state = WizardState::OnStep(prev);
                }
                Ok(*state)
            }
            WizardState::Submitted => Err(RegistrationError::invalid_state(
                "session already submitted",
            )),
        }
    }

    /// Ensures the draft is linked to a stored profile, upserting by CPF
    ///
    /// Idempotent: a draft that already carries a profile id returns it
    /// without any port call, and repeated calls with the same CPF always
    /// resolve to the same record.
    pub async fn ensure_profile(&self) -> Result<ProfileId, RegistrationError> {
        if let Some(id) = self.draft.read().await.profile_id {
            return Ok(id);
        }

        let payload = {
            let draft = self.draft.read().await;
            NewFanProfile::from_draft(&draft)?
        };
        payload
            .validate()
            .map_err(|e| RegistrationError::profile_creation(e.to_string()))?;

        let existing = self
            .profiles
            .find_by_cpf(&payload.cpf, None)
            .await
            .map_err(|e| RegistrationError::profile_creation(e.to_string()))?;

        let profile = match existing {
            Some(profile) => {
                info!(profile_id = %profile.id, "reusing profile for cpf");
                profile
            }
            None => self
                .profiles
                .insert(payload, None)
                .await
                .map_err(|e| RegistrationError::profile_creation(e.to_string()))?,
        };

        Ok(self.draft.write().await.assign_profile(profile.id))
    }

    /// Submits the registration from the review step
    ///
    /// Inserts the gaming-interest record, then the fandom record, then
    /// sends the confirmation email. The inserts are fail-fast with no
    /// rollback; an email failure is reported as a warning on the outcome
    /// rather than failing the submission. A concurrent finalize on the same
    /// session gets `AlreadyInFlight` without touching any port.
    pub async fn finalize(&self) -> Result<FinalizeOutcome, RegistrationError> {
        if self
            .finalize_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(FinalizeOutcome::AlreadyInFlight);
        }
        let _reset = InFlightReset(&self.finalize_in_flight);

        match *self.state.read().await {
            WizardState::OnStep(WizardStep::Review) => {}
            WizardState::Submitted => {
                return Err(RegistrationError::invalid_state(
                    "session already submitted",
                ))
            }
            WizardState::OnStep(step) => {
                return Err(RegistrationError::invalid_state(format!(
                    "finalize is only valid on the review step, currently on step {}",
                    step.index()
                )))
            }
        }

        if !self.terms_accepted() {
            return Err(RegistrationError::TermsNotAccepted);
        }

        let profile_id = self.ensure_profile().await?;
        let draft = self.draft.read().await.clone();

        self.interests
            .insert_gaming(NewGamingInterests::from_draft(profile_id, &draft), None)
            .await
            .map_err(|e| RegistrationError::persistence(e.to_string()))?;
        self.interests
            .insert_fandom(NewFandomRecord::from_draft(profile_id, &draft), None)
            .await
            .map_err(|e| RegistrationError::persistence(e.to_string()))?;

        let email_error = match self
            .email
            .send_confirmation(
                ConfirmationEmail {
                    email: draft.email.clone(),
                    name: draft.full_name.clone(),
                },
                None,
            )
            .await
        {
            Ok(()) => None,
            Err(error) => {
                warn!(%error, "confirmation email failed; submission unaffected");
                Some(error.to_string())
            }
        };

        *self.state.write().await = WizardState::Submitted;
        info!(%profile_id, "registration submitted");

        Ok(FinalizeOutcome::Submitted {
            profile_id,
            email_error,
            close_countdown: CLOSE_COUNTDOWN,
        })
    }
}

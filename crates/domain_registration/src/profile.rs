//! Fan profile records and identity value types
//!
//! This module defines the durable profile record that anchors a
//! registration, the identity enumerations used by the draft, and the
//! formatting helpers for Brazilian identity data (CPF, phone, postal code):
//! values are stored digits-only and re-punctuated only for display.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ProfileId;

use crate::draft::Draft;
use crate::error::RegistrationError;

/// Self-declared gender of a registrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

/// Brazilian federal subdivision codes (ISO 3166-2:BR, without the prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrState {
    AC, AL, AP, AM, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA,
    PB, PR, PE, PI, RJ, RN, RS, RO, RR, SC, SP, SE, TO,
}

impl BrState {
    /// Parses a two-letter subdivision code, case-insensitively
    pub fn parse(code: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(code.to_uppercase())).ok()
    }

    /// Returns the two-letter subdivision code
    pub fn code(&self) -> &'static str {
        match self {
            BrState::AC => "AC", BrState::AL => "AL", BrState::AP => "AP",
            BrState::AM => "AM", BrState::BA => "BA", BrState::CE => "CE",
            BrState::DF => "DF", BrState::ES => "ES", BrState::GO => "GO",
            BrState::MA => "MA", BrState::MT => "MT", BrState::MS => "MS",
            BrState::MG => "MG", BrState::PA => "PA", BrState::PB => "PB",
            BrState::PR => "PR", BrState::PE => "PE", BrState::PI => "PI",
            BrState::RJ => "RJ", BrState::RN => "RN", BrState::RS => "RS",
            BrState::RO => "RO", BrState::RR => "RR", BrState::SC => "SC",
            BrState::SP => "SP", BrState::SE => "SE", BrState::TO => "TO",
        }
    }
}

/// Strips every non-digit character
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats an 11-digit CPF as `000.000.000-00`
///
/// Inputs that are not exactly 11 digits are returned digits-only,
/// unpunctuated, matching the progressive formatting of the entry field.
pub fn format_cpf(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != 11 {
        return digits;
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Formats an 11-digit phone number as `(00)00000-0000`
pub fn format_phone(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != 11 {
        return digits;
    }
    format!("({}){}-{}", &digits[0..2], &digits[2..7], &digits[7..11])
}

/// Formats an 8-digit postal code as `00000-000`
pub fn format_postal_code(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() != 8 {
        return digits;
    }
    format!("{}-{}", &digits[0..5], &digits[5..8])
}

/// A durable fan profile record, as stored remotely
///
/// Profiles are unique on CPF; the wizard's step-0 completion performs an
/// upsert-by-CPF so re-registering with the same document reuses the
/// existing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanProfile {
    pub id: ProfileId,
    pub email: String,
    pub full_name: String,
    /// CPF, digits-only
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new fan profile
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewFanProfile {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    /// CPF, digits-only
    #[validate(length(equal = 11))]
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<BrState>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
}

impl NewFanProfile {
    /// Builds the insert payload from a draft that passed the identity step
    ///
    /// # Errors
    ///
    /// Returns `ProfileCreation` if a required identity field is missing;
    /// callers normally gate on the step-0 validator first, so this only
    /// fires when the wizard is driven out of order.
    pub fn from_draft(draft: &Draft) -> Result<Self, RegistrationError> {
        let birth_date = draft
            .birth_date
            .ok_or_else(|| RegistrationError::ProfileCreation("birth date is required".into()))?;
        let gender = draft
            .gender
            .ok_or_else(|| RegistrationError::ProfileCreation("gender is required".into()))?;

        Ok(Self {
            email: draft.email.clone(),
            full_name: draft.full_name.clone(),
            cpf: digits_only(&draft.cpf),
            birth_date,
            gender,
            phone: draft.phone.clone(),
            street: draft.street.clone(),
            city: draft.city.clone(),
            state: draft.state,
            neighborhood: draft.neighborhood.clone(),
            postal_code: if draft.postal_code.is_empty() {
                None
            } else {
                Some(digits_only(&draft.postal_code))
            },
        })
    }
}

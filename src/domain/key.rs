//! Encounter identity derivation
//!
//! This module provides the [`EncounterKey`] newtype and the canonical
//! derivation from an [`Encounter`]'s identifying fields. The key is the
//! join point between a day's records and the persisted missing ledger, so
//! the derivation must be stable across runs and insensitive to the
//! formatting noise that different export sources introduce.

use super::encounter::Encounter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Date formats accepted during key normalization, tried in order
const DATE_FORMATS: [&str; 4] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Opaque encounter identity
///
/// A 64-character lowercase hex SHA-256 digest over the normalized
/// identifying fields (patient name, DOB, date of service, facility, CPT).
/// Two records that agree on those fields modulo whitespace, case, and the
/// supported date spellings produce the same key.
///
/// # Limitation
///
/// A date that matches none of the accepted formats participates in the key
/// as its trimmed raw text. Two semantically equal records whose unparseable
/// dates are spelled differently will therefore NOT collide. Ledgers written
/// under this rule depend on it; do not tighten the fallback without a
/// compatibility decision.
///
/// # Examples
///
/// ```
/// use billsync::domain::{Encounter, EncounterKey};
///
/// let encounter = Encounter {
///     patient_name: "Doe, Jane".to_string(),
///     dob: "01-15-1950".to_string(),
///     date_of_service: "12-09-2025".to_string(),
///     facility: "Hospital A".to_string(),
///     cpt: "99213".to_string(),
///     ..Default::default()
/// };
/// let key = EncounterKey::from_encounter(&encounter);
/// assert_eq!(key.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncounterKey(String);

impl EncounterKey {
    /// Derives the key for an encounter
    ///
    /// Pure and deterministic: same field values always yield the same key,
    /// across calls and across process restarts. There is no error path -
    /// missing fields normalize to the empty string, so two fully-blank
    /// records share a key by design.
    pub fn from_encounter(encounter: &Encounter) -> Self {
        let patient = normalize_text(&encounter.patient_name);
        let dob = normalize_date(&encounter.dob);
        let dos = normalize_date(&encounter.date_of_service);
        let facility = normalize_text(&encounter.facility);
        let cpt = normalize_text(&encounter.cpt);

        let material = format!("{patient}_{dob}_{dos}_{facility}_{cpt}");

        let mut hasher = Sha256::new();
        hasher.update(material.as_bytes());
        let digest = hasher.finalize();

        Self(format!("{digest:x}"))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EncounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EncounterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a text field: trim, uppercase, collapse internal whitespace
fn normalize_text(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a date field to `YYYY-MM-DD`
///
/// Tries the accepted formats in order and re-renders the first match with
/// zero-padded month and day. Falls back to the trimmed original when no
/// format matches (see the limitation on [`EncounterKey`]).
fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    trimmed.to_string()
}

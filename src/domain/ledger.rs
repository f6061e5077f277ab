//! Missing-encounter ledger model
//!
//! The ledger is the persisted set of encounters that have never billed
//! successfully, keyed by [`EncounterKey`] and carried across runs. Entries
//! hold denormalized display fields only; the key is recomputed from those
//! fields on load and never written out.

use super::encounter::Encounter;
use super::key::EncounterKey;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Billed flag value for every entry present in the ledger
///
/// Presence in the ledger implies unresolved, so the flag is a constant.
pub const LEDGER_BILLED_FLAG: &str = "No";

/// One row of the missing ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Patient name as first recorded
    pub patient_name: String,

    /// Date of birth as first recorded
    pub dob: String,

    /// Date of service as first recorded (raw text, also the write sort key)
    pub date_of_service: String,

    /// Type of care as first recorded
    pub type_of_care: String,

    /// Type of visit as first recorded
    pub type_of_visit: String,

    /// Facility as first recorded
    pub facility: String,

    /// Run date of the most recent billing attempt
    pub last_attempt: String,

    /// Always "No" while the entry exists
    pub billed: String,

    /// Denial reason from the most recent attempt
    pub reason: String,

    /// Matching key, recomputed from display fields on load
    pub key: EncounterKey,
}

impl LedgerEntry {
    /// Builds a new entry from a freshly denied encounter
    pub fn from_encounter(encounter: &Encounter, reason: &str, run_date: &str) -> Self {
        Self {
            patient_name: encounter.patient_name.clone(),
            dob: encounter.dob.clone(),
            date_of_service: encounter.date_of_service.clone(),
            type_of_care: encounter.type_of_care.clone(),
            type_of_visit: encounter.type_of_visit.clone(),
            facility: encounter.facility.clone(),
            last_attempt: run_date.to_string(),
            billed: LEDGER_BILLED_FLAG.to_string(),
            reason: reason.to_string(),
            key: EncounterKey::from_encounter(encounter),
        }
    }

    /// Recomputes the matching key from the display fields alone
    ///
    /// The persisted file carries neither a key column nor a CPT column, so
    /// the recomputed key normalizes CPT as empty. Entries created during a
    /// run carry the full key of their source record; any change to the
    /// canonicalization rule invalidates matching against files written
    /// under the old rule.
    pub fn derive_key(patient_name: &str, dob: &str, date_of_service: &str, facility: &str) -> EncounterKey {
        let shadow = Encounter {
            patient_name: patient_name.to_string(),
            dob: dob.to_string(),
            date_of_service: date_of_service.to_string(),
            facility: facility.to_string(),
            ..Default::default()
        };
        EncounterKey::from_encounter(&shadow)
    }
}

/// The full missing ledger: one entry per key, no duplicates
///
/// Backed by a `BTreeMap` so iteration order is deterministic. The caller
/// owns the value; the reconciler never mutates a caller's ledger in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: BTreeMap<EncounterKey, LedgerEntry>,
}

impl Ledger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the ledger holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when an entry exists for the key
    pub fn contains_key(&self, key: &EncounterKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the entry for a key
    pub fn get(&self, key: &EncounterKey) -> Option<&LedgerEntry> {
        self.entries.get(key)
    }

    /// Returns a mutable entry for a key
    pub fn get_mut(&mut self, key: &EncounterKey) -> Option<&mut LedgerEntry> {
        self.entries.get_mut(key)
    }

    /// Inserts an entry under its own key, replacing any existing one
    pub fn insert(&mut self, entry: LedgerEntry) -> Option<LedgerEntry> {
        self.entries.insert(entry.key.clone(), entry)
    }

    /// Removes the entry for a key
    pub fn remove(&mut self, key: &EncounterKey) -> Option<LedgerEntry> {
        self.entries.remove(key)
    }

    /// Iterates entries in key order
    pub fn iter(&self) -> btree_map::Values<'_, EncounterKey, LedgerEntry> {
        self.entries.values()
    }

    /// Entries in persistence order: ascending by raw date-of-service text
    ///
    /// The sort is lexicographic on the stored string, not calendar-aware,
    /// matching the historical file format. Ties keep key order (stable).
    pub fn entries_by_service_date(&self) -> Vec<&LedgerEntry> {
        let mut rows: Vec<&LedgerEntry> = self.entries.values().collect();
        rows.sort_by(|a, b| a.date_of_service.cmp(&b.date_of_service));
        rows
    }

    /// Builds a ledger from loaded entries; later duplicates of a key win
    pub fn from_entries(entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.insert(entry);
        }
        ledger
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = btree_map::Values<'a, EncounterKey, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(patient: &str, dos: &str) -> LedgerEntry {
        let encounter = Encounter {
            patient_name: patient.to_string(),
            date_of_service: dos.to_string(),
            ..Default::default()
        };
        LedgerEntry::from_encounter(&encounter, "Missing DX", "12-09-2025")
    }

    #[test]
    fn test_from_encounter_pins_billed_flag() {
        let e = entry("Doe, Jane", "12-09-2025");
        assert_eq!(e.billed, LEDGER_BILLED_FLAG);
        assert_eq!(e.reason, "Missing DX");
        assert_eq!(e.last_attempt, "12-09-2025");
    }

    #[test]
    fn test_insert_deduplicates_by_key() {
        let mut ledger = Ledger::new();
        ledger.insert(entry("Doe, Jane", "12-09-2025"));
        ledger.insert(entry("Doe, Jane", "12-09-2025"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_entries_by_service_date_sorts_lexicographically() {
        let ledger = Ledger::from_entries([
            entry("A", "12-09-2025"),
            entry("B", "01-02-2026"),
            entry("C", "11-30-2025"),
        ]);
        let dates: Vec<&str> = ledger
            .entries_by_service_date()
            .iter()
            .map(|e| e.date_of_service.as_str())
            .collect();
        // Raw string order, not calendar order: "01-02-2026" sorts first
        assert_eq!(dates, vec!["01-02-2026", "11-30-2025", "12-09-2025"]);
    }

    #[test]
    fn test_derive_key_matches_full_encounter_without_cpt() {
        let encounter = Encounter {
            patient_name: "Doe, Jane".to_string(),
            dob: "01-15-1950".to_string(),
            date_of_service: "12-09-2025".to_string(),
            facility: "Hospital A".to_string(),
            ..Default::default()
        };
        let direct = EncounterKey::from_encounter(&encounter);
        let derived = LedgerEntry::derive_key("Doe, Jane", "01-15-1950", "12-09-2025", "Hospital A");
        assert_eq!(direct, derived);
    }
}

//! Encounter domain model
//!
//! This module defines the core Encounter type representing one clinical
//! visit parsed from a daily extract.

use serde::{Deserialize, Serialize};

/// Represents one clinical encounter from a daily extract file
///
/// All fields are free-form text as they appear in the extract; several are
/// legitimately empty. Encounters are immutable once parsed and are never
/// persisted directly - only ledger entries and report rows derived from
/// them survive the run.
///
/// Instances are built exclusively by the record-source adapter, which maps
/// the extract's column headers onto this fixed shape. Nothing downstream
/// performs name-based field lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Patient name as exported ("Last, First")
    pub patient_name: String,

    /// Date of birth, format varies by export source
    pub dob: String,

    /// Date of service, format varies by export source
    pub date_of_service: String,

    /// Type of care (e.g. "LTC")
    pub type_of_care: String,

    /// Type of visit (e.g. "New", "Follow-up")
    pub type_of_visit: String,

    /// Facility name
    pub facility: String,

    /// Room number
    pub room: String,

    /// Diagnosis codes (DX), comma-separated
    pub assessment: String,

    /// Procedure code (CPT)
    pub cpt: String,

    /// Chief complaint
    pub chief_complaint: String,

    /// Visit type classification (e.g. "Established")
    pub visit_type: String,

    /// Servicing provider name
    pub servicing_provider: String,

    /// Supervising provider name
    pub supervising_provider: String,

    /// Time of visit
    pub time: String,

    /// Code status (e.g. "Full Code")
    pub code_status: String,

    /// Observation notes
    pub observation: String,

    /// Encounter status (e.g. "Completed")
    pub encounter_status: String,

    /// Auxiliary status column
    pub status_aux: String,

    /// Date the extract was exported
    pub export_date: String,
}

impl Encounter {
    /// Returns true when every field is empty or whitespace-only
    ///
    /// Used by the record source to skip blank spreadsheet rows before they
    /// reach the core.
    pub fn is_blank(&self) -> bool {
        [
            &self.patient_name,
            &self.dob,
            &self.date_of_service,
            &self.type_of_care,
            &self.type_of_visit,
            &self.facility,
            &self.room,
            &self.assessment,
            &self.cpt,
            &self.chief_complaint,
            &self.visit_type,
            &self.servicing_provider,
            &self.supervising_provider,
            &self.time,
            &self.code_status,
            &self.observation,
            &self.encounter_status,
            &self.status_aux,
            &self.export_date,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encounter_is_blank() {
        assert!(Encounter::default().is_blank());
    }

    #[test]
    fn test_whitespace_only_encounter_is_blank() {
        let encounter = Encounter {
            patient_name: "   ".to_string(),
            room: "\t".to_string(),
            ..Default::default()
        };
        assert!(encounter.is_blank());
    }

    #[test]
    fn test_encounter_with_any_field_is_not_blank() {
        let encounter = Encounter {
            cpt: "99213".to_string(),
            ..Default::default()
        };
        assert!(!encounter.is_blank());
    }
}

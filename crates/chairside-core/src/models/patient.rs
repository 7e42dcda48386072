//! Patient models and the derived visit summary.

use serde::{Deserialize, Serialize};

use super::record::{PatientStatus, TreatmentRecord, TreatmentRecordPatch, TreatmentType};

/// Patient gender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A patient's identity and contact details.
///
/// Visit state (status, current treatment, next visit date) is not stored
/// here; it is derived from the patient's treatment records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique patient ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Clinic card number, if issued
    pub card_number: Option<String>,
    /// Free-text age (may include units or ranges)
    pub age: Option<String>,
    pub gender: Option<Gender>,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with generated ID and timestamps.
    pub fn new(name: String, phone: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
            card_number: None,
            age: None,
            gender: None,
            avatar: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Snapshot of a patient's current visit, derived from their latest
/// treatment record.
///
/// Never stored: recomputed on every read so that deleting or editing
/// records immediately changes what the patient looks like.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
    /// Date of the latest visit, if any record exists
    pub visit_date: Option<String>,
    /// Time of the latest visit
    pub time: String,
    /// Status of the latest visit
    pub status: PatientStatus,
    /// Type of the latest visit
    pub treatment_type: TreatmentType,
    /// Description of the latest visit
    pub desc: String,
    /// Tooth positions of the latest visit
    pub tooth_pos: Option<String>,
    /// Image attached to the latest visit
    pub image_url: Option<String>,
}

impl VisitSummary {
    /// Derive the summary from records ordered latest-first.
    pub fn from_records(records: &[TreatmentRecord]) -> Self {
        match records.first() {
            Some(latest) => Self {
                visit_date: Some(latest.date.clone()),
                time: latest.time.clone(),
                status: latest.status.clone(),
                treatment_type: latest.treatment_type.clone(),
                desc: latest.desc.clone(),
                tooth_pos: Some(latest.tooth_pos.clone()),
                image_url: latest.image_url.clone(),
            },
            None => Self::default(),
        }
    }
}

impl Default for VisitSummary {
    /// Summary for a patient with no recorded visits.
    fn default() -> Self {
        Self {
            visit_date: None,
            time: "00:00".into(),
            status: PatientStatus::Waiting,
            treatment_type: TreatmentType::Initial,
            desc: String::new(),
            tooth_pos: None,
            image_url: None,
        }
    }
}

/// A patient joined with their derived visit summary and full treatment
/// history, latest record first.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    #[serde(flatten)]
    pub patient: Patient,
    #[serde(flatten)]
    pub summary: VisitSummary,
    pub records: Vec<TreatmentRecord>,
}

impl PatientProfile {
    /// Assemble a profile; `records` must be ordered latest-first.
    pub fn new(patient: Patient, records: Vec<TreatmentRecord>) -> Self {
        let summary = VisitSummary::from_records(&records);
        Self {
            patient,
            summary,
            records,
        }
    }
}

/// Payload for registering a patient, optionally with a first visit.
///
/// A record is created for the first visit only when `desc` is non-empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub card_number: Option<String>,
    pub age: Option<String>,
    pub gender: Option<Gender>,
    pub avatar: Option<String>,
    pub visit_date: Option<String>,
    pub time: Option<String>,
    pub status: Option<PatientStatus>,
    pub treatment_type: Option<TreatmentType>,
    pub desc: Option<String>,
    pub tooth_pos: Option<String>,
    pub image_url: Option<String>,
}

impl NewPatient {
    /// The visit fields of the payload, as a record patch.
    pub fn visit_patch(&self) -> TreatmentRecordPatch {
        TreatmentRecordPatch {
            date: self.visit_date.clone(),
            time: self.time.clone(),
            tooth_pos: self.tooth_pos.clone(),
            desc: self.desc.clone(),
            status: self.status.clone(),
            treatment_type: self.treatment_type.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Partial update for a patient; `None` fields are left untouched.
///
/// Visit fields are applied to the patient's latest record, or to a fresh
/// record when the patient has none.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub card_number: Option<String>,
    pub age: Option<String>,
    pub gender: Option<Gender>,
    pub avatar: Option<String>,
    pub visit_date: Option<String>,
    pub time: Option<String>,
    pub status: Option<PatientStatus>,
    pub treatment_type: Option<TreatmentType>,
    pub desc: Option<String>,
    pub tooth_pos: Option<String>,
    pub image_url: Option<String>,
}

impl PatientPatch {
    /// True when the patch carries visit state that must land on a
    /// treatment record.
    pub fn touches_visit(&self) -> bool {
        self.desc.is_some() || self.status.is_some()
    }

    /// The visit fields of the patch, as a record patch.
    pub fn visit_patch(&self) -> TreatmentRecordPatch {
        TreatmentRecordPatch {
            date: self.visit_date.clone(),
            time: self.time.clone(),
            tooth_pos: self.tooth_pos.clone(),
            desc: self.desc.clone(),
            status: self.status.clone(),
            treatment_type: self.treatment_type.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(date: &str, time: &str, status: PatientStatus) -> TreatmentRecord {
        let mut record =
            TreatmentRecord::new("patient-123".into(), date.to_string(), time.to_string());
        record.status = status;
        record.desc = "scaling".into();
        record.tooth_pos = "UL1".into();
        record
    }

    #[test]
    fn test_patient_new() {
        let patient = Patient::new("Alice Zhang".into(), "13800000000".into());
        assert_eq!(patient.name, "Alice Zhang");
        assert_eq!(patient.phone, "13800000000");
        assert_eq!(patient.id.len(), 36);
        assert!(patient.card_number.is_none());
    }

    #[test]
    fn test_summary_from_latest_record() {
        let records = vec![
            make_record("2025-06-11", "10:00", PatientStatus::Waiting),
            make_record("2025-06-10", "09:30", PatientStatus::Completed),
        ];
        let summary = VisitSummary::from_records(&records);
        assert_eq!(summary.visit_date.as_deref(), Some("2025-06-11"));
        assert_eq!(summary.time, "10:00");
        assert!(matches!(summary.status, PatientStatus::Waiting));
        assert_eq!(summary.desc, "scaling");
        assert_eq!(summary.tooth_pos.as_deref(), Some("UL1"));
    }

    #[test]
    fn test_summary_defaults_when_no_records() {
        let summary = VisitSummary::from_records(&[]);
        assert!(summary.visit_date.is_none());
        assert_eq!(summary.time, "00:00");
        assert!(matches!(summary.status, PatientStatus::Waiting));
        assert!(matches!(summary.treatment_type, TreatmentType::Initial));
        assert_eq!(summary.desc, "");
        assert!(summary.tooth_pos.is_none());
    }

    #[test]
    fn test_profile_flattens_summary_onto_patient() {
        let patient = Patient::new("Alice Zhang".into(), "13800000000".into());
        let records = vec![make_record("2025-06-10", "09:30", PatientStatus::Completed)];
        let profile = PatientProfile::new(patient, records);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Alice Zhang");
        assert_eq!(json["visitDate"], "2025-06-10");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["records"].as_array().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_patch_touches_visit() {
        let patch = PatientPatch {
            name: Some("Bob".into()),
            ..Default::default()
        };
        assert!(!patch.touches_visit());

        let patch = PatientPatch {
            status: Some(PatientStatus::Completed),
            ..Default::default()
        };
        assert!(patch.touches_visit());
    }
}

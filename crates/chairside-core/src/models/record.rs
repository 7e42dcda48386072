//! Treatment record models for patient visit history.

use serde::{Deserialize, Serialize};

/// Workflow status of a visit.
///
/// Stored on each treatment record; the patient's visible status is the
/// status of their latest record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    /// In the waiting room, not yet seen
    Waiting,
    /// Visit finished
    Completed,
    /// Currently in the chair
    InProgress,
    /// Booked for a future visit
    Appointment,
}

impl PatientStatus {
    /// Canonical storage/wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "waiting",
            PatientStatus::Completed => "completed",
            PatientStatus::InProgress => "in-progress",
            PatientStatus::Appointment => "appointment",
        }
    }

    /// Parse a storage string back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(PatientStatus::Waiting),
            "completed" => Some(PatientStatus::Completed),
            "in-progress" => Some(PatientStatus::InProgress),
            "appointment" => Some(PatientStatus::Appointment),
            _ => None,
        }
    }
}

/// Whether a visit is a first consultation or a return visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentType {
    Initial,
    FollowUp,
}

impl TreatmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentType::Initial => "initial",
            TreatmentType::FollowUp => "follow-up",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "initial" => Some(TreatmentType::Initial),
            "follow-up" => Some(TreatmentType::FollowUp),
            _ => None,
        }
    }
}

/// One dated treatment entry in a patient's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecord {
    /// Unique record ID
    pub id: String,
    /// Owning patient ID
    pub patient_id: String,
    /// Visit date (YYYY-MM-DD)
    pub date: String,
    /// Visit time (HH:MM, zero-padded)
    pub time: String,
    /// Comma-separated tooth position tokens, empty for unspecified
    pub tooth_pos: String,
    /// Treatment description
    pub desc: String,
    /// Visit status at this entry
    pub status: PatientStatus,
    /// Initial consultation or follow-up
    pub treatment_type: TreatmentType,
    /// Optional attached image
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl TreatmentRecord {
    /// Create a new record with generated ID and timestamps.
    pub fn new(patient_id: String, date: String, time: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            time,
            tooth_pos: String::new(),
            desc: String::new(),
            status: PatientStatus::Completed,
            treatment_type: TreatmentType::FollowUp,
            image_url: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Payload for creating a treatment record.
///
/// Omitted fields fall back to the follow-up defaults: today's date,
/// midnight time, completed status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTreatmentRecord {
    pub patient_id: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub tooth_pos: Option<String>,
    pub desc: Option<String>,
    pub status: Option<PatientStatus>,
    pub treatment_type: Option<TreatmentType>,
    pub image_url: Option<String>,
}

/// Partial update for a treatment record; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecordPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub tooth_pos: Option<String>,
    pub desc: Option<String>,
    pub status: Option<PatientStatus>,
    pub treatment_type: Option<TreatmentType>,
    pub image_url: Option<String>,
}

/// A treatment record joined with identifying patient fields, for
/// cross-patient range queries.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordWithPatient {
    #[serde(flatten)]
    pub record: TreatmentRecord,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = TreatmentRecord::new("patient-123".into(), "2025-06-10".into(), "09:30".into());
        assert_eq!(record.patient_id, "patient-123");
        assert_eq!(record.date, "2025-06-10");
        assert_eq!(record.time, "09:30");
        assert_eq!(record.id.len(), 36);
        assert!(matches!(record.status, PatientStatus::Completed));
        assert!(matches!(record.treatment_type, TreatmentType::FollowUp));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            PatientStatus::Waiting,
            PatientStatus::Completed,
            PatientStatus::InProgress,
            PatientStatus::Appointment,
        ] {
            assert_eq!(PatientStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PatientStatus::parse("unknown"), None);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PatientStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let json = serde_json::to_string(&TreatmentType::FollowUp).unwrap();
        assert_eq!(json, "\"follow-up\"");
    }

    #[test]
    fn test_record_wire_uses_camel_case() {
        let record = TreatmentRecord::new("p-1".into(), "2025-06-10".into(), "08:00".into());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("patientId").is_some());
        assert!(json.get("toothPos").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("patient_id").is_none());
    }
}

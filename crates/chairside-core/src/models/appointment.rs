//! Appointment book models.

use serde::{Deserialize, Serialize};

/// State of a slot in the appointment book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Held by a patient
    Booked,
    /// Open for booking
    Free,
    /// Blocked out (lunch, cleaning, staff off)
    Break,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::Free => "free",
            AppointmentStatus::Break => "break",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "booked" => Some(AppointmentStatus::Booked),
            "free" => Some(AppointmentStatus::Free),
            "break" => Some(AppointmentStatus::Break),
            _ => None,
        }
    }
}

/// One slot in the appointment book.
///
/// Slots are stored with a full timestamp so the book can be filtered by
/// day; on the wire only the clock time is exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment ID
    pub id: String,
    /// Patient display name (free text, not a patient reference)
    pub patient_name: String,
    /// Contact phone number
    pub phone: String,
    /// What the slot is for (free text)
    #[serde(rename = "type")]
    pub appointment_type: String,
    /// Clock time of the slot (HH:MM, zero-padded)
    pub time: String,
    pub status: AppointmentStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Appointment {
    /// Create a new booked slot with generated ID and timestamps.
    pub fn new(patient_name: String, phone: String, appointment_type: String, time: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_name,
            phone,
            appointment_type,
            time,
            status: AppointmentStatus::Booked,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Payload for booking an appointment slot.
///
/// `date` defaults to today when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_name: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub date: Option<String>,
    pub time: String,
    pub status: Option<AppointmentStatus>,
}

/// Partial update for an appointment; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            AppointmentStatus::Booked,
            AppointmentStatus::Free,
            AppointmentStatus::Break,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("held"), None);
    }

    #[test]
    fn test_type_field_wire_name() {
        let json = r#"{
            "patientName": "Alice Zhang",
            "phone": "13800000000",
            "type": "scaling",
            "time": "09:30",
            "status": "booked"
        }"#;
        let slot: NewAppointment = serde_json::from_str(json).unwrap();
        assert_eq!(slot.appointment_type, "scaling");
        assert_eq!(slot.time, "09:30");
        assert!(slot.date.is_none());
        assert!(matches!(slot.status, Some(AppointmentStatus::Booked)));
    }
}

//! Day and month visit roster.
//!
//! Selects which patients appear on the worklist for a calendar day or
//! month. Each patient contributes at most one occurrence per query: the
//! derived visit summary wins when its date matches, otherwise the visit
//! can still surface from an older treatment record on that day.

use serde::Serialize;

use crate::models::{PatientProfile, PatientStatus, TreatmentRecord, TreatmentType};

/// Tooth position shown when a visit does not name specific teeth.
pub const WHOLE_MOUTH: &str = "whole-mouth";

/// A roster request: one month, optionally narrowed to a day, optionally
/// filtered by a search string.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterQuery {
    pub year: i32,
    pub month: u32,
    /// `None` selects the whole month.
    pub day: Option<u32>,
    /// Case-sensitive substring matched against patient name or phone.
    /// Empty matches everyone.
    pub search: String,
}

impl RosterQuery {
    /// Query for a whole month.
    pub fn month_of(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            day: None,
            search: String::new(),
        }
    }

    /// Query for a single day.
    pub fn day_of(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day: Some(day),
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Date prefix compared against visit dates: `YYYY-MM` in month mode,
    /// `YYYY-MM-DD` in day mode.
    fn target(&self) -> String {
        match self.day {
            Some(day) => format!("{:04}-{:02}-{:02}", self.year, self.month, day),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }
}

/// One row on the visit roster.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitOccurrence {
    pub patient_id: String,
    pub patient_name: String,
    pub card_number: Option<String>,
    pub avatar: Option<String>,
    /// Always the patient's current treatment type, even when the row
    /// itself comes from an older record
    pub treatment_type: TreatmentType,
    pub time: String,
    pub desc: String,
    pub tooth_pos: String,
    pub completed: bool,
}

/// Build the roster for `query` out of patient profiles.
///
/// Incomplete visits sort before completed ones; ties keep ascending
/// clock time. The sort is stable, so equal keys preserve input order.
pub fn select_visits(profiles: &[PatientProfile], query: &RosterQuery) -> Vec<VisitOccurrence> {
    let target = query.target();
    let mut visits = Vec::new();

    for profile in profiles {
        let patient = &profile.patient;
        let matches_search = patient.name.contains(&query.search)
            || patient.phone.contains(&query.search);
        if !matches_search {
            continue;
        }

        match query.day {
            None => {
                let summary_in_month = profile
                    .summary
                    .visit_date
                    .as_deref()
                    .is_some_and(|d| d.starts_with(&target));
                let record_in_month = profile
                    .records
                    .iter()
                    .any(|r| r.date.starts_with(&target));
                if summary_in_month || record_in_month {
                    visits.push(from_summary(profile));
                }
            }
            Some(_) => {
                if profile.summary.visit_date.as_deref() == Some(target.as_str()) {
                    visits.push(from_summary(profile));
                } else if let Some(record) =
                    profile.records.iter().find(|r| r.date == target)
                {
                    visits.push(from_record(profile, record));
                }
            }
        }
    }

    visits.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.time.cmp(&b.time))
    });
    visits
}

/// Occurrence taken from the patient's derived summary.
fn from_summary(profile: &PatientProfile) -> VisitOccurrence {
    let summary = &profile.summary;
    VisitOccurrence {
        patient_id: profile.patient.id.clone(),
        patient_name: profile.patient.name.clone(),
        card_number: profile.patient.card_number.clone(),
        avatar: profile.patient.avatar.clone(),
        treatment_type: summary.treatment_type.clone(),
        time: summary.time.clone(),
        desc: summary.desc.clone(),
        tooth_pos: summary
            .tooth_pos
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(WHOLE_MOUTH)
            .to_string(),
        completed: summary.status == PatientStatus::Completed,
    }
}

/// Occurrence taken from a historical record. Past entries count as done
/// no matter what status they were saved with.
fn from_record(profile: &PatientProfile, record: &TreatmentRecord) -> VisitOccurrence {
    VisitOccurrence {
        patient_id: profile.patient.id.clone(),
        patient_name: profile.patient.name.clone(),
        card_number: profile.patient.card_number.clone(),
        avatar: profile.patient.avatar.clone(),
        treatment_type: profile.summary.treatment_type.clone(),
        time: record.time.clone(),
        desc: record.desc.clone(),
        tooth_pos: record.tooth_pos.clone(),
        completed: true,
    }
}

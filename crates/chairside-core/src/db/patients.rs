//! Patient database operations.
//!
//! Creating or updating a patient can touch the treatment history in the
//! same transaction: a described first visit is recorded at registration,
//! and visit-level fields on an update land on the latest record (or open
//! a new one for patients with no history yet).

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension};

use super::records::{
    apply_record_patch, insert_record, latest_record, records_for_patient, update_record,
};
use super::{today, Database, DbError, DbResult};
use crate::models::{
    Gender, NewPatient, Patient, PatientPatch, PatientProfile, PatientStatus, TreatmentRecord,
    TreatmentRecordPatch, TreatmentType,
};

impl Database {
    /// Insert a fully-built patient row.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        insert_patient(&self.conn, patient)
    }

    /// Register a patient, recording the first visit when one is
    /// described. Both writes commit together.
    pub fn create_patient(&mut self, payload: &NewPatient) -> DbResult<PatientProfile> {
        let mut patient = Patient::new(payload.name.clone(), payload.phone.clone());
        patient.card_number = payload.card_number.clone();
        patient.age = payload.age.clone();
        patient.gender = payload.gender.clone();
        patient.avatar = payload.avatar.clone();

        let tx = self.conn.transaction()?;
        insert_patient(&tx, &patient)?;

        // A first visit only enters the history when it says something.
        let described = payload.desc.as_deref().is_some_and(|d| !d.is_empty());
        if described {
            let record = new_visit_record(patient.id.clone(), &payload.visit_patch());
            insert_record(&tx, &record)?;
        }
        tx.commit()?;

        self.get_patient_profile(&patient.id)?
            .ok_or_else(|| DbError::NotFound(format!("patient {}", patient.id)))
    }

    /// Get a patient row by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        get_patient(&self.conn, id)
    }

    /// Get a patient with their derived summary and full history.
    pub fn get_patient_profile(&self, id: &str) -> DbResult<Option<PatientProfile>> {
        match self.get_patient(id)? {
            Some(patient) => {
                let records = records_for_patient(&self.conn, id)?;
                Ok(Some(PatientProfile::new(patient, records)))
            }
            None => Ok(None),
        }
    }

    /// List all patients, most recently registered first.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, phone, card_number, age, gender, avatar, created_at, updated_at
            FROM patients
            ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], patient_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// List every patient profile using two queries total, however many
    /// patients there are: one for patients, one for records.
    pub fn list_patient_profiles(&self) -> DbResult<Vec<PatientProfile>> {
        let patients = self.list_patients()?;

        let mut grouped: HashMap<String, Vec<TreatmentRecord>> = HashMap::new();
        for record in self.list_records()? {
            grouped.entry(record.patient_id.clone()).or_default().push(record);
        }

        Ok(patients
            .into_iter()
            .map(|patient| {
                let records = grouped.remove(&patient.id).unwrap_or_default();
                PatientProfile::new(patient, records)
            })
            .collect())
    }

    /// Apply a partial update. Identity fields merge onto the patient row;
    /// visit fields merge onto the latest record, or open a fresh one for
    /// a patient with no history. All writes commit together.
    pub fn update_patient(&mut self, id: &str, patch: &PatientPatch) -> DbResult<PatientProfile> {
        let tx = self.conn.transaction()?;

        let mut patient = match get_patient(&tx, id)? {
            Some(patient) => patient,
            None => return Err(DbError::NotFound(format!("patient {id}"))),
        };

        if let Some(name) = &patch.name {
            patient.name = name.clone();
        }
        if let Some(phone) = &patch.phone {
            patient.phone = phone.clone();
        }
        if let Some(card_number) = &patch.card_number {
            patient.card_number = Some(card_number.clone());
        }
        if let Some(age) = &patch.age {
            patient.age = Some(age.clone());
        }
        if let Some(gender) = &patch.gender {
            patient.gender = Some(gender.clone());
        }
        if let Some(avatar) = &patch.avatar {
            patient.avatar = Some(avatar.clone());
        }
        update_patient(&tx, &patient)?;

        if patch.touches_visit() {
            let visit_patch = patch.visit_patch();
            match latest_record(&tx, id)? {
                Some(mut record) => {
                    apply_record_patch(&mut record, &visit_patch);
                    update_record(&tx, &record)?;
                }
                None => {
                    let record = new_visit_record(id.to_string(), &visit_patch);
                    insert_record(&tx, &record)?;
                }
            }
        }
        tx.commit()?;

        self.get_patient_profile(id)?
            .ok_or_else(|| DbError::NotFound(format!("patient {id}")))
    }

    /// Delete a patient; their treatment records go with them.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Build the record for a visit that starts a patient's history: waiting
/// and initial unless the payload says otherwise.
fn new_visit_record(patient_id: String, patch: &TreatmentRecordPatch) -> TreatmentRecord {
    let date = patch.date.clone().unwrap_or_else(today);
    let time = patch.time.clone().unwrap_or_else(|| "00:00".into());

    let mut record = TreatmentRecord::new(patient_id, date, time);
    record.status = PatientStatus::Waiting;
    record.treatment_type = TreatmentType::Initial;
    apply_record_patch(&mut record, patch);
    record
}

pub(super) fn insert_patient(conn: &Connection, patient: &Patient) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO patients (
            id, name, phone, card_number, age, gender, avatar, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            patient.id,
            patient.name,
            patient.phone,
            patient.card_number,
            patient.age,
            patient.gender.as_ref().map(|g| g.as_str()),
            patient.avatar,
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(())
}

pub(super) fn update_patient(conn: &Connection, patient: &Patient) -> DbResult<()> {
    conn.execute(
        r#"
        UPDATE patients SET
            name = ?2,
            phone = ?3,
            card_number = ?4,
            age = ?5,
            gender = ?6,
            avatar = ?7,
            updated_at = datetime('now')
        WHERE id = ?1
        "#,
        params![
            patient.id,
            patient.name,
            patient.phone,
            patient.card_number,
            patient.age,
            patient.gender.as_ref().map(|g| g.as_str()),
            patient.avatar,
        ],
    )?;
    Ok(())
}

pub(super) fn get_patient(conn: &Connection, id: &str) -> DbResult<Option<Patient>> {
    conn.query_row(
        r#"
        SELECT id, name, phone, card_number, age, gender, avatar, created_at, updated_at
        FROM patients
        WHERE id = ?
        "#,
        [id],
        patient_row,
    )
    .optional()?
    .map(|row| row.try_into())
    .transpose()
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    phone: String,
    card_number: Option<String>,
    age: Option<String>,
    gender: Option<String>,
    avatar: Option<String>,
    created_at: String,
    updated_at: String,
}

fn patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        card_number: row.get(3)?,
        age: row.get(4)?,
        gender: row.get(5)?,
        avatar: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender = match row.gender {
            Some(g) => Some(
                Gender::parse(&g)
                    .ok_or_else(|| DbError::Constraint(format!("Unknown gender: {g}")))?,
            ),
            None => None,
        };

        Ok(Patient {
            id: row.id,
            name: row.name,
            phone: row.phone,
            card_number: row.card_number,
            age: row.age,
            gender,
            avatar: row.avatar,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

//! Treatment record database operations.

use rusqlite::{params, Connection, OptionalExtension};

use super::{today, Database, DbError, DbResult};
use crate::models::{
    NewTreatmentRecord, PatientStatus, RecordWithPatient, TreatmentRecord, TreatmentRecordPatch,
    TreatmentType,
};

impl Database {
    /// Insert a fully-built treatment record.
    pub fn insert_record(&self, record: &TreatmentRecord) -> DbResult<()> {
        insert_record(&self.conn, record)
    }

    /// Create a record from a request payload, applying follow-up
    /// defaults for any omitted field.
    pub fn create_record(&self, payload: &NewTreatmentRecord) -> DbResult<TreatmentRecord> {
        let record = record_from_payload(payload);
        insert_record(&self.conn, &record)?;
        Ok(record)
    }

    /// Get a record by ID.
    pub fn get_record(&self, id: &str) -> DbResult<Option<TreatmentRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, patient_id, visit_date, visit_time, tooth_position,
                       description, status, treatment_type, image_url, created_at, updated_at
                FROM treatment_records
                WHERE id = ?
                "#,
                [id],
                record_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List a patient's records, latest visit first.
    pub fn records_for_patient(&self, patient_id: &str) -> DbResult<Vec<TreatmentRecord>> {
        records_for_patient(&self.conn, patient_id)
    }

    /// List every record, latest visit first.
    pub fn list_records(&self) -> DbResult<Vec<TreatmentRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_id, visit_date, visit_time, tooth_position,
                   description, status, treatment_type, image_url, created_at, updated_at
            FROM treatment_records
            ORDER BY visit_date DESC, created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], record_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }
        Ok(records)
    }

    /// Apply a partial update; untouched fields keep their stored value.
    pub fn update_record(&self, id: &str, patch: &TreatmentRecordPatch) -> DbResult<TreatmentRecord> {
        let mut record = self
            .get_record(id)?
            .ok_or_else(|| DbError::NotFound(format!("treatment record {id}")))?;

        apply_record_patch(&mut record, patch);
        update_record(&self.conn, &record)?;

        self.get_record(id)?
            .ok_or_else(|| DbError::NotFound(format!("treatment record {id}")))
    }

    /// Delete a record.
    pub fn delete_record(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM treatment_records WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Records across all patients within an inclusive date range, joined
    /// with identifying patient fields. Either bound may be open.
    pub fn records_in_range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> DbResult<Vec<RecordWithPatient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, r.patient_id, r.visit_date, r.visit_time, r.tooth_position,
                   r.description, r.status, r.treatment_type, r.image_url, r.created_at, r.updated_at,
                   p.name, p.phone, p.avatar
            FROM treatment_records r
            JOIN patients p ON p.id = r.patient_id
            WHERE (?1 IS NULL OR r.visit_date >= ?1)
              AND (?2 IS NULL OR r.visit_date <= ?2)
            ORDER BY r.visit_date DESC, r.created_at DESC
            "#,
        )?;

        let rows = stmt.query_map(params![start_date, end_date], |row| {
            Ok((
                record_row(row)?,
                row.get::<_, String>(11)?,
                row.get::<_, String>(12)?,
                row.get::<_, Option<String>>(13)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (record, patient_name, patient_phone, patient_avatar) = row?;
            records.push(RecordWithPatient {
                record: record.try_into()?,
                patient_name,
                patient_phone,
                patient_avatar,
            });
        }
        Ok(records)
    }
}

/// Build a record from a creation payload.
fn record_from_payload(payload: &NewTreatmentRecord) -> TreatmentRecord {
    let date = payload.date.clone().unwrap_or_else(today);
    let time = payload.time.clone().unwrap_or_else(|| "00:00".into());

    let mut record = TreatmentRecord::new(payload.patient_id.clone(), date, time);
    if let Some(tooth_pos) = &payload.tooth_pos {
        record.tooth_pos = tooth_pos.clone();
    }
    if let Some(desc) = &payload.desc {
        record.desc = desc.clone();
    }
    if let Some(status) = &payload.status {
        record.status = status.clone();
    }
    if let Some(treatment_type) = &payload.treatment_type {
        record.treatment_type = treatment_type.clone();
    }
    record.image_url = payload.image_url.clone();
    record
}

/// Copy provided patch fields onto an existing record.
pub(super) fn apply_record_patch(record: &mut TreatmentRecord, patch: &TreatmentRecordPatch) {
    if let Some(date) = &patch.date {
        record.date = date.clone();
    }
    if let Some(time) = &patch.time {
        record.time = time.clone();
    }
    if let Some(tooth_pos) = &patch.tooth_pos {
        record.tooth_pos = tooth_pos.clone();
    }
    if let Some(desc) = &patch.desc {
        record.desc = desc.clone();
    }
    if let Some(status) = &patch.status {
        record.status = status.clone();
    }
    if let Some(treatment_type) = &patch.treatment_type {
        record.treatment_type = treatment_type.clone();
    }
    if let Some(image_url) = &patch.image_url {
        record.image_url = Some(image_url.clone());
    }
}

/// Shared by plain and transactional callers.
pub(super) fn insert_record(conn: &Connection, record: &TreatmentRecord) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO treatment_records (
            id, patient_id, visit_date, visit_time, tooth_position,
            description, status, treatment_type, image_url, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            record.id,
            record.patient_id,
            record.date,
            record.time,
            record.tooth_pos,
            record.desc,
            record.status.as_str(),
            record.treatment_type.as_str(),
            record.image_url,
            record.created_at,
            record.updated_at,
        ],
    )?;
    Ok(())
}

pub(super) fn update_record(conn: &Connection, record: &TreatmentRecord) -> DbResult<()> {
    conn.execute(
        r#"
        UPDATE treatment_records SET
            visit_date = ?2,
            visit_time = ?3,
            tooth_position = ?4,
            description = ?5,
            status = ?6,
            treatment_type = ?7,
            image_url = ?8,
            updated_at = datetime('now')
        WHERE id = ?1
        "#,
        params![
            record.id,
            record.date,
            record.time,
            record.tooth_pos,
            record.desc,
            record.status.as_str(),
            record.treatment_type.as_str(),
            record.image_url,
        ],
    )?;
    Ok(())
}

pub(super) fn records_for_patient(
    conn: &Connection,
    patient_id: &str,
) -> DbResult<Vec<TreatmentRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, patient_id, visit_date, visit_time, tooth_position,
               description, status, treatment_type, image_url, created_at, updated_at
        FROM treatment_records
        WHERE patient_id = ?
        ORDER BY visit_date DESC, created_at DESC
        "#,
    )?;

    let rows = stmt.query_map([patient_id], record_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?.try_into()?);
    }
    Ok(records)
}

pub(super) fn latest_record(
    conn: &Connection,
    patient_id: &str,
) -> DbResult<Option<TreatmentRecord>> {
    conn.query_row(
        r#"
        SELECT id, patient_id, visit_date, visit_time, tooth_position,
               description, status, treatment_type, image_url, created_at, updated_at
        FROM treatment_records
        WHERE patient_id = ?
        ORDER BY visit_date DESC, created_at DESC
        LIMIT 1
        "#,
        [patient_id],
        record_row,
    )
    .optional()?
    .map(|row| row.try_into())
    .transpose()
}

/// Intermediate row struct for database mapping.
pub(super) struct RecordRow {
    id: String,
    patient_id: String,
    visit_date: String,
    visit_time: String,
    tooth_position: String,
    description: String,
    status: String,
    treatment_type: String,
    image_url: Option<String>,
    created_at: String,
    updated_at: String,
}

pub(super) fn record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        visit_date: row.get(2)?,
        visit_time: row.get(3)?,
        tooth_position: row.get(4)?,
        description: row.get(5)?,
        status: row.get(6)?,
        treatment_type: row.get(7)?,
        image_url: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl TryFrom<RecordRow> for TreatmentRecord {
    type Error = DbError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let status = PatientStatus::parse(&row.status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown visit status: {}", row.status)))?;
        let treatment_type = TreatmentType::parse(&row.treatment_type).ok_or_else(|| {
            DbError::Constraint(format!("Unknown treatment type: {}", row.treatment_type))
        })?;

        Ok(TreatmentRecord {
            id: row.id,
            patient_id: row.patient_id,
            date: row.visit_date,
            time: row.visit_time,
            tooth_pos: row.tooth_position,
            desc: row.description,
            status,
            treatment_type,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

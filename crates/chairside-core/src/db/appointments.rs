//! Appointment database operations.
//!
//! Slots are stored with a full `YYYY-MM-DDTHH:MM:SS` timestamp so the
//! book can be filtered by day; callers only ever see the clock time.

use rusqlite::{params, OptionalExtension};

use super::{today, Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};

impl Database {
    /// Book a slot. The clock time is composed onto the payload date, or
    /// onto today when no date is given.
    pub fn create_appointment(&self, payload: &NewAppointment) -> DbResult<Appointment> {
        let date = payload.date.clone().unwrap_or_else(today);

        let mut appointment = Appointment::new(
            payload.patient_name.clone(),
            payload.phone.clone(),
            payload.appointment_type.clone(),
            payload.time.clone(),
        );
        if let Some(status) = &payload.status {
            appointment.status = status.clone();
        }

        self.conn.execute(
            r#"
            INSERT INTO appointments (
                id, patient_name, phone, appointment_type, appointment_time,
                status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                appointment.id,
                appointment.patient_name,
                appointment.phone,
                appointment.appointment_type,
                compose_stamp(&date, &appointment.time),
                appointment.status.as_str(),
                appointment.created_at,
                appointment.updated_at,
            ],
        )?;
        Ok(appointment)
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        fetch_row(&self.conn, id)?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List appointments in clock order, optionally restricted to a
    /// single day (`YYYY-MM-DD`).
    pub fn list_appointments(&self, date: Option<&str>) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_name, phone, appointment_type, appointment_time,
                   status, created_at, updated_at
            FROM appointments
            WHERE (?1 IS NULL
                   OR (appointment_time >= ?1 || 'T00:00:00'
                       AND appointment_time <= ?1 || 'T23:59:59'))
            ORDER BY appointment_time ASC
            "#,
        )?;

        let rows = stmt.query_map(params![date], appointment_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Apply a partial update. Patching `time` keeps the slot on its
    /// stored day.
    pub fn update_appointment(&self, id: &str, patch: &AppointmentPatch) -> DbResult<Appointment> {
        let row = fetch_row(&self.conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("appointment {id}")))?;
        let date = stamp_date(&row.appointment_time)?.to_string();
        let mut appointment: Appointment = row.try_into()?;

        if let Some(patient_name) = &patch.patient_name {
            appointment.patient_name = patient_name.clone();
        }
        if let Some(phone) = &patch.phone {
            appointment.phone = phone.clone();
        }
        if let Some(appointment_type) = &patch.appointment_type {
            appointment.appointment_type = appointment_type.clone();
        }
        if let Some(time) = &patch.time {
            appointment.time = time.clone();
        }
        if let Some(status) = &patch.status {
            appointment.status = status.clone();
        }

        self.conn.execute(
            r#"
            UPDATE appointments SET
                patient_name = ?2,
                phone = ?3,
                appointment_type = ?4,
                appointment_time = ?5,
                status = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                appointment.id,
                appointment.patient_name,
                appointment.phone,
                appointment.appointment_type,
                compose_stamp(&date, &appointment.time),
                appointment.status.as_str(),
            ],
        )?;

        self.get_appointment(id)?
            .ok_or_else(|| DbError::NotFound(format!("appointment {id}")))
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

fn compose_stamp(date: &str, time: &str) -> String {
    format!("{date}T{time}:00")
}

fn stamp_date(stamp: &str) -> DbResult<&str> {
    stamp
        .split_once('T')
        .map(|(date, _)| date)
        .ok_or_else(|| DbError::Constraint(format!("Malformed appointment time: {stamp}")))
}

fn stamp_clock_time(stamp: &str) -> DbResult<String> {
    let (_, time) = stamp
        .split_once('T')
        .ok_or_else(|| DbError::Constraint(format!("Malformed appointment time: {stamp}")))?;
    Ok(time.strip_suffix(":00").unwrap_or(time).to_string())
}

fn fetch_row(conn: &rusqlite::Connection, id: &str) -> DbResult<Option<AppointmentRow>> {
    conn.query_row(
        r#"
        SELECT id, patient_name, phone, appointment_type, appointment_time,
               status, created_at, updated_at
        FROM appointments
        WHERE id = ?
        "#,
        [id],
        appointment_row,
    )
    .optional()
    .map_err(Into::into)
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    patient_name: String,
    phone: String,
    appointment_type: String,
    appointment_time: String,
    status: String,
    created_at: String,
    updated_at: String,
}

fn appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        phone: row.get(2)?,
        appointment_type: row.get(3)?,
        appointment_time: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown appointment status: {}", row.status))
        })?;
        let time = stamp_clock_time(&row.appointment_time)?;

        Ok(Appointment {
            id: row.id,
            patient_name: row.patient_name,
            phone: row.phone,
            appointment_type: row.appointment_type,
            time,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

//! SQLite schema definition.

/// Complete database schema for chairside.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    card_number TEXT,
    age TEXT,                                    -- free text ("34", "6 months")
    gender TEXT,                                 -- male, female
    avatar TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);
CREATE INDEX IF NOT EXISTS idx_patients_phone ON patients(phone);

-- ============================================================================
-- Treatment Records (visit history; the latest row drives the patient's
-- derived summary)
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatment_records (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    visit_date TEXT NOT NULL,                    -- YYYY-MM-DD
    visit_time TEXT NOT NULL DEFAULT '00:00',    -- HH:MM
    tooth_position TEXT NOT NULL DEFAULT '',     -- comma-separated tokens
    description TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'waiting',      -- waiting, completed, in-progress, appointment
    treatment_type TEXT NOT NULL DEFAULT 'initial', -- initial, follow-up
    image_url TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_records_patient ON treatment_records(patient_id);
CREATE INDEX IF NOT EXISTS idx_records_date ON treatment_records(visit_date);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_name TEXT NOT NULL,
    phone TEXT NOT NULL,
    appointment_type TEXT NOT NULL,
    appointment_time TEXT NOT NULL,              -- YYYY-MM-DDTHH:MM:SS
    status TEXT NOT NULL DEFAULT 'booked',       -- booked, free, break
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_time ON appointments(appointment_time);

-- ============================================================================
-- Medicines (status derived from expiry_date at write time)
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    brand TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT 'other',      -- anesthetic, filling, disinfectant, consumable, other
    expiry_date TEXT NOT NULL,                   -- YYYY-MM-DD
    stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
    unit TEXT NOT NULL DEFAULT '',
    min_stock INTEGER NOT NULL DEFAULT 0 CHECK (min_stock >= 0),
    status TEXT NOT NULL DEFAULT 'normal',       -- normal, warning, expired
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medicines_status ON medicines(status);
CREATE INDEX IF NOT EXISTS idx_medicines_expiry ON medicines(expiry_date);

-- ============================================================================
-- Shopping List
-- ============================================================================

CREATE TABLE IF NOT EXISTS shopping_items (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    quantity TEXT NOT NULL DEFAULT '',
    is_custom INTEGER NOT NULL DEFAULT 1,
    added_date TEXT NOT NULL,                    -- YYYY-MM-DD
    is_bought INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_shopping_bought ON shopping_items(is_bought);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_record_requires_existing_patient() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO treatment_records (id, patient_id, visit_date) VALUES ('r1', 'ghost', '2025-06-10')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deleting_patient_cascades_to_records() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (id, name, phone) VALUES ('p1', 'Alice', '138')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO treatment_records (id, patient_id, visit_date) VALUES ('r1', 'p1', '2025-06-10')",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM patients WHERE id = 'p1'", [])
            .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM treatment_records", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_negative_stock_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO medicines (id, name, expiry_date, stock) VALUES ('m1', 'gauze', '2026-01-01', -1)",
            [],
        );
        assert!(result.is_err());
    }
}

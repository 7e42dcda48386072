//! Medicine inventory database operations.
//!
//! The expiry status column is written here and only here: computed on
//! insert, recomputed when an update changes the expiry date, and never
//! taken from a caller. Reads return whatever was stored last.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::expiry;
use crate::inventory::InventoryReport;
use crate::models::{Medicine, MedicineCategory, MedicinePatch, MedicineStatus, NewMedicine};

impl Database {
    /// Add a medicine, classifying its expiry status against today.
    pub fn create_medicine(&self, payload: &NewMedicine) -> DbResult<Medicine> {
        let status = classify_expiry(&payload.expiry_date)?;

        let mut medicine = Medicine::new(
            payload.name.clone(),
            payload.expiry_date.clone(),
            status,
        );
        if let Some(brand) = &payload.brand {
            medicine.brand = brand.clone();
        }
        if let Some(category) = &payload.category {
            medicine.category = category.clone();
        }
        if let Some(stock) = payload.stock {
            medicine.stock = stock;
        }
        if let Some(unit) = &payload.unit {
            medicine.unit = unit.clone();
        }
        if let Some(min_stock) = payload.min_stock {
            medicine.min_stock = min_stock;
        }

        self.conn.execute(
            r#"
            INSERT INTO medicines (
                id, name, brand, category, expiry_date, stock, unit,
                min_stock, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.brand,
                medicine.category.as_str(),
                medicine.expiry_date,
                medicine.stock,
                medicine.unit,
                medicine.min_stock,
                medicine.status.as_str(),
                medicine.created_at,
                medicine.updated_at,
            ],
        )?;
        Ok(medicine)
    }

    /// Get a medicine by ID.
    pub fn get_medicine(&self, id: &str) -> DbResult<Option<Medicine>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, brand, category, expiry_date, stock, unit,
                       min_stock, status, created_at, updated_at
                FROM medicines
                WHERE id = ?
                "#,
                [id],
                medicine_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List medicines soonest expiry first, optionally restricted to one
    /// stored status.
    pub fn list_medicines(&self, status: Option<&MedicineStatus>) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, brand, category, expiry_date, stock, unit,
                   min_stock, status, created_at, updated_at
            FROM medicines
            WHERE (?1 IS NULL OR status = ?1)
            ORDER BY expiry_date ASC
            "#,
        )?;

        let rows = stmt.query_map(params![status.map(|s| s.as_str())], medicine_row)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?.try_into()?);
        }
        Ok(medicines)
    }

    /// Apply a partial update. A patched expiry date reclassifies the
    /// status; every other change leaves the stored status alone.
    pub fn update_medicine(&self, id: &str, patch: &MedicinePatch) -> DbResult<Medicine> {
        let mut medicine = self
            .get_medicine(id)?
            .ok_or_else(|| DbError::NotFound(format!("medicine {id}")))?;

        if let Some(name) = &patch.name {
            medicine.name = name.clone();
        }
        if let Some(brand) = &patch.brand {
            medicine.brand = brand.clone();
        }
        if let Some(category) = &patch.category {
            medicine.category = category.clone();
        }
        if let Some(expiry_date) = &patch.expiry_date {
            medicine.expiry_date = expiry_date.clone();
            medicine.status = classify_expiry(expiry_date)?;
        }
        if let Some(stock) = patch.stock {
            medicine.stock = stock;
        }
        if let Some(unit) = &patch.unit {
            medicine.unit = unit.clone();
        }
        if let Some(min_stock) = patch.min_stock {
            medicine.min_stock = min_stock;
        }

        self.conn.execute(
            r#"
            UPDATE medicines SET
                name = ?2,
                brand = ?3,
                category = ?4,
                expiry_date = ?5,
                stock = ?6,
                unit = ?7,
                min_stock = ?8,
                status = ?9,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.brand,
                medicine.category.as_str(),
                medicine.expiry_date,
                medicine.stock,
                medicine.unit,
                medicine.min_stock,
                medicine.status.as_str(),
            ],
        )?;

        self.get_medicine(id)?
            .ok_or_else(|| DbError::NotFound(format!("medicine {id}")))
    }

    /// Delete a medicine.
    pub fn delete_medicine(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medicines WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Aggregate the whole inventory into its alert report.
    pub fn inventory_report(&self) -> DbResult<InventoryReport> {
        let medicines = self.list_medicines(None)?;
        Ok(InventoryReport::from_medicines(&medicines))
    }
}

/// Parse an expiry date string and classify it against today.
fn classify_expiry(expiry_date: &str) -> DbResult<MedicineStatus> {
    let expiry = NaiveDate::parse_from_str(expiry_date, "%Y-%m-%d")
        .map_err(|_| DbError::Validation(format!("Invalid expiry date: {expiry_date}")))?;
    Ok(expiry::classify(expiry, chrono::Local::now().date_naive()))
}

/// Intermediate row struct for database mapping.
struct MedicineRow {
    id: String,
    name: String,
    brand: String,
    category: String,
    expiry_date: String,
    stock: u32,
    unit: String,
    min_stock: u32,
    status: String,
    created_at: String,
    updated_at: String,
}

fn medicine_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicineRow> {
    Ok(MedicineRow {
        id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        category: row.get(3)?,
        expiry_date: row.get(4)?,
        stock: row.get(5)?,
        unit: row.get(6)?,
        min_stock: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl TryFrom<MedicineRow> for Medicine {
    type Error = DbError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        let category = MedicineCategory::parse(&row.category).ok_or_else(|| {
            DbError::Constraint(format!("Unknown medicine category: {}", row.category))
        })?;
        let status = MedicineStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown medicine status: {}", row.status))
        })?;

        Ok(Medicine {
            id: row.id,
            name: row.name,
            brand: row.brand,
            category,
            expiry_date: row.expiry_date,
            stock: row.stock,
            unit: row.unit,
            min_stock: row.min_stock,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

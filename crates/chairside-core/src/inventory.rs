//! Stock-level reporting over the medicine inventory.

use serde::Serialize;

use crate::models::{Medicine, MedicineStatus};

/// Aggregated view of the medicine inventory, grouped by what needs a
/// human to act on it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    /// Number of expired medicines
    pub expired_count: usize,
    /// Number of medicines inside the warning window
    pub warning_count: usize,
    /// Medicines whose status is not normal, in input order
    pub attention: Vec<Medicine>,
    /// Medicines stocked below their restock threshold, in input order
    pub low_stock: Vec<Medicine>,
}

impl InventoryReport {
    /// Partition `medicines` into the report views.
    ///
    /// Works off stored statuses; nothing is reclassified here.
    pub fn from_medicines(medicines: &[Medicine]) -> Self {
        let expired_count = medicines
            .iter()
            .filter(|m| m.status == MedicineStatus::Expired)
            .count();
        let warning_count = medicines
            .iter()
            .filter(|m| m.status == MedicineStatus::Warning)
            .count();
        let attention = medicines
            .iter()
            .filter(|m| m.needs_attention())
            .cloned()
            .collect();
        let low_stock = medicines
            .iter()
            .filter(|m| m.is_low_stock())
            .cloned()
            .collect();

        Self {
            expired_count,
            warning_count,
            attention,
            low_stock,
        }
    }

    /// True when anything is expired or near expiry.
    pub fn has_alerts(&self) -> bool {
        self.expired_count > 0 || self.warning_count > 0
    }
}

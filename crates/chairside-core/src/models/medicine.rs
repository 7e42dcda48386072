//! Medicine inventory models.

use serde::{Deserialize, Serialize};

/// Category of a stocked medicine or material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MedicineCategory {
    Anesthetic,
    Filling,
    Disinfectant,
    Consumable,
    Other,
}

impl MedicineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineCategory::Anesthetic => "anesthetic",
            MedicineCategory::Filling => "filling",
            MedicineCategory::Disinfectant => "disinfectant",
            MedicineCategory::Consumable => "consumable",
            MedicineCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "anesthetic" => Some(MedicineCategory::Anesthetic),
            "filling" => Some(MedicineCategory::Filling),
            "disinfectant" => Some(MedicineCategory::Disinfectant),
            "consumable" => Some(MedicineCategory::Consumable),
            "other" => Some(MedicineCategory::Other),
            _ => None,
        }
    }
}

/// Expiry classification of a medicine.
///
/// Derived from the expiry date at write time, never accepted from the
/// caller. Reads return the stored value as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MedicineStatus {
    /// At least 90 days of shelf life left
    Normal,
    /// Expires within 90 days
    Warning,
    /// Expiry date has passed
    Expired,
}

impl MedicineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineStatus::Normal => "normal",
            MedicineStatus::Warning => "warning",
            MedicineStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(MedicineStatus::Normal),
            "warning" => Some(MedicineStatus::Warning),
            "expired" => Some(MedicineStatus::Expired),
            _ => None,
        }
    }
}

/// A stocked medicine or clinic material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Unique medicine ID
    pub id: String,
    /// Product name
    pub name: String,
    /// Manufacturer or brand
    pub brand: String,
    pub category: MedicineCategory,
    /// Expiry date (YYYY-MM-DD)
    pub expiry_date: String,
    /// Units currently on hand
    pub stock: u32,
    /// Counting unit (box, bottle, piece)
    pub unit: String,
    /// Restock threshold
    pub min_stock: u32,
    /// Derived expiry classification
    pub status: MedicineStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Medicine {
    /// Create a new medicine with generated ID and timestamps. The
    /// status must already be classified from the expiry date.
    pub fn new(name: String, expiry_date: String, status: MedicineStatus) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            brand: String::new(),
            category: MedicineCategory::Other,
            expiry_date,
            stock: 0,
            unit: String::new(),
            min_stock: 0,
            status,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// True when stock has fallen below the restock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.min_stock
    }

    /// True when the stored status is anything but normal.
    pub fn needs_attention(&self) -> bool {
        self.status != MedicineStatus::Normal
    }
}

/// Payload for adding a medicine.
///
/// Carries no status field; the expiry classification is always computed
/// by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<MedicineCategory>,
    pub expiry_date: String,
    pub stock: Option<u32>,
    pub unit: Option<String>,
    pub min_stock: Option<u32>,
}

/// Partial update for a medicine; `None` fields are left untouched.
///
/// Changing `expiry_date` recomputes the status; any other change leaves
/// the stored status alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicinePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<MedicineCategory>,
    pub expiry_date: Option<String>,
    pub stock: Option<u32>,
    pub unit: Option<String>,
    pub min_stock: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_medicine(stock: u32, min_stock: u32, status: MedicineStatus) -> Medicine {
        Medicine {
            id: "med-1".into(),
            name: "Lidocaine".into(),
            brand: "Acme".into(),
            category: MedicineCategory::Anesthetic,
            expiry_date: "2026-01-01".into(),
            stock,
            unit: "box".into(),
            min_stock,
            status,
            created_at: "2025-06-01T00:00:00Z".into(),
            updated_at: "2025-06-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_low_stock_is_strict() {
        assert!(make_medicine(4, 5, MedicineStatus::Normal).is_low_stock());
        assert!(!make_medicine(5, 5, MedicineStatus::Normal).is_low_stock());
    }

    #[test]
    fn test_needs_attention() {
        assert!(!make_medicine(10, 5, MedicineStatus::Normal).needs_attention());
        assert!(make_medicine(10, 5, MedicineStatus::Warning).needs_attention());
        assert!(make_medicine(10, 5, MedicineStatus::Expired).needs_attention());
    }

    #[test]
    fn test_new_medicine_ignores_caller_status() {
        let json = r#"{
            "name": "Lidocaine",
            "expiryDate": "2026-01-01",
            "status": "normal"
        }"#;
        let payload: NewMedicine = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "Lidocaine");
        assert_eq!(payload.expiry_date, "2026-01-01");
    }

    #[test]
    fn test_category_round_trip() {
        for category in [
            MedicineCategory::Anesthetic,
            MedicineCategory::Filling,
            MedicineCategory::Disinfectant,
            MedicineCategory::Consumable,
            MedicineCategory::Other,
        ] {
            assert_eq!(MedicineCategory::parse(category.as_str()), Some(category));
        }
    }
}

//! Shopping list models for restocking.

use serde::{Deserialize, Serialize};

/// One line on the restocking list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Unique item ID
    pub id: String,
    /// What to buy
    pub name: String,
    /// Free-text quantity ("2 boxes", "500ml")
    pub quantity: String,
    /// Manually added, as opposed to generated from low stock
    pub is_custom: bool,
    /// Date the item went on the list (YYYY-MM-DD)
    pub added_date: String,
    /// Ticked off as bought
    pub is_bought: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl ShoppingItem {
    /// Create a not-yet-bought item with generated ID and timestamps.
    pub fn new(name: String, quantity: String, added_date: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            quantity,
            is_custom: true,
            added_date,
            is_bought: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Payload for adding a shopping list item.
///
/// `added_date` defaults to today; items start not bought.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: Option<String>,
    pub is_custom: Option<bool>,
    pub added_date: Option<String>,
}

/// Partial update for a shopping item; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemPatch {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub is_custom: Option<bool>,
    pub is_bought: Option<bool>,
}

//! Shopping list database operations.

use rusqlite::{params, params_from_iter, OptionalExtension};

use super::{today, Database, DbError, DbResult};
use crate::models::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};

impl Database {
    /// Put an item on the list, dated today unless the payload says
    /// otherwise.
    pub fn create_shopping_item(&self, payload: &NewShoppingItem) -> DbResult<ShoppingItem> {
        let added_date = payload.added_date.clone().unwrap_or_else(today);

        let mut item = ShoppingItem::new(
            payload.name.clone(),
            payload.quantity.clone().unwrap_or_default(),
            added_date,
        );
        if let Some(is_custom) = payload.is_custom {
            item.is_custom = is_custom;
        }

        self.conn.execute(
            r#"
            INSERT INTO shopping_items (
                id, name, quantity, is_custom, added_date, is_bought,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                item.id,
                item.name,
                item.quantity,
                item.is_custom,
                item.added_date,
                item.is_bought,
                item.created_at,
                item.updated_at,
            ],
        )?;
        Ok(item)
    }

    /// Get a shopping item by ID.
    pub fn get_shopping_item(&self, id: &str) -> DbResult<Option<ShoppingItem>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, quantity, is_custom, added_date, is_bought,
                       created_at, updated_at
                FROM shopping_items
                WHERE id = ?
                "#,
                [id],
                shopping_item_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List items newest first; `pending_only` hides whatever has already
    /// been bought.
    pub fn list_shopping_items(&self, pending_only: bool) -> DbResult<Vec<ShoppingItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, quantity, is_custom, added_date, is_bought,
                   created_at, updated_at
            FROM shopping_items
            WHERE (?1 = 0 OR is_bought = 0)
            ORDER BY added_date DESC
            "#,
        )?;

        let rows = stmt.query_map(params![pending_only], shopping_item_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update; untouched fields keep their stored value.
    pub fn update_shopping_item(
        &self,
        id: &str,
        patch: &ShoppingItemPatch,
    ) -> DbResult<ShoppingItem> {
        let mut item = self
            .get_shopping_item(id)?
            .ok_or_else(|| DbError::NotFound(format!("shopping item {id}")))?;

        if let Some(name) = &patch.name {
            item.name = name.clone();
        }
        if let Some(quantity) = &patch.quantity {
            item.quantity = quantity.clone();
        }
        if let Some(is_custom) = patch.is_custom {
            item.is_custom = is_custom;
        }
        if let Some(is_bought) = patch.is_bought {
            item.is_bought = is_bought;
        }

        self.conn.execute(
            r#"
            UPDATE shopping_items SET
                name = ?2,
                quantity = ?3,
                is_custom = ?4,
                is_bought = ?5,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![item.id, item.name, item.quantity, item.is_custom, item.is_bought],
        )?;

        self.get_shopping_item(id)?
            .ok_or_else(|| DbError::NotFound(format!("shopping item {id}")))
    }

    /// Flip an item between bought and pending.
    pub fn toggle_shopping_item(&self, id: &str) -> DbResult<ShoppingItem> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE shopping_items SET
                is_bought = NOT is_bought,
                updated_at = datetime('now')
            WHERE id = ?
            "#,
            [id],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("shopping item {id}")));
        }

        self.get_shopping_item(id)?
            .ok_or_else(|| DbError::NotFound(format!("shopping item {id}")))
    }

    /// Mark every listed ID as bought; unknown IDs are skipped. Returns
    /// how many rows actually changed.
    pub fn mark_shopping_items_bought(&self, ids: &[String]) -> DbResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "UPDATE shopping_items SET is_bought = 1, updated_at = datetime('now') \
             WHERE id IN ({placeholders})"
        );
        let rows_affected = self.conn.execute(&sql, params_from_iter(ids.iter()))?;
        Ok(rows_affected)
    }

    /// Delete a shopping item.
    pub fn delete_shopping_item(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM shopping_items WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

fn shopping_item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ShoppingItem> {
    Ok(ShoppingItem {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        is_custom: row.get(3)?,
        added_date: row.get(4)?,
        is_bought: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

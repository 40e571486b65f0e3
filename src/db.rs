use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::item::ShoppingListItem;

/// Safely convert a Unix timestamp to DateTime<Utc>, falling back to current time if invalid
fn timestamp_to_datetime(timestamp: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database
    pub fn open() -> Result<Self> {
        let db_path = Config::db_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = Connection::open(&db_path)?;
        embedded::migrations::runner().run(&mut conn)?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        embedded::migrations::runner().run(&mut conn)?;
        Ok(Self { conn })
    }

    /// Insert a new shopping-list item
    pub fn insert_item(&self, item: &ShoppingListItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO shopping_items (id, owner, name, link, price, priority, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                item.id.to_string(),
                item.owner,
                item.name,
                item.link,
                item.price,
                item.priority,
                item.created_at.timestamp(),
            ],
        )?;
        Ok(())
    }

    /// List items, priority first then newest, optionally for one owner
    pub fn list_items(&self, owner: Option<&str>) -> Result<Vec<ShoppingListItem>> {
        let base = "SELECT id, owner, name, link, price, priority, created_at
                    FROM shopping_items";
        let order = " ORDER BY priority DESC, created_at DESC";

        let mut items = Vec::new();
        match owner {
            Some(owner) => {
                let sql = format!("{} WHERE owner = ?1{}", base, order);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![owner], row_to_item)?;
                for row in rows {
                    items.push(row?);
                }
            }
            None => {
                let sql = format!("{}{}", base, order);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_item)?;
                for row in rows {
                    items.push(row?);
                }
            }
        }
        Ok(items)
    }

    /// Get an item by ID or name (first match)
    pub fn get_item(&self, id_or_name: &str) -> Result<Option<ShoppingListItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, owner, name, link, price, priority, created_at
                 FROM shopping_items WHERE id = ?1 OR name = ?1",
                params![id_or_name],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    /// Update an existing item in place
    pub fn update_item(&self, item: &ShoppingListItem) -> Result<()> {
        self.conn.execute(
            "UPDATE shopping_items
             SET owner = ?2, name = ?3, link = ?4, price = ?5, priority = ?6
             WHERE id = ?1",
            params![
                item.id.to_string(),
                item.owner,
                item.name,
                item.link,
                item.price,
                item.priority,
            ],
        )?;
        Ok(())
    }

    /// Delete an item (bought, or no longer wanted)
    pub fn delete_item(&self, id: &Uuid) -> Result<()> {
        self.conn.execute(
            "DELETE FROM shopping_items WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(())
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ShoppingListItem> {
    let id: String = row.get(0)?;
    Ok(ShoppingListItem {
        id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::new_v4()),
        owner: row.get(1)?,
        name: row.get(2)?,
        link: row.get(3)?,
        price: row.get(4)?,
        priority: row.get(5)?,
        created_at: timestamp_to_datetime(row.get(6)?),
    })
}

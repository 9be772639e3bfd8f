use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use crate::bans::BanStore;
use crate::error::Result;

/// SQLite-backed ban list store.
///
/// Each user's ban list is one row holding a JSON array:
/// ```sql
/// CREATE TABLE ban_lists (
///     user_id INTEGER PRIMARY KEY,
///     characters TEXT NOT NULL,
///     updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
pub struct SqliteBanStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBanStore {
    /// Open (or create) the ban database. Use ":memory:" for tests.
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS ban_lists (
                user_id INTEGER PRIMARY KEY,
                characters TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn read_list(conn: &Connection, user_id: u64) -> Result<Vec<String>> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT characters FROM ban_lists WHERE user_id = ?",
                params![user_id as i64],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_list(conn: &Connection, user_id: u64, list: &[String]) -> Result<()> {
        let json = serde_json::to_string(list)?;
        conn.execute(
            "INSERT OR REPLACE INTO ban_lists (user_id, characters, updated_at)
             VALUES (?1, ?2, ?3)",
            params![user_id as i64, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[async_trait]
impl BanStore for SqliteBanStore {
    async fn list(&self, user_id: u64) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        Self::read_list(&conn, user_id)
    }

    async fn add(&self, user_id: u64, character: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut list = Self::read_list(&conn, user_id)?;

        if !list.iter().any(|c| c == character) {
            list.push(character.to_string());
            Self::write_list(&conn, user_id, &list)?;
        }

        Ok(list.len())
    }

    async fn remove(&self, user_id: u64, character: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut list = Self::read_list(&conn, user_id)?;

        if list.iter().any(|c| c == character) {
            list.retain(|c| c != character);
            Self::write_list(&conn, user_id, &list)?;
        }

        Ok(list.len())
    }

    async fn clear(&self, user_id: u64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM ban_lists WHERE user_id = ?",
            params![user_id as i64],
        )?;
        Ok(())
    }

    async fn contains(&self, user_id: u64, character: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let list = Self::read_list(&conn, user_id)?;
        Ok(list.iter().any(|c| c == character))
    }
}

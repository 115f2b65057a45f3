mod contracts;
mod customers;
mod error;
mod helpers;
mod migrations;
mod readings;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

pub use crate::error::{DbError, Result};

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        // Concurrent handles contend on commit under WAL; wait instead of
        // surfacing SQLITE_BUSY to callers.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}

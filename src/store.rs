use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
";

/// Append-only table of contact submissions in a local SQLite file.
///
/// Every call opens its own connection, so concurrent writers are serialized by SQLite's file lock
/// (waiting up to the default busy timeout) instead of by the application.
#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let this = Self { path: path.into() };

        this.initialize()?;

        Ok(this)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database file and the `contacts` table if they do not exist yet.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute_batch(SCHEMA)
            .context("Failed to create contacts table")?;

        Ok(())
    }

    pub fn save(&self, name: &str, email: &str, message: &str) -> Result<i64> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO contacts (name, email, message) VALUES (?1, ?2, ?3)",
            params![name, email, message],
        )
        .context("Failed to insert contact")?;

        Ok(conn.last_insert_rowid())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).with_context(|| {
            format!(
                "Failed to open contact database at {}",
                self.path.display()
            )
        })
    }
}

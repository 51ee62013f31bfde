//! SQLite-backed bucket storage.
//!
//! A single database file holds every bucket:
//!
//! ```text
//! buckets(name BLOB PRIMARY KEY)
//! entries(bucket BLOB, key BLOB, value BLOB, PRIMARY KEY(bucket, key))
//! ```
//!
//! BLOB comparison in SQLite is `memcmp`, so `ORDER BY key` yields the
//! byte-wise key order the [`StorageBackend`] contract requires.
//!
//! Each operation runs in an `IMMEDIATE` transaction: the write lock is taken
//! up front, which serializes concurrent `a-fiend` processes on the file lock.
//! A busy timeout makes a second process wait instead of failing at once.

use super::backend::StorageBackend;
use crate::error::Result;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS buckets (
    name BLOB PRIMARY KEY NOT NULL
);
CREATE TABLE IF NOT EXISTS entries (
    bucket BLOB NOT NULL,
    key BLOB NOT NULL,
    value BLOB NOT NULL,
    PRIMARY KEY (bucket, key)
);
";

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// The parent directory must already exist. A newly created file is
    /// restricted to owner and group read/write on Unix.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let existed = path.exists();
        let backend = Self::bootstrap(Connection::open(path)?)?;
        if !existed {
            restrict_permissions(path)?;
        }
        debug!("event=store_open mode=file path={}", path.display());
        Ok(backend)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("event=store_open mode=memory");
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn begin(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

fn ensure_bucket(tx: &Transaction<'_>, bucket: &[u8]) -> Result<()> {
    tx.execute(
        "INSERT OR IGNORE INTO buckets (name) VALUES (?1)",
        params![bucket],
    )?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o660))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl StorageBackend for SqliteBackend {
    fn put(&mut self, bucket: &[u8], key: &[u8], value: &[u8]) -> Result<()> {
        let tx = self.begin()?;
        ensure_bucket(&tx, bucket)?;
        tx.execute(
            "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value",
            params![bucket, key, value],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get(&mut self, bucket: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>> {
        let tx = self.begin()?;
        ensure_bucket(&tx, bucket)?;
        let value = tx
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![bucket, key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        tx.commit()?;
        Ok(value)
    }

    fn delete(&mut self, bucket: &[u8], key: &[u8]) -> Result<()> {
        let tx = self.begin()?;
        ensure_bucket(&tx, bucket)?;
        tx.execute(
            "DELETE FROM entries WHERE bucket = ?1 AND key = ?2",
            params![bucket, key],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn scan(
        &mut self,
        bucket: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>,
    ) -> Result<()> {
        let tx = self.begin()?;
        ensure_bucket(&tx, bucket)?;
        {
            let mut stmt =
                tx.prepare("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")?;
            let mut rows = stmt.query(params![bucket])?;
            while let Some(row) = rows.next()? {
                let key: Vec<u8> = row.get(0)?;
                let value: Vec<u8> = row.get(1)?;
                visit(key.as_slice(), value.as_slice())?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn has_bucket(&mut self, bucket: &[u8]) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM buckets WHERE name = ?1",
                params![bucket],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opening the catalog database: pragmas, migrations, shutdown.
//!
//! All access goes through tokio-rusqlite's single background thread.

use std::path::Path;

use rusqlite::functions::FunctionFlags;
use shopwise_core::ShopwiseError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::migrations;

/// Handle to the Shopwise SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`, apply PRAGMAs and
    /// run pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, ShopwiseError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(ShopwiseError::storage)?;
        }

        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
            }
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
            register_functions(conn)
        })
        .await
        .map_err(map_tr_err)?;

        let applied = conn
            .call(|conn| -> Result<usize, refinery::Error> { migrations::run_migrations(conn) })
            .await
            .map_err(map_tr_err)?;
        if applied > 0 {
            info!(path, applied, "database migrations applied");
        }
        debug!(path, wal_mode, "database opened");

        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Fold the WAL back into the main database file.
    pub async fn checkpoint(&self) -> Result<(), ShopwiseError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), ShopwiseError> {
        self.checkpoint().await?;
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// SQL name of the Unicode-aware lower-case function used by catalog search.
pub(crate) const LOWER_FN: &str = "ulower";

/// SQLite's built-in `lower()` and `LIKE` only fold ASCII, so searches compare
/// both sides through [`LOWER_FN`] instead.
fn register_functions(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

/// Convert a tokio-rusqlite (or wrapped rusqlite/refinery) error into a
/// storage error.
pub(crate) fn map_tr_err(e: impl std::fmt::Display) -> ShopwiseError {
    ShopwiseError::storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/shop.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();

        let tables = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' \
                     AND name NOT LIKE 'refinery%' AND name NOT LIKE 'sqlite%' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();
        assert_eq!(
            tables,
            vec!["conversations", "messages", "products", "stores", "variants"]
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn lower_function_folds_unicode_and_passes_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let db = Database::open(path.to_str().unwrap(), false).await.unwrap();

        let (folded, null) = db
            .connection()
            .call(|conn| -> Result<(String, Option<String>), rusqlite::Error> {
                conn.query_row("SELECT ulower('ÉCHARPE Øre'), ulower(NULL)", [], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
            })
            .await
            .unwrap();
        assert_eq!(folded, "écharpe øre");
        assert_eq!(null, None);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let path = path.to_str().unwrap();
        Database::open(path, false).await.unwrap().close().await.unwrap();
        let db = Database::open(path, false).await.unwrap();
        db.close().await.unwrap();
    }
}

// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use tracing::debug;

use weft_core::WeftError;

use crate::migrations;

/// Handle to the single SQLite connection.
///
/// Query modules accept `&Database` and go through [`Database::connection`],
/// so every statement runs on tokio-rusqlite's one background thread and
/// `SQLITE_BUSY` cannot occur between our own writers.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` with WAL mode on.
    pub async fn open(path: &str) -> Result<Self, WeftError> {
        Self::open_with(path, true).await
    }

    /// Open with explicit journal choice, apply PRAGMAs, and run migrations.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, WeftError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(WeftError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;

        conn.call(move |conn| {
            let journal = if wal_mode { "WAL" } else { "DELETE" };
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;"
            ))?;
            migrations::run_migrations(conn).map_err(domain_err)
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database open, migrations applied");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), WeftError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        Ok(())
    }
}

/// Map a tokio-rusqlite error into [`WeftError`].
///
/// Domain errors smuggled through [`domain_err`] come back out unchanged;
/// everything else is a storage failure.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> WeftError {
    match err {
        tokio_rusqlite::Error::Other(inner) => match inner.downcast::<WeftError>() {
            Ok(weft) => *weft,
            Err(other) => WeftError::Storage(other),
        },
        other => WeftError::storage(other),
    }
}

/// Lift a domain error into the closure error channel so it survives the
/// trip through the writer thread and [`map_tr_err`].
pub fn domain_err(err: WeftError) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Other(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dir/test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_expected_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap();

        for expected in [
            "orders",
            "products",
            "partners",
            "warehouses",
            "operation_types",
            "deliveries",
            "delivery_lines",
        ] {
            assert!(
                tables.iter().any(|t| t == expected),
                "missing table {expected}, got {tables:?}"
            );
        }

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn seed_rows_exist_after_open() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("seed.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let (warehouses, customers): (i64, i64) = db
            .connection()
            .call(|conn| {
                let w = conn.query_row("SELECT COUNT(*) FROM warehouses", [], |r| r.get(0))?;
                let c = conn.query_row(
                    "SELECT COUNT(*) FROM partners WHERE customer_rank > 0",
                    [],
                    |r| r.get(0),
                )?;
                Ok((w, c))
            })
            .await
            .unwrap();

        assert_eq!(warehouses, 1);
        assert_eq!(customers, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_does_not_rerun_migrations() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");

        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();

        // A second open must not re-seed (INSERTs would violate UNIQUE or
        // double the rows).
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let warehouses: i64 = db
            .connection()
            .call(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM warehouses", [], |r| r.get(0))?)
            })
            .await
            .unwrap();
        assert_eq!(warehouses, 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn domain_errors_round_trip_through_writer_thread() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("roundtrip.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let err = db
            .connection()
            .call(|_conn| -> tokio_rusqlite::Result<()> {
                Err(domain_err(WeftError::OrderNotFound { external_id: 7 }))
            })
            .await
            .map_err(map_tr_err)
            .unwrap_err();

        assert!(matches!(err, WeftError::OrderNotFound { external_id: 7 }));
        db.close().await.unwrap();
    }
}

//! One database file's connection: open, load, batched writes, close.

use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use aurora_dbm_catalog::Record;
use rusqlite::{Connection, OpenFlags, params_from_iter};

use crate::error::StoreError;
use crate::rows::{self, TableRow};
use crate::statement::{RowTarget, SqlBatch, SqlStatement, delete_statement, insert_statement};

/// Which of the two dashboard files a connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Content,
    Settings,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Content => write!(f, "content"),
            StoreKind::Settings => write!(f, "settings"),
        }
    }
}

/// Tunables shared by both stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long `close` keeps retrying a busy connection.
    pub close_timeout: Duration,
    /// Delay between close attempts.
    pub close_poll_interval: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            close_timeout: Duration::from_secs(5),
            close_poll_interval: Duration::from_millis(10),
        }
    }
}

/// What one `save` call wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// UPDATE statements in the committed batch.
    pub statements: usize,
    pub rows_affected: usize,
}

/// A Closed/Open connection to one database file.
#[derive(Debug)]
pub struct StoreConnection {
    kind: StoreKind,
    options: StoreOptions,
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl StoreConnection {
    pub fn new(kind: StoreKind, options: StoreOptions) -> Self {
        Self {
            kind,
            options,
            conn: None,
            path: None,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Path of the open file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open `path` read-write. Any previous connection is closed first.
    ///
    /// A missing file is an error; this never creates a database.
    pub fn open(&mut self, path: &Path) -> Result<(), StoreError> {
        if self.is_open() {
            self.close()?;
        }

        let connect_err = |source| StoreError::Connect {
            kind: self.kind,
            path: path.to_path_buf(),
            source,
        };
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(connect_err)?;

        // SQLite opens lazily; touch the header so a non-database file fails here.
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(connect_err)?;

        log::info!("Opened {} database {}", self.kind, path.display());
        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Close the connection, retrying while the driver reports it busy.
    ///
    /// After `close_timeout` this gives up with [`StoreError::CloseTimeout`]
    /// and the connection stays open. Closing a closed store is a no-op.
    pub fn close(&mut self) -> Result<(), StoreError> {
        let Some(mut conn) = self.conn.take() else {
            return Ok(());
        };

        let started = Instant::now();
        loop {
            match conn.close() {
                Ok(()) => break,
                Err((returned, source)) => {
                    let waited = started.elapsed();
                    if waited >= self.options.close_timeout {
                        log::warn!("Giving up closing the {} database: {source}", self.kind);
                        self.conn = Some(returned);
                        return Err(StoreError::CloseTimeout {
                            kind: self.kind,
                            waited,
                            source,
                        });
                    }
                    conn = returned;
                    thread::sleep(self.options.close_poll_interval);
                }
            }
        }

        if let Some(path) = self.path.take() {
            log::info!("Closed {} database {}", self.kind, path.display());
        }
        Ok(())
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::NotOpen(self.kind))
    }

    fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        self.conn.as_mut().ok_or(StoreError::NotOpen(self.kind))
    }

    /// Load every row of `T`'s table, in id order.
    pub fn load<T>(&self) -> Result<Vec<T>, StoreError>
    where
        T: Record<Row: TableRow>,
    {
        let conn = self.conn()?;
        let table = <T::Row as TableRow>::TABLE;
        let load_err = |source| StoreError::Load { table, source };

        let mut stmt = conn
            .prepare(&<T::Row as TableRow>::select_sql())
            .map_err(load_err)?;
        let mut result_rows = stmt.query([]).map_err(load_err)?;

        let mut records = Vec::new();
        while let Some(row) = result_rows.next().map_err(load_err)? {
            let parsed = <T::Row as TableRow>::from_row(row).map_err(|source| {
                StoreError::MalformedRecord {
                    table,
                    row_id: rows::row_id(row),
                    source,
                }
            })?;
            records.push(T::from_row(parsed));
        }

        log::debug!("Loaded {} rows from {table}", records.len());
        Ok(records)
    }

    /// Run every statement of `batch` in one transaction.
    ///
    /// Returns the total number of rows affected. On any failure, including
    /// an UPDATE whose target row is gone, the transaction is rolled back
    /// and nothing is written.
    pub fn execute_batch(&mut self, batch: &SqlBatch) -> Result<usize, StoreError> {
        let kind = self.kind;
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::operation(format!("begin {kind} transaction"), e))?;

        let mut affected = 0;
        for statement in batch {
            log::debug!("{statement}");
            let n = tx
                .execute(&statement.sql, params_from_iter(statement.params.iter()))
                .map_err(|e| StoreError::operation(statement.sql.clone(), e))?;
            if let (0, Some(RowTarget { table, id })) = (n, statement.target) {
                return Err(StoreError::RowNotFound { table, id });
            }
            affected += n;
        }

        tx.commit()
            .map_err(|e| StoreError::operation(format!("commit {kind} transaction"), e))?;
        Ok(affected)
    }

    /// Run one INSERT in a transaction and return the new row id.
    pub fn execute_insert(&mut self, statement: &SqlStatement) -> Result<i64, StoreError> {
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::operation(statement.sql.clone(), e))?;

        log::debug!("{statement}");
        tx.execute(&statement.sql, params_from_iter(statement.params.iter()))
            .map_err(|e| StoreError::operation(statement.sql.clone(), e))?;
        let id = tx.last_insert_rowid();

        tx.commit()
            .map_err(|e| StoreError::operation(statement.sql.clone(), e))?;
        Ok(id)
    }
}

// ── Single-record writes ────────────────────────────────────────────────

impl StoreConnection {
    /// Insert `item` and return it re-keyed with the store-assigned id.
    ///
    /// The returned entity is unchanged: its values are now persisted.
    pub(crate) fn insert_record<T>(&mut self, item: &T) -> Result<T, StoreError>
    where
        T: Record<Row: TableRow>,
    {
        let id = self.execute_insert(&insert_statement(item.row()))?;
        let mut row = item.row().clone();
        row.set_id(id);
        log::info!("Added {} {id} to {}", T::KIND, <T::Row as TableRow>::TABLE);
        Ok(T::from_row(row))
    }

    /// Delete one row by id. Returns the number of rows removed.
    pub(crate) fn delete_record<T>(&mut self, id: i64) -> Result<usize, StoreError>
    where
        T: Record<Row: TableRow>,
    {
        let mut batch = SqlBatch::new();
        batch.push(delete_statement(<T::Row as TableRow>::TABLE, id));
        let removed = self.execute_batch(&batch)?;
        log::info!("Deleted {} {id} ({removed} row(s))", T::KIND);
        Ok(removed)
    }
}

impl Drop for StoreConnection {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("{e}");
        }
    }
}

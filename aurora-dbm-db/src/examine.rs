//! Read-only inspection of a dashboard database file.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::error::StoreError;
use crate::schema::{self, KNOWN_TABLES};

/// Rows shown per table.
pub const SAMPLE_ROWS: usize = 3;

/// One sampled row as `(column, value)` pairs.
pub type SampleRow = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub name: &'static str,
    /// `None` when the table is absent or unreadable.
    pub row_count: Option<i64>,
    pub sample: Vec<SampleRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamineReport {
    pub path: PathBuf,
    /// Every table in the file, sorted by name.
    pub tables: Vec<String>,
    /// One entry per known dashboard table, present or not.
    pub known: Vec<TableSummary>,
}

/// Open `path` read-only and summarize its tables.
pub fn examine(path: &Path) -> Result<ExamineReport, StoreError> {
    std::fs::metadata(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| StoreError::operation(format!("open {}", path.display()), source))?;
    let tables = schema::table_names(&conn).map_err(|source| StoreError::Load {
        table: "sqlite_master",
        source,
    })?;

    let known = KNOWN_TABLES
        .iter()
        .map(|&name| {
            let row_count = schema::table_row_count(&conn, name);
            let sample = match row_count {
                Some(n) if n > 0 => sample_rows(&conn, name).unwrap_or_else(|e| {
                    log::debug!("Sampling {name} failed: {e}");
                    Vec::new()
                }),
                _ => Vec::new(),
            };
            TableSummary {
                name,
                row_count,
                sample,
            }
        })
        .collect();

    Ok(ExamineReport {
        path: path.to_path_buf(),
        tables,
        known,
    })
}

fn sample_rows(conn: &Connection, table: &str) -> rusqlite::Result<Vec<SampleRow>> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {table} LIMIT {SAMPLE_ROWS}"))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let mut rows = stmt.query([])?;

    let mut sample = Vec::new();
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            cells.push((column.clone(), display_value(row.get_ref(i)?)));
        }
        sample.push(cells);
    }
    Ok(sample)
}

fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

//! SQLite persistence for the Aurora content and settings databases.
//!
//! Each store loads its tables into memory on connect, hands out
//! change-tracked entities, and writes changed rows back in a single
//! transaction on save (rusqlite with the bundled feature).

pub mod content;
pub mod error;
pub mod error_log;
pub mod examine;
pub mod manager;
pub mod record_set;
pub mod rows;
pub mod schema;
pub mod settings;
pub mod statement;
pub mod store;

pub use content::{ContentRecord, ContentStore};
pub use error::{RowError, StoreError};
pub use error_log::{DEFAULT_ERROR_LOG, ErrorLog};
pub use examine::{ExamineReport, TableSummary, examine};
pub use manager::DbManager;
pub use record_set::RecordSet;
pub use rows::TableRow;
pub use schema::create_database;
pub use settings::{SettingsRecord, SettingsStore};
pub use statement::{
    RowTarget, SqlBatch, SqlStatement, delete_statement, insert_statement, update_statement,
};
pub use store::{SaveReport, StoreConnection, StoreKind, StoreOptions};

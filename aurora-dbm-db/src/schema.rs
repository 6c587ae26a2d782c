//! Table names and empty-file DDL for the content and settings databases.
//!
//! The dashboard owns these schemas. The DDL here only creates fresh
//! files with the columns this crate reads and writes; it never migrates
//! an existing file.

use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreError;
use crate::store::StoreKind;

// ── Table names ─────────────────────────────────────────────────────────

pub const CONTENT_ITEMS: &str = "ContentItems";
pub const TITLE_UPDATES: &str = "TitleUpdates";

pub const SYSTEM_SETTINGS: &str = "SystemSettings";
pub const USER_SETTINGS: &str = "UserSettings";
pub const SCAN_PATHS: &str = "ScanPaths";
pub const PROFILES: &str = "Profiles";
pub const QUICK_VIEWS: &str = "QuickViews";
pub const USER_FAVORITES: &str = "UserFavorites";
pub const USER_HIDDEN: &str = "UserHidden";
pub const TRAINERS: &str = "Trainers";

/// Tables the content file is loaded from.
pub const CONTENT_TABLES: &[&str] = &[CONTENT_ITEMS, TITLE_UPDATES];

/// Tables the settings file is loaded from.
pub const SETTINGS_TABLES: &[&str] = &[
    SYSTEM_SETTINGS,
    USER_SETTINGS,
    SCAN_PATHS,
    PROFILES,
    QUICK_VIEWS,
    USER_FAVORITES,
    USER_HIDDEN,
    TRAINERS,
];

/// Every table a dashboard file may carry, including ones this crate
/// does not load.
pub const KNOWN_TABLES: &[&str] = &[
    SYSTEM_SETTINGS,
    USER_SETTINGS,
    SCAN_PATHS,
    PROFILES,
    "ActiveTUs",
    QUICK_VIEWS,
    TRAINERS,
    USER_FAVORITES,
    USER_HIDDEN,
    "UserRecent",
    CONTENT_ITEMS,
    TITLE_UPDATES,
];

// ── Creation ────────────────────────────────────────────────────────────

/// Create the content tables if they don't exist.
pub fn create_content_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CONTENT_SCHEMA_SQL)
}

/// Create the settings tables if they don't exist.
pub fn create_settings_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SETTINGS_SCHEMA_SQL)
}

/// Create a new, empty database file of the given kind.
///
/// Refuses to touch an existing file.
pub fn create_database(path: &Path, kind: StoreKind) -> Result<(), StoreError> {
    if path.exists() {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file already exists"),
        });
    }

    let create_err = |source| StoreError::Connect {
        kind,
        path: path.to_path_buf(),
        source,
    };
    let conn = Connection::open(path).map_err(create_err)?;
    match kind {
        StoreKind::Content => create_content_schema(&conn),
        StoreKind::Settings => create_settings_schema(&conn),
    }
    .map_err(create_err)?;

    log::info!("Created {kind} database {}", path.display());
    Ok(())
}

// ── Introspection ───────────────────────────────────────────────────────

/// Whether a table with this name exists.
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )
}

/// Names of all tables in the file, sorted.
pub fn table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Row count of a table, or `None` if the table is missing or unreadable.
pub fn table_row_count(conn: &Connection, table: &str) -> Option<i64> {
    match table_exists(conn, table) {
        Ok(true) => {}
        _ => return None,
    }
    // The name is checked against sqlite_master above, so quoting it is enough.
    let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
    match conn.query_row(&sql, [], |row| row.get(0)) {
        Ok(count) => Some(count),
        Err(e) => {
            log::debug!("Counting rows in {table} failed: {e}");
            None
        }
    }
}

const CONTENT_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS ContentItems (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Directory TEXT,
    Executable TEXT,
    TitleId INTEGER,
    MediaId INTEGER,
    BaseVersion INTEGER,
    DiscNum INTEGER,
    DiscsInSet INTEGER,
    TitleName TEXT,
    Description TEXT,
    Publisher TEXT,
    Developer TEXT,
    LiveRating REAL,
    LiveRaters INTEGER,
    ReleaseDate TEXT,
    GenreFlag INTEGER,
    ContentFlags INTEGER,
    Hash TEXT,
    GameCapsOnline INTEGER,
    GameCapsOffline INTEGER,
    GameCapsFlags INTEGER,
    FileType INTEGER,
    ContentType INTEGER,
    ContentGroup INTEGER,
    DefaultGroup INTEGER,
    DateAdded INTEGER,
    FoundAtDepth INTEGER,
    SystemLink INTEGER,
    ScanPathId INTEGER
);

CREATE TABLE IF NOT EXISTS TitleUpdates (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    DisplayName TEXT,
    FileName TEXT,
    LiveDeviceId TEXT,
    LivePath TEXT,
    TitleId INTEGER,
    MediaId INTEGER,
    BaseVersion INTEGER,
    Version INTEGER,
    Hash TEXT,
    BackupPath TEXT,
    FileSize INTEGER
);
"#;

const SETTINGS_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS SystemSettings (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT,
    Value TEXT
);

CREATE TABLE IF NOT EXISTS UserSettings (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT,
    Value TEXT,
    ProfileId TEXT
);

CREATE TABLE IF NOT EXISTS ScanPaths (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Path TEXT,
    DeviceId TEXT,
    Depth INTEGER,
    ScriptData TEXT,
    OptionsFlag INTEGER
);

CREATE TABLE IF NOT EXISTS Profiles (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Gametag TEXT,
    Xuid TEXT
);

CREATE TABLE IF NOT EXISTS QuickViews (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    DisplayName TEXT,
    SortMethod TEXT,
    FilterMethod TEXT,
    Flags INTEGER,
    CreatorXUID TEXT,
    OrderIndex INTEGER,
    IconHash TEXT
);

CREATE TABLE IF NOT EXISTS UserFavorites (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    ContentId INTEGER,
    ProfileId TEXT
);

CREATE TABLE IF NOT EXISTS UserHidden (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    ContentId INTEGER,
    ProfileId TEXT
);

CREATE TABLE IF NOT EXISTS Trainers (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    TitleId TEXT,
    MediaId TEXT,
    TrainerPath TEXT,
    TrainerName TEXT,
    TrainerVersion INTEGER,
    TrainerData TEXT,
    TrainerInfo TEXT,
    TrainerAuthor TEXT,
    TrainerRating INTEGER,
    TrainerFlags INTEGER,
    CreatorXUID TEXT
);
"#;

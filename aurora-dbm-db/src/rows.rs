//! Mapping between stored rows and the typed entity rows.
//!
//! Cells are read through [`ValueRef`] rather than typed `get` calls
//! because the dashboard that writes these files is loose about storage
//! classes: integers turn up as REAL or TEXT, and optional columns are
//! often NULL.

use aurora_dbm_catalog::{
    ContentRow, ProfileRow, QuickViewRow, ScanPathRow, SystemSettingRow, TitleUpdateRow,
    TrainerRow, UserFavoriteRow, UserHiddenRow, UserSettingRow,
};
use aurora_dbm_core::{
    ContentFlags, ContentGroup, ContentType, FileType, GameCapsFlags, GenreFlags, OfflineCaps,
    OnlineCaps,
};
use rusqlite::Row;
use rusqlite::types::{Value, ValueRef};

use crate::error::RowError;
use crate::schema;

/// A row type stored in one table, keyed by an integer `Id` column.
pub trait TableRow: Clone + Sized {
    /// Table name.
    const TABLE: &'static str;

    /// Writable columns, in the order [`TableRow::values`] returns them.
    /// `Id` is not included.
    const COLUMNS: &'static [&'static str];

    /// The full-table load query. Selects `Id` followed by [`TableRow::COLUMNS`].
    fn select_sql() -> String {
        format!(
            "SELECT Id, {} FROM {} ORDER BY Id",
            Self::COLUMNS.join(", "),
            Self::TABLE
        )
    }

    /// Read one result row.
    fn from_row(row: &Row<'_>) -> Result<Self, RowError>;

    /// Parameter values for [`TableRow::COLUMNS`].
    fn values(&self) -> Vec<Value>;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);
}

// ── Cell coercion ───────────────────────────────────────────────────────

struct Cells<'r, 's> {
    row: &'r Row<'s>,
}

impl<'r, 's> Cells<'r, 's> {
    fn new(row: &'r Row<'s>) -> Self {
        Self { row }
    }

    fn cell(&self, column: &'static str) -> Result<ValueRef<'r>, RowError> {
        self.row
            .get_ref(column)
            .map_err(|_| RowError::MissingColumn { column })
    }

    /// An integer cell, `None` when NULL.
    fn integer(&self, column: &'static str) -> Result<Option<i64>, RowError> {
        match self.cell(column)? {
            ValueRef::Null => Ok(None),
            ValueRef::Integer(v) => Ok(Some(v)),
            ValueRef::Real(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(Some(f as i64))
            }
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .map(Some)
                .ok_or_else(|| RowError::WrongType {
                    column,
                    expected: "integer",
                    found: format!("text {:?}", String::from_utf8_lossy(bytes)),
                }),
            other => Err(RowError::WrongType {
                column,
                expected: "integer",
                found: other.data_type().to_string(),
            }),
        }
    }

    fn id(&self) -> Result<i64, RowError> {
        self.integer("Id")?.ok_or(RowError::Null { column: "Id" })
    }

    fn int64(&self, column: &'static str) -> Result<i64, RowError> {
        Ok(self.integer(column)?.unwrap_or(0))
    }

    /// A 32-bit cell. Values above `i32::MAX` up to `u32::MAX` are
    /// unsigned ids written by other tools and wrap into the signed range.
    fn int32(&self, column: &'static str) -> Result<i32, RowError> {
        let value = self.int64(column)?;
        if (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(&value) {
            Ok(value as i32)
        } else {
            Err(RowError::OutOfRange {
                column,
                expected: "a 32-bit integer",
                value,
            })
        }
    }

    /// Disc counts never fail a load; anything unusable reads as one disc.
    /// Unlike numeric cells, such a cell has no raw value to keep: the row
    /// holds 1, and saving the row after an edit writes 1 back.
    fn disc_count(&self, column: &'static str) -> Result<i32, RowError> {
        match self.int32(column) {
            Ok(value) => Ok(value),
            Err(e @ RowError::MissingColumn { .. }) => Err(e),
            Err(_) => Ok(1),
        }
    }

    fn boolean(&self, column: &'static str) -> Result<bool, RowError> {
        Ok(self.int64(column)? != 0)
    }

    fn real(&self, column: &'static str) -> Result<f64, RowError> {
        match self.cell(column)? {
            ValueRef::Null => Ok(0.0),
            ValueRef::Integer(v) => Ok(v as f64),
            ValueRef::Real(f) => Ok(f),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .ok_or_else(|| RowError::WrongType {
                    column,
                    expected: "real",
                    found: format!("text {:?}", String::from_utf8_lossy(bytes)),
                }),
            other => Err(RowError::WrongType {
                column,
                expected: "real",
                found: other.data_type().to_string(),
            }),
        }
    }

    fn text(&self, column: &'static str) -> Result<String, RowError> {
        match self.cell(column)? {
            ValueRef::Null => Ok(String::new()),
            ValueRef::Text(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Integer(v) => Ok(v.to_string()),
            ValueRef::Real(f) => Ok(f.to_string()),
            ValueRef::Blob(_) => Err(RowError::WrongType {
                column,
                expected: "text",
                found: "Blob".to_string(),
            }),
        }
    }
}

/// The `Id` of a result row, if it can be read. Used for error context.
pub(crate) fn row_id(row: &Row<'_>) -> Option<i64> {
    Cells::new(row).id().ok()
}

// ── Content database ────────────────────────────────────────────────────

impl TableRow for ContentRow {
    const TABLE: &'static str = schema::CONTENT_ITEMS;
    const COLUMNS: &'static [&'static str] = &[
        "Directory",
        "Executable",
        "TitleId",
        "MediaId",
        "BaseVersion",
        "DiscNum",
        "DiscsInSet",
        "TitleName",
        "Description",
        "Publisher",
        "Developer",
        "LiveRating",
        "LiveRaters",
        "ReleaseDate",
        "GenreFlag",
        "ContentFlags",
        "Hash",
        "GameCapsOnline",
        "GameCapsOffline",
        "GameCapsFlags",
        "FileType",
        "ContentType",
        "ContentGroup",
        "DefaultGroup",
        "DateAdded",
        "FoundAtDepth",
        "SystemLink",
        "ScanPathId",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            directory: c.text("Directory")?,
            executable: c.text("Executable")?,
            title_id: c.int32("TitleId")?,
            media_id: c.int32("MediaId")?,
            base_version: c.int32("BaseVersion")?,
            disc_num: c.disc_count("DiscNum")?,
            discs_in_set: c.disc_count("DiscsInSet")?,
            title_name: c.text("TitleName")?,
            description: c.text("Description")?,
            publisher: c.text("Publisher")?,
            developer: c.text("Developer")?,
            live_rating: c.real("LiveRating")?,
            live_raters: c.int32("LiveRaters")?,
            release_date: c.text("ReleaseDate")?,
            genre_flag: GenreFlags::from_bits_retain(c.int32("GenreFlag")?),
            content_flags: ContentFlags::from_bits_retain(c.int32("ContentFlags")?),
            hash: c.text("Hash")?,
            game_caps_online: OnlineCaps::from_bits(c.int64("GameCapsOnline")?),
            game_caps_offline: OfflineCaps::from_bits(c.int64("GameCapsOffline")?),
            game_caps_flags: GameCapsFlags::from_bits_retain(c.int32("GameCapsFlags")?),
            file_type: FileType::new(c.int32("FileType")?),
            content_type: ContentType::new(c.int32("ContentType")?),
            content_group: ContentGroup::new(c.int32("ContentGroup")?),
            default_group: ContentGroup::new(c.int32("DefaultGroup")?),
            date_added: c.int64("DateAdded")?,
            found_at_depth: c.int32("FoundAtDepth")?,
            system_link: c.boolean("SystemLink")?,
            scan_path_id: c.int32("ScanPathId")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.directory.clone()),
            Value::from(self.executable.clone()),
            Value::from(self.title_id),
            Value::from(self.media_id),
            Value::from(self.base_version),
            Value::from(self.disc_num),
            Value::from(self.discs_in_set),
            Value::from(self.title_name.clone()),
            Value::from(self.description.clone()),
            Value::from(self.publisher.clone()),
            Value::from(self.developer.clone()),
            Value::from(self.live_rating),
            Value::from(self.live_raters),
            Value::from(self.release_date.clone()),
            Value::from(self.genre_flag.bits()),
            Value::from(self.content_flags.bits()),
            Value::from(self.hash.clone()),
            Value::from(self.game_caps_online.bits()),
            Value::from(self.game_caps_offline.bits()),
            Value::from(self.game_caps_flags.bits()),
            Value::from(self.file_type.value()),
            Value::from(self.content_type.value()),
            Value::from(self.content_group.value()),
            Value::from(self.default_group.value()),
            Value::from(self.date_added),
            Value::from(self.found_at_depth),
            Value::from(self.system_link),
            Value::from(self.scan_path_id),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for TitleUpdateRow {
    const TABLE: &'static str = schema::TITLE_UPDATES;
    const COLUMNS: &'static [&'static str] = &[
        "DisplayName",
        "FileName",
        "LiveDeviceId",
        "LivePath",
        "TitleId",
        "MediaId",
        "BaseVersion",
        "Version",
        "Hash",
        "BackupPath",
        "FileSize",
    ];

    fn select_sql() -> String {
        "SELECT Id, DisplayName, FileName, LiveDeviceId, LivePath, TitleId, MediaId, \
         BaseVersion, Version, Hash, BackupPath, CAST(FileSize AS TEXT) AS FileSize \
         FROM TitleUpdates ORDER BY Id"
            .to_string()
    }

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            display_name: c.text("DisplayName")?,
            file_name: c.text("FileName")?,
            live_device_id: c.text("LiveDeviceId")?,
            live_path: c.text("LivePath")?,
            title_id: c.int32("TitleId")?,
            media_id: c.int32("MediaId")?,
            base_version: c.int32("BaseVersion")?,
            version: c.int32("Version")?,
            hash: c.text("Hash")?,
            backup_path: c.text("BackupPath")?,
            file_size: c.text("FileSize")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.display_name.clone()),
            Value::from(self.file_name.clone()),
            Value::from(self.live_device_id.clone()),
            Value::from(self.live_path.clone()),
            Value::from(self.title_id),
            Value::from(self.media_id),
            Value::from(self.base_version),
            Value::from(self.version),
            Value::from(self.hash.clone()),
            Value::from(self.backup_path.clone()),
            Value::from(self.file_size.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

// ── Settings database ───────────────────────────────────────────────────

impl TableRow for SystemSettingRow {
    const TABLE: &'static str = schema::SYSTEM_SETTINGS;
    const COLUMNS: &'static [&'static str] = &["Name", "Value"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            name: c.text("Name")?,
            value: c.text("Value")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.value.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for UserSettingRow {
    const TABLE: &'static str = schema::USER_SETTINGS;
    const COLUMNS: &'static [&'static str] = &["Name", "Value", "ProfileId"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            name: c.text("Name")?,
            value: c.text("Value")?,
            profile_id: c.text("ProfileId")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.name.clone()),
            Value::from(self.value.clone()),
            Value::from(self.profile_id.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for ScanPathRow {
    const TABLE: &'static str = schema::SCAN_PATHS;
    const COLUMNS: &'static [&'static str] =
        &["Path", "DeviceId", "Depth", "ScriptData", "OptionsFlag"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            path: c.text("Path")?,
            device_id: c.text("DeviceId")?,
            depth: c.int32("Depth")?,
            script_data: c.text("ScriptData")?,
            options_flag: c.int64("OptionsFlag")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.path.clone()),
            Value::from(self.device_id.clone()),
            Value::from(self.depth),
            Value::from(self.script_data.clone()),
            Value::from(self.options_flag),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for ProfileRow {
    const TABLE: &'static str = schema::PROFILES;
    const COLUMNS: &'static [&'static str] = &["Gametag", "Xuid"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            gametag: c.text("Gametag")?,
            xuid: c.text("Xuid")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.gametag.clone()),
            Value::from(self.xuid.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for QuickViewRow {
    const TABLE: &'static str = schema::QUICK_VIEWS;
    const COLUMNS: &'static [&'static str] = &[
        "DisplayName",
        "SortMethod",
        "FilterMethod",
        "Flags",
        "CreatorXUID",
        "OrderIndex",
        "IconHash",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            display_name: c.text("DisplayName")?,
            sort_method: c.text("SortMethod")?,
            filter_method: c.text("FilterMethod")?,
            flags: c.int32("Flags")?,
            creator_xuid: c.text("CreatorXUID")?,
            order_index: c.int32("OrderIndex")?,
            icon_hash: c.text("IconHash")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.display_name.clone()),
            Value::from(self.sort_method.clone()),
            Value::from(self.filter_method.clone()),
            Value::from(self.flags),
            Value::from(self.creator_xuid.clone()),
            Value::from(self.order_index),
            Value::from(self.icon_hash.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for UserFavoriteRow {
    const TABLE: &'static str = schema::USER_FAVORITES;
    const COLUMNS: &'static [&'static str] = &["ContentId", "ProfileId"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            content_id: c.int32("ContentId")?,
            profile_id: c.text("ProfileId")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.content_id),
            Value::from(self.profile_id.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for UserHiddenRow {
    const TABLE: &'static str = schema::USER_HIDDEN;
    const COLUMNS: &'static [&'static str] = &["ContentId", "ProfileId"];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            content_id: c.int32("ContentId")?,
            profile_id: c.text("ProfileId")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.content_id),
            Value::from(self.profile_id.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl TableRow for TrainerRow {
    const TABLE: &'static str = schema::TRAINERS;
    const COLUMNS: &'static [&'static str] = &[
        "TitleId",
        "MediaId",
        "TrainerPath",
        "TrainerName",
        "TrainerVersion",
        "TrainerData",
        "TrainerInfo",
        "TrainerAuthor",
        "TrainerRating",
        "TrainerFlags",
        "CreatorXUID",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let c = Cells::new(row);
        Ok(Self {
            id: c.id()?,
            title_id: c.text("TitleId")?,
            media_id: c.text("MediaId")?,
            trainer_path: c.text("TrainerPath")?,
            trainer_name: c.text("TrainerName")?,
            trainer_version: c.int32("TrainerVersion")?,
            trainer_data: c.text("TrainerData")?,
            trainer_info: c.text("TrainerInfo")?,
            trainer_author: c.text("TrainerAuthor")?,
            trainer_rating: c.int32("TrainerRating")?,
            trainer_flags: c.int32("TrainerFlags")?,
            creator_xuid: c.text("CreatorXUID")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title_id.clone()),
            Value::from(self.media_id.clone()),
            Value::from(self.trainer_path.clone()),
            Value::from(self.trainer_name.clone()),
            Value::from(self.trainer_version),
            Value::from(self.trainer_data.clone()),
            Value::from(self.trainer_info.clone()),
            Value::from(self.trainer_author.clone()),
            Value::from(self.trainer_rating),
            Value::from(self.trainer_flags),
            Value::from(self.creator_xuid.clone()),
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn read<T: TableRow>(conn: &Connection, sql: &str) -> Result<T, RowError> {
        let mut stmt = conn.prepare(sql).unwrap();
        let mut rows = stmt.query([]).unwrap();
        let row = rows.next().unwrap().unwrap();
        T::from_row(row)
    }

    #[test]
    fn integers_accept_real_and_numeric_text() {
        let conn = Connection::open_in_memory().unwrap();
        let row: UserFavoriteRow = read(
            &conn,
            "SELECT 7.0 AS Id, ' 42 ' AS ContentId, 1234 AS ProfileId",
        )
        .unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.content_id, 42);
        assert_eq!(row.profile_id, "1234");
    }

    #[test]
    fn null_cells_read_as_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        let row: QuickViewRow = read(
            &conn,
            "SELECT 1 AS Id, NULL AS DisplayName, NULL AS SortMethod, NULL AS FilterMethod, \
             NULL AS Flags, NULL AS CreatorXUID, NULL AS OrderIndex, NULL AS IconHash",
        )
        .unwrap();
        assert_eq!(row.display_name, "");
        assert_eq!(row.flags, 0);
        assert_eq!(row.order_index, 0);
    }

    #[test]
    fn null_id_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = read::<ProfileRow>(&conn, "SELECT NULL AS Id, 'a' AS Gametag, 'b' AS Xuid")
            .unwrap_err();
        assert!(matches!(err, RowError::Null { column: "Id" }));
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = read::<UserHiddenRow>(
            &conn,
            "SELECT 1 AS Id, 'abc' AS ContentId, '' AS ProfileId",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RowError::WrongType {
                column: "ContentId",
                ..
            }
        ));
    }

    #[test]
    fn blob_in_text_column_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = read::<SystemSettingRow>(&conn, "SELECT 1 AS Id, x'00ff' AS Name, '' AS Value")
            .unwrap_err();
        assert!(matches!(err, RowError::WrongType { column: "Name", .. }));
    }

    #[test]
    fn missing_column_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = read::<ProfileRow>(&conn, "SELECT 1 AS Id, 'a' AS Gametag").unwrap_err();
        assert!(matches!(err, RowError::MissingColumn { column: "Xuid" }));
    }

    #[test]
    fn unsigned_ids_wrap_and_larger_values_fail() {
        let conn = Connection::open_in_memory().unwrap();
        let row: UserFavoriteRow =
            read(&conn, "SELECT 1 AS Id, 4294967295 AS ContentId, '' AS ProfileId").unwrap();
        assert_eq!(row.content_id, -1);

        let err = read::<UserFavoriteRow>(
            &conn,
            "SELECT 1 AS Id, 4294967296 AS ContentId, '' AS ProfileId",
        )
        .unwrap_err();
        assert!(matches!(err, RowError::OutOfRange { .. }));
    }

    #[test]
    fn select_sql_lists_id_then_columns() {
        assert_eq!(
            ProfileRow::select_sql(),
            "SELECT Id, Gametag, Xuid FROM Profiles ORDER BY Id"
        );
        assert!(TitleUpdateRow::select_sql().contains("CAST(FileSize AS TEXT) AS FileSize"));
    }

    #[test]
    fn values_match_column_count() {
        assert_eq!(
            ContentRow::default().values().len(),
            ContentRow::COLUMNS.len()
        );
        assert_eq!(
            TitleUpdateRow::default().values().len(),
            TitleUpdateRow::COLUMNS.len()
        );
        assert_eq!(TrainerRow::default().values().len(), TrainerRow::COLUMNS.len());
        assert_eq!(
            QuickViewRow::default().values().len(),
            QuickViewRow::COLUMNS.len()
        );
        assert_eq!(ScanPathRow::default().values().len(), ScanPathRow::COLUMNS.len());
    }
}

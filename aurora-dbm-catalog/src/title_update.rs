//! Title update entries (`TitleUpdates` table).

use aurora_dbm_core::util::format_title_id;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One row of `TitleUpdates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleUpdateRow {
    pub id: i64,
    pub display_name: String,
    pub file_name: String,
    pub live_device_id: String,
    pub live_path: String,
    pub title_id: i32,
    pub media_id: i32,
    pub base_version: i32,
    pub version: i32,
    pub hash: String,
    pub backup_path: String,
    /// Kept as text: sizes can exceed the signed 64-bit range the
    /// database driver hands back for integer columns.
    pub file_size: String,
}

/// A title update package registered against a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleUpdateItem {
    row: TitleUpdateRow,
    changed: bool,
}

impl TitleUpdateItem {
    pub fn new(row: TitleUpdateRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn display_name(&self) -> &str {
        &self.row.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.changed = true;
        self.row.display_name = display_name.into();
    }

    pub fn file_name(&self) -> &str {
        &self.row.file_name
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.changed = true;
        self.row.file_name = file_name.into();
    }

    pub fn live_path(&self) -> &str {
        &self.row.live_path
    }

    pub fn set_live_path(&mut self, live_path: impl Into<String>) {
        self.changed = true;
        self.row.live_path = live_path.into();
    }

    pub fn title_id(&self) -> i32 {
        self.row.title_id
    }

    pub fn set_title_id(&mut self, title_id: i32) {
        self.changed = true;
        self.row.title_id = title_id;
    }

    pub fn title_id_hex(&self) -> String {
        format_title_id(self.row.title_id)
    }

    pub fn media_id(&self) -> i32 {
        self.row.media_id
    }

    pub fn set_media_id(&mut self, media_id: i32) {
        self.changed = true;
        self.row.media_id = media_id;
    }

    pub fn base_version(&self) -> i32 {
        self.row.base_version
    }

    pub fn set_base_version(&mut self, base_version: i32) {
        self.changed = true;
        self.row.base_version = base_version;
    }

    pub fn version(&self) -> i32 {
        self.row.version
    }

    pub fn set_version(&mut self, version: i32) {
        self.changed = true;
        self.row.version = version;
    }

    pub fn live_device_id(&self) -> &str {
        &self.row.live_device_id
    }

    pub fn backup_path(&self) -> &str {
        &self.row.backup_path
    }

    pub fn hash(&self) -> &str {
        &self.row.hash
    }

    pub fn file_size(&self) -> &str {
        &self.row.file_size
    }
}

impl Record for TitleUpdateItem {
    const KIND: &'static str = "title update";
    type Row = TitleUpdateRow;

    fn from_row(row: TitleUpdateRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &TitleUpdateRow {
        &self.row
    }

    fn id(&self) -> i64 {
        self.row.id
    }

    fn is_changed(&self) -> bool {
        self.changed
    }

    fn mark_saved(&mut self) {
        self.changed = false;
    }
}

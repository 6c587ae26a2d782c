//! Settings database entities.
//!
//! Every settings table follows the same shape: an integer id assigned by
//! the store plus a handful of scalar columns, all editable.

use serde::{Deserialize, Serialize};

use crate::record::Record;

// ── SystemSetting ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettingRow {
    pub id: i64,
    pub name: String,
    pub value: String,
}

/// A dashboard-wide setting (`SystemSettings` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSetting {
    row: SystemSettingRow,
    changed: bool,
}

impl SystemSetting {
    pub fn new(row: SystemSettingRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn name(&self) -> &str {
        &self.row.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.changed = true;
        self.row.name = name.into();
    }

    pub fn value(&self) -> &str {
        &self.row.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.changed = true;
        self.row.value = value.into();
    }
}

impl Record for SystemSetting {
    const KIND: &'static str = "system setting";
    type Row = SystemSettingRow;

    fn from_row(row: SystemSettingRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &SystemSettingRow {
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

// ── UserSetting ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettingRow {
    pub id: i64,
    pub name: String,
    pub value: String,
    pub profile_id: String,
}

/// A per-profile setting (`UserSettings` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSetting {
    row: UserSettingRow,
    changed: bool,
}

impl UserSetting {
    pub fn new(row: UserSettingRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn name(&self) -> &str {
        &self.row.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.changed = true;
        self.row.name = name.into();
    }

    pub fn value(&self) -> &str {
        &self.row.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.changed = true;
        self.row.value = value.into();
    }

    pub fn profile_id(&self) -> &str {
        &self.row.profile_id
    }

    pub fn set_profile_id(&mut self, profile_id: impl Into<String>) {
        self.changed = true;
        self.row.profile_id = profile_id.into();
    }
}

impl Record for UserSetting {
    const KIND: &'static str = "user setting";
    type Row = UserSettingRow;

    fn from_row(row: UserSettingRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &UserSettingRow {
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

// ── ScanPath ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPathRow {
    pub id: i64,
    pub path: String,
    pub device_id: String,
    pub depth: i32,
    pub script_data: String,
    pub options_flag: i64,
}

/// A directory the dashboard scans for content (`ScanPaths` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPath {
    row: ScanPathRow,
    changed: bool,
}

impl ScanPath {
    pub fn new(row: ScanPathRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn path(&self) -> &str {
        &self.row.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.changed = true;
        self.row.path = path.into();
    }

    pub fn device_id(&self) -> &str {
        &self.row.device_id
    }

    pub fn set_device_id(&mut self, device_id: impl Into<String>) {
        self.changed = true;
        self.row.device_id = device_id.into();
    }

    pub fn depth(&self) -> i32 {
        self.row.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.changed = true;
        self.row.depth = depth;
    }

    pub fn script_data(&self) -> &str {
        &self.row.script_data
    }

    pub fn set_script_data(&mut self, script_data: impl Into<String>) {
        self.changed = true;
        self.row.script_data = script_data.into();
    }

    pub fn options_flag(&self) -> i64 {
        self.row.options_flag
    }

    pub fn set_options_flag(&mut self, options_flag: i64) {
        self.changed = true;
        self.row.options_flag = options_flag;
    }
}

impl Record for ScanPath {
    const KIND: &'static str = "scan path";
    type Row = ScanPathRow;

    fn from_row(row: ScanPathRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &ScanPathRow {
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

// ── Profile ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: i64,
    pub gametag: String,
    pub xuid: String,
}

/// A signed-in user profile (`Profiles` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    row: ProfileRow,
    changed: bool,
}

impl Profile {
    pub fn new(row: ProfileRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn gametag(&self) -> &str {
        &self.row.gametag
    }

    pub fn set_gametag(&mut self, gametag: impl Into<String>) {
        self.changed = true;
        self.row.gametag = gametag.into();
    }

    pub fn xuid(&self) -> &str {
        &self.row.xuid
    }

    pub fn set_xuid(&mut self, xuid: impl Into<String>) {
        self.changed = true;
        self.row.xuid = xuid.into();
    }
}

impl Record for Profile {
    const KIND: &'static str = "profile";
    type Row = ProfileRow;

    fn from_row(row: ProfileRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &ProfileRow {
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

// ── QuickView ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickViewRow {
    pub id: i64,
    pub display_name: String,
    pub sort_method: String,
    pub filter_method: String,
    pub flags: i32,
    pub creator_xuid: String,
    pub order_index: i32,
    pub icon_hash: String,
}

/// A saved sort/filter view of the game list (`QuickViews` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickView {
    row: QuickViewRow,
    changed: bool,
}

impl QuickView {
    pub fn new(row: QuickViewRow) -> Self {
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

    pub fn sort_method(&self) -> &str {
        &self.row.sort_method
    }

    pub fn set_sort_method(&mut self, sort_method: impl Into<String>) {
        self.changed = true;
        self.row.sort_method = sort_method.into();
    }

    pub fn filter_method(&self) -> &str {
        &self.row.filter_method
    }

    pub fn set_filter_method(&mut self, filter_method: impl Into<String>) {
        self.changed = true;
        self.row.filter_method = filter_method.into();
    }

    pub fn flags(&self) -> i32 {
        self.row.flags
    }

    pub fn set_flags(&mut self, flags: i32) {
        self.changed = true;
        self.row.flags = flags;
    }

    pub fn creator_xuid(&self) -> &str {
        &self.row.creator_xuid
    }

    pub fn set_creator_xuid(&mut self, creator_xuid: impl Into<String>) {
        self.changed = true;
        self.row.creator_xuid = creator_xuid.into();
    }

    pub fn order_index(&self) -> i32 {
        self.row.order_index
    }

    pub fn set_order_index(&mut self, order_index: i32) {
        self.changed = true;
        self.row.order_index = order_index;
    }

    pub fn icon_hash(&self) -> &str {
        &self.row.icon_hash
    }

    pub fn set_icon_hash(&mut self, icon_hash: impl Into<String>) {
        self.changed = true;
        self.row.icon_hash = icon_hash.into();
    }
}

impl Record for QuickView {
    const KIND: &'static str = "quick view";
    type Row = QuickViewRow;

    fn from_row(row: QuickViewRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &QuickViewRow {
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

// ── UserFavorite ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFavoriteRow {
    pub id: i64,
    pub content_id: i32,
    pub profile_id: String,
}

/// A content item a profile marked as favorite (`UserFavorites` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFavorite {
    row: UserFavoriteRow,
    changed: bool,
}

impl UserFavorite {
    pub fn new(row: UserFavoriteRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn content_id(&self) -> i32 {
        self.row.content_id
    }

    pub fn set_content_id(&mut self, content_id: i32) {
        self.changed = true;
        self.row.content_id = content_id;
    }

    pub fn profile_id(&self) -> &str {
        &self.row.profile_id
    }

    pub fn set_profile_id(&mut self, profile_id: impl Into<String>) {
        self.changed = true;
        self.row.profile_id = profile_id.into();
    }
}

impl Record for UserFavorite {
    const KIND: &'static str = "user favorite";
    type Row = UserFavoriteRow;

    fn from_row(row: UserFavoriteRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &UserFavoriteRow {
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

// ── UserHidden ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHiddenRow {
    pub id: i64,
    pub content_id: i32,
    pub profile_id: String,
}

/// A content item a profile hid from the game list (`UserHidden` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHidden {
    row: UserHiddenRow,
    changed: bool,
}

impl UserHidden {
    pub fn new(row: UserHiddenRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn content_id(&self) -> i32 {
        self.row.content_id
    }

    pub fn set_content_id(&mut self, content_id: i32) {
        self.changed = true;
        self.row.content_id = content_id;
    }

    pub fn profile_id(&self) -> &str {
        &self.row.profile_id
    }

    pub fn set_profile_id(&mut self, profile_id: impl Into<String>) {
        self.changed = true;
        self.row.profile_id = profile_id.into();
    }
}

impl Record for UserHidden {
    const KIND: &'static str = "hidden item";
    type Row = UserHiddenRow;

    fn from_row(row: UserHiddenRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &UserHiddenRow {
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

// ── Trainer ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerRow {
    pub id: i64,
    pub title_id: String,
    pub media_id: String,
    pub trainer_path: String,
    pub trainer_name: String,
    pub trainer_version: i32,
    pub trainer_data: String,
    pub trainer_info: String,
    pub trainer_author: String,
    pub trainer_rating: i32,
    pub trainer_flags: i32,
    pub creator_xuid: String,
}

/// A cheat trainer attached to a title (`Trainers` table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    row: TrainerRow,
    changed: bool,
}

impl Trainer {
    pub fn new(row: TrainerRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn title_id(&self) -> &str {
        &self.row.title_id
    }

    pub fn set_title_id(&mut self, title_id: impl Into<String>) {
        self.changed = true;
        self.row.title_id = title_id.into();
    }

    pub fn media_id(&self) -> &str {
        &self.row.media_id
    }

    pub fn set_media_id(&mut self, media_id: impl Into<String>) {
        self.changed = true;
        self.row.media_id = media_id.into();
    }

    pub fn trainer_path(&self) -> &str {
        &self.row.trainer_path
    }

    pub fn set_trainer_path(&mut self, trainer_path: impl Into<String>) {
        self.changed = true;
        self.row.trainer_path = trainer_path.into();
    }

    pub fn trainer_name(&self) -> &str {
        &self.row.trainer_name
    }

    pub fn set_trainer_name(&mut self, trainer_name: impl Into<String>) {
        self.changed = true;
        self.row.trainer_name = trainer_name.into();
    }

    pub fn trainer_version(&self) -> i32 {
        self.row.trainer_version
    }

    pub fn set_trainer_version(&mut self, trainer_version: i32) {
        self.changed = true;
        self.row.trainer_version = trainer_version;
    }

    pub fn trainer_data(&self) -> &str {
        &self.row.trainer_data
    }

    pub fn set_trainer_data(&mut self, trainer_data: impl Into<String>) {
        self.changed = true;
        self.row.trainer_data = trainer_data.into();
    }

    pub fn trainer_info(&self) -> &str {
        &self.row.trainer_info
    }

    pub fn set_trainer_info(&mut self, trainer_info: impl Into<String>) {
        self.changed = true;
        self.row.trainer_info = trainer_info.into();
    }

    pub fn trainer_author(&self) -> &str {
        &self.row.trainer_author
    }

    pub fn set_trainer_author(&mut self, trainer_author: impl Into<String>) {
        self.changed = true;
        self.row.trainer_author = trainer_author.into();
    }

    pub fn trainer_rating(&self) -> i32 {
        self.row.trainer_rating
    }

    pub fn set_trainer_rating(&mut self, trainer_rating: i32) {
        self.changed = true;
        self.row.trainer_rating = trainer_rating;
    }

    pub fn trainer_flags(&self) -> i32 {
        self.row.trainer_flags
    }

    pub fn set_trainer_flags(&mut self, trainer_flags: i32) {
        self.changed = true;
        self.row.trainer_flags = trainer_flags;
    }

    pub fn creator_xuid(&self) -> &str {
        &self.row.creator_xuid
    }

    pub fn set_creator_xuid(&mut self, creator_xuid: impl Into<String>) {
        self.changed = true;
        self.row.creator_xuid = creator_xuid.into();
    }
}

impl Record for Trainer {
    const KIND: &'static str = "trainer";
    type Row = TrainerRow;

    fn from_row(row: TrainerRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &TrainerRow {
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

//! Content catalog entries (`ContentItems` table).

use aurora_dbm_core::util::format_title_id;
use aurora_dbm_core::{
    ContentFlags, ContentGroup, ContentType, FileType, GameCapsFlags, GenreFlags, OfflineCaps,
    OfflineField, OnlineCaps, OnlineField, PlayerRange, filetime,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// One row of `ContentItems`, exactly as stored.
///
/// Disc counts are kept raw here; [`ContentItem`] applies the
/// "at least one disc" rule when reading them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub id: i64,
    pub directory: String,
    pub executable: String,
    pub title_id: i32,
    pub media_id: i32,
    pub base_version: i32,
    pub disc_num: i32,
    pub discs_in_set: i32,
    pub title_name: String,
    pub description: String,
    pub publisher: String,
    pub developer: String,
    pub live_rating: f64,
    pub live_raters: i32,
    pub release_date: String,
    pub genre_flag: GenreFlags,
    pub content_flags: ContentFlags,
    pub hash: String,
    pub game_caps_online: OnlineCaps,
    pub game_caps_offline: OfflineCaps,
    pub game_caps_flags: GameCapsFlags,
    pub file_type: FileType,
    pub content_type: ContentType,
    pub content_group: ContentGroup,
    pub default_group: ContentGroup,
    /// FILETIME ticks.
    pub date_added: i64,
    pub found_at_depth: i32,
    pub system_link: bool,
    pub scan_path_id: i32,
}

/// A game title in the content database.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    row: ContentRow,
    changed: bool,
}

impl ContentItem {
    pub fn new(row: ContentRow) -> Self {
        Self {
            row,
            changed: false,
        }
    }

    // ── Identity and read-only scan data ───────────────────────────────────

    pub fn id(&self) -> i64 {
        self.row.id
    }

    pub fn executable(&self) -> &str {
        &self.row.executable
    }

    pub fn hash(&self) -> &str {
        &self.row.hash
    }

    pub fn file_type(&self) -> FileType {
        self.row.file_type
    }

    pub fn found_at_depth(&self) -> i32 {
        self.row.found_at_depth
    }

    pub fn scan_path_id(&self) -> i32 {
        self.row.scan_path_id
    }

    // ── Title metadata ─────────────────────────────────────────────────────

    pub fn title_id(&self) -> i32 {
        self.row.title_id
    }

    pub fn set_title_id(&mut self, title_id: i32) {
        self.changed = true;
        self.row.title_id = title_id;
    }

    /// Title id as eight hex digits.
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

    pub fn title_name(&self) -> &str {
        &self.row.title_name
    }

    pub fn set_title_name(&mut self, title_name: impl Into<String>) {
        self.changed = true;
        self.row.title_name = title_name.into();
    }

    pub fn description(&self) -> &str {
        &self.row.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.changed = true;
        self.row.description = description.into();
    }

    pub fn publisher(&self) -> &str {
        &self.row.publisher
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) {
        self.changed = true;
        self.row.publisher = publisher.into();
    }

    pub fn developer(&self) -> &str {
        &self.row.developer
    }

    pub fn set_developer(&mut self, developer: impl Into<String>) {
        self.changed = true;
        self.row.developer = developer.into();
    }

    pub fn release_date(&self) -> &str {
        &self.row.release_date
    }

    pub fn set_release_date(&mut self, release_date: impl Into<String>) {
        self.changed = true;
        self.row.release_date = release_date.into();
    }

    pub fn live_rating(&self) -> f64 {
        self.row.live_rating
    }

    /// NaN and infinities are stored as 0.0, the value SQLite would read back.
    pub fn set_live_rating(&mut self, live_rating: f64) {
        self.changed = true;
        self.row.live_rating = if live_rating.is_finite() {
            live_rating
        } else {
            0.0
        };
    }

    pub fn live_raters(&self) -> i32 {
        self.row.live_raters
    }

    pub fn set_live_raters(&mut self, live_raters: i32) {
        self.changed = true;
        self.row.live_raters = live_raters;
    }

    pub fn directory(&self) -> &str {
        &self.row.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<String>) {
        self.changed = true;
        self.row.directory = directory.into();
    }

    // ── Discs ──────────────────────────────────────────────────────────────

    /// Disc number within the set. A stored value of zero or less reads as 1.
    pub fn disc_num(&self) -> i32 {
        at_least_one(self.row.disc_num)
    }

    pub fn set_disc_num(&mut self, disc_num: i32) {
        self.changed = true;
        self.row.disc_num = disc_num;
    }

    /// Number of discs in the set. A stored value of zero or less reads as 1.
    pub fn discs_in_set(&self) -> i32 {
        at_least_one(self.row.discs_in_set)
    }

    pub fn set_discs_in_set(&mut self, discs_in_set: i32) {
        self.changed = true;
        self.row.discs_in_set = discs_in_set;
    }

    /// `"disc/discs"`, e.g. `"1/2"`.
    pub fn disc_info(&self) -> String {
        format!("{}/{}", self.disc_num(), self.discs_in_set())
    }

    // ── Dates and flags ────────────────────────────────────────────────────

    pub fn date_added(&self) -> DateTime<Utc> {
        filetime::to_datetime(self.row.date_added)
    }

    pub fn set_date_added(&mut self, date_added: DateTime<Utc>) {
        self.changed = true;
        self.row.date_added = filetime::from_datetime(date_added);
    }

    pub fn system_link(&self) -> bool {
        self.row.system_link
    }

    pub fn set_system_link(&mut self, system_link: bool) {
        self.changed = true;
        self.row.system_link = system_link;
    }

    pub fn genre_flag(&self) -> GenreFlags {
        self.row.genre_flag
    }

    pub fn set_genre_flag(&mut self, genre_flag: GenreFlags) {
        self.changed = true;
        self.row.genre_flag = genre_flag;
    }

    pub fn content_flags(&self) -> ContentFlags {
        self.row.content_flags
    }

    pub fn set_content_flags(&mut self, content_flags: ContentFlags) {
        self.changed = true;
        self.row.content_flags = content_flags;
    }

    pub fn game_caps_flags(&self) -> GameCapsFlags {
        self.row.game_caps_flags
    }

    pub fn set_game_caps_flags(&mut self, game_caps_flags: GameCapsFlags) {
        self.changed = true;
        self.row.game_caps_flags = game_caps_flags;
    }

    pub fn content_type(&self) -> ContentType {
        self.row.content_type
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.changed = true;
        self.row.content_type = content_type;
    }

    pub fn content_group(&self) -> ContentGroup {
        self.row.content_group
    }

    pub fn set_content_group(&mut self, content_group: ContentGroup) {
        self.changed = true;
        self.row.content_group = content_group;
    }

    pub fn default_group(&self) -> ContentGroup {
        self.row.default_group
    }

    pub fn set_default_group(&mut self, default_group: ContentGroup) {
        self.changed = true;
        self.row.default_group = default_group;
    }

    // ── Packed player counts ───────────────────────────────────────────────

    pub fn online_caps(&self) -> OnlineCaps {
        self.row.game_caps_online
    }

    pub fn offline_caps(&self) -> OfflineCaps {
        self.row.game_caps_offline
    }

    pub fn online_caps_player(&self, field: OnlineField) -> u8 {
        self.row.game_caps_online.get(field)
    }

    /// Rewrite one sub-field; the whole `GameCapsOnline` word is stored back.
    pub fn set_online_caps_player(&mut self, field: OnlineField, players: u8) {
        self.changed = true;
        self.row.game_caps_online.set(field, players);
    }

    pub fn offline_caps_player(&self, field: OfflineField) -> u8 {
        self.row.game_caps_offline.get(field)
    }

    /// Rewrite one sub-field; the whole `GameCapsOffline` word is stored back.
    pub fn set_offline_caps_player(&mut self, field: OfflineField, players: u8) {
        self.changed = true;
        self.row.game_caps_offline.set(field, players);
    }

    pub fn min_online_multiplayer_players(&self) -> u8 {
        self.online_caps_player(OnlineField::MultiplayerMin)
    }

    pub fn set_min_online_multiplayer_players(&mut self, players: u8) {
        self.set_online_caps_player(OnlineField::MultiplayerMin, players);
    }

    pub fn max_online_multiplayer_players(&self) -> u8 {
        self.online_caps_player(OnlineField::MultiplayerMax)
    }

    pub fn set_max_online_multiplayer_players(&mut self, players: u8) {
        self.set_online_caps_player(OnlineField::MultiplayerMax, players);
    }

    pub fn min_online_co_op_players(&self) -> u8 {
        self.online_caps_player(OnlineField::CoOpMin)
    }

    pub fn set_min_online_co_op_players(&mut self, players: u8) {
        self.set_online_caps_player(OnlineField::CoOpMin, players);
    }

    pub fn max_online_co_op_players(&self) -> u8 {
        self.online_caps_player(OnlineField::CoOpMax)
    }

    pub fn set_max_online_co_op_players(&mut self, players: u8) {
        self.set_online_caps_player(OnlineField::CoOpMax, players);
    }

    pub fn min_offline_players(&self) -> u8 {
        self.offline_caps_player(OfflineField::PlayersMin)
    }

    pub fn set_min_offline_players(&mut self, players: u8) {
        self.set_offline_caps_player(OfflineField::PlayersMin, players);
    }

    pub fn max_offline_players(&self) -> u8 {
        self.offline_caps_player(OfflineField::PlayersMax)
    }

    pub fn set_max_offline_players(&mut self, players: u8) {
        self.set_offline_caps_player(OfflineField::PlayersMax, players);
    }

    pub fn min_offline_co_op_players(&self) -> u8 {
        self.offline_caps_player(OfflineField::CoOpMin)
    }

    pub fn set_min_offline_co_op_players(&mut self, players: u8) {
        self.set_offline_caps_player(OfflineField::CoOpMin, players);
    }

    pub fn max_offline_co_op_players(&self) -> u8 {
        self.offline_caps_player(OfflineField::CoOpMax)
    }

    pub fn set_max_offline_co_op_players(&mut self, players: u8) {
        self.set_offline_caps_player(OfflineField::CoOpMax, players);
    }

    /// System link player count. Stored as a single byte, with no separate
    /// minimum and maximum.
    pub fn offline_system_link_players(&self) -> u8 {
        self.offline_caps_player(OfflineField::SystemLink)
    }

    pub fn set_offline_system_link_players(&mut self, players: u8) {
        self.set_offline_caps_player(OfflineField::SystemLink, players);
    }

    pub fn online_multiplayer_players(&self) -> PlayerRange {
        self.row.game_caps_online.multiplayer()
    }

    pub fn online_co_op_players(&self) -> PlayerRange {
        self.row.game_caps_online.co_op()
    }

    pub fn offline_players(&self) -> PlayerRange {
        self.row.game_caps_offline.players()
    }

    pub fn offline_co_op_players(&self) -> PlayerRange {
        self.row.game_caps_offline.co_op()
    }

    pub fn offline_system_link_range(&self) -> PlayerRange {
        self.row.game_caps_offline.system_link()
    }
}

impl Record for ContentItem {
    const KIND: &'static str = "content item";
    type Row = ContentRow;

    fn from_row(row: ContentRow) -> Self {
        Self::new(row)
    }

    fn row(&self) -> &ContentRow {
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

fn at_least_one(value: i32) -> i32 {
    if value <= 0 { 1 } else { value }
}

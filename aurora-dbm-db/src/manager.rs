//! Facade over the content and settings stores.

use std::path::Path;

use aurora_dbm_catalog::{
    ContentItem, Profile, QuickView, ScanPath, SystemSetting, TitleUpdateItem, Trainer,
    UserFavorite, UserHidden, UserSetting,
};

use crate::content::ContentStore;
use crate::error::StoreError;
use crate::error_log::ErrorLog;
use crate::record_set::RecordSet;
use crate::settings::SettingsStore;
use crate::store::{SaveReport, StoreOptions};

/// Owns one content store and one settings store.
///
/// Each store holds at most one open connection. Failures of write-path
/// calls are appended to the shared [`ErrorLog`] before being returned.
#[derive(Debug)]
pub struct DbManager {
    content: ContentStore,
    settings: SettingsStore,
}

impl DbManager {
    pub fn new(options: StoreOptions, error_log: ErrorLog) -> Self {
        Self {
            content: ContentStore::new(options, error_log.clone()),
            settings: SettingsStore::new(options, error_log),
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentStore {
        &mut self.content
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    // ── Connections ─────────────────────────────────────────────────────

    pub fn connect_to_content(&mut self, path: &Path) -> Result<(), StoreError> {
        self.content.connect(path)
    }

    pub fn connect_to_settings(&mut self, path: &Path) -> Result<(), StoreError> {
        self.settings.connect(path)
    }

    pub fn close_content_db(&mut self) -> Result<(), StoreError> {
        self.content.close()
    }

    pub fn close_settings_db(&mut self) -> Result<(), StoreError> {
        self.settings.close()
    }

    pub fn is_content_open(&self) -> bool {
        self.content.is_open()
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings.is_open()
    }

    pub fn save_content_changes(&mut self) -> Result<SaveReport, StoreError> {
        self.content.save()
    }

    pub fn save_settings_changes(&mut self) -> Result<SaveReport, StoreError> {
        self.settings.save()
    }

    // ── Content database ──────────────────────────────────────────────────

    pub fn content_items(&self) -> &RecordSet<ContentItem> {
        self.content.content_items()
    }

    pub fn content_items_mut(&mut self) -> &mut RecordSet<ContentItem> {
        self.content.content_items_mut()
    }

    /// Insert and append a content item. Returns the store-assigned id,
    /// which the appended entity also carries.
    pub fn add_content_item(&mut self, item: ContentItem) -> Result<i64, StoreError> {
        self.content.add(item)
    }

    pub fn delete_content_item(&mut self, id: i64) -> Result<usize, StoreError> {
        self.content.delete::<ContentItem>(id)
    }

    pub fn update_content_item(&mut self, item: ContentItem) -> bool {
        self.content.update(item)
    }

    pub fn title_update_items(&self) -> &RecordSet<TitleUpdateItem> {
        self.content.title_updates()
    }

    pub fn title_update_items_mut(&mut self) -> &mut RecordSet<TitleUpdateItem> {
        self.content.title_updates_mut()
    }

    pub fn add_title_update(&mut self, item: TitleUpdateItem) -> Result<i64, StoreError> {
        self.content.add(item)
    }

    pub fn delete_title_update(&mut self, id: i64) -> Result<usize, StoreError> {
        self.content.delete::<TitleUpdateItem>(id)
    }

    pub fn update_title_update(&mut self, item: TitleUpdateItem) -> bool {
        self.content.update(item)
    }

    // ── Settings database ─────────────────────────────────────────────────

    pub fn system_settings(&self) -> &RecordSet<SystemSetting> {
        self.settings.system_settings()
    }

    pub fn system_settings_mut(&mut self) -> &mut RecordSet<SystemSetting> {
        self.settings.system_settings_mut()
    }

    pub fn add_system_setting(&mut self, item: SystemSetting) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_system_setting(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<SystemSetting>(id)
    }

    pub fn update_system_setting(&mut self, item: SystemSetting) -> bool {
        self.settings.update(item)
    }

    pub fn user_settings(&self) -> &RecordSet<UserSetting> {
        self.settings.user_settings()
    }

    pub fn user_settings_mut(&mut self) -> &mut RecordSet<UserSetting> {
        self.settings.user_settings_mut()
    }

    pub fn add_user_setting(&mut self, item: UserSetting) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_user_setting(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<UserSetting>(id)
    }

    pub fn update_user_setting(&mut self, item: UserSetting) -> bool {
        self.settings.update(item)
    }

    pub fn scan_paths(&self) -> &RecordSet<ScanPath> {
        self.settings.scan_paths()
    }

    pub fn scan_paths_mut(&mut self) -> &mut RecordSet<ScanPath> {
        self.settings.scan_paths_mut()
    }

    pub fn add_scan_path(&mut self, item: ScanPath) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_scan_path(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<ScanPath>(id)
    }

    pub fn update_scan_path(&mut self, item: ScanPath) -> bool {
        self.settings.update(item)
    }

    pub fn profiles(&self) -> &RecordSet<Profile> {
        self.settings.profiles()
    }

    pub fn profiles_mut(&mut self) -> &mut RecordSet<Profile> {
        self.settings.profiles_mut()
    }

    pub fn add_profile(&mut self, item: Profile) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_profile(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<Profile>(id)
    }

    pub fn update_profile(&mut self, item: Profile) -> bool {
        self.settings.update(item)
    }

    pub fn quick_views(&self) -> &RecordSet<QuickView> {
        self.settings.quick_views()
    }

    pub fn quick_views_mut(&mut self) -> &mut RecordSet<QuickView> {
        self.settings.quick_views_mut()
    }

    pub fn add_quick_view(&mut self, item: QuickView) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_quick_view(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<QuickView>(id)
    }

    pub fn update_quick_view(&mut self, item: QuickView) -> bool {
        self.settings.update(item)
    }

    pub fn user_favorites(&self) -> &RecordSet<UserFavorite> {
        self.settings.user_favorites()
    }

    pub fn user_favorites_mut(&mut self) -> &mut RecordSet<UserFavorite> {
        self.settings.user_favorites_mut()
    }

    pub fn add_user_favorite(&mut self, item: UserFavorite) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_user_favorite(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<UserFavorite>(id)
    }

    pub fn update_user_favorite(&mut self, item: UserFavorite) -> bool {
        self.settings.update(item)
    }

    pub fn user_hidden(&self) -> &RecordSet<UserHidden> {
        self.settings.user_hidden()
    }

    pub fn user_hidden_mut(&mut self) -> &mut RecordSet<UserHidden> {
        self.settings.user_hidden_mut()
    }

    pub fn add_user_hidden(&mut self, item: UserHidden) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_user_hidden(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<UserHidden>(id)
    }

    pub fn update_user_hidden(&mut self, item: UserHidden) -> bool {
        self.settings.update(item)
    }

    pub fn trainers(&self) -> &RecordSet<Trainer> {
        self.settings.trainers()
    }

    pub fn trainers_mut(&mut self) -> &mut RecordSet<Trainer> {
        self.settings.trainers_mut()
    }

    pub fn add_trainer(&mut self, item: Trainer) -> Result<i64, StoreError> {
        self.settings.add(item)
    }

    pub fn delete_trainer(&mut self, id: i64) -> Result<usize, StoreError> {
        self.settings.delete::<Trainer>(id)
    }

    pub fn update_trainer(&mut self, item: Trainer) -> bool {
        self.settings.update(item)
    }
}

//! The settings database: eight small tables of dashboard state.

use std::path::Path;

use aurora_dbm_catalog::{
    Profile, QuickView, Record, ScanPath, SystemSetting, Trainer, UserFavorite, UserHidden,
    UserSetting,
};

use crate::error::StoreError;
use crate::error_log::ErrorLog;
use crate::record_set::RecordSet;
use crate::rows::TableRow;
use crate::statement::SqlBatch;
use crate::store::{SaveReport, StoreConnection, StoreKind, StoreOptions};

/// Entity types stored in the settings database.
pub trait SettingsRecord: Record<Row: TableRow> {
    fn records(store: &SettingsStore) -> &RecordSet<Self>;
    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self>;
}

impl SettingsRecord for SystemSetting {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.system_settings
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.system_settings
    }
}

impl SettingsRecord for UserSetting {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.user_settings
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.user_settings
    }
}

impl SettingsRecord for ScanPath {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.scan_paths
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.scan_paths
    }
}

impl SettingsRecord for Profile {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.profiles
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.profiles
    }
}

impl SettingsRecord for QuickView {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.quick_views
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.quick_views
    }
}

impl SettingsRecord for UserFavorite {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.user_favorites
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.user_favorites
    }
}

impl SettingsRecord for UserHidden {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.user_hidden
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.user_hidden
    }
}

impl SettingsRecord for Trainer {
    fn records(store: &SettingsStore) -> &RecordSet<Self> {
        &store.trainers
    }

    fn records_mut(store: &mut SettingsStore) -> &mut RecordSet<Self> {
        &mut store.trainers
    }
}

/// In-memory copy of a settings database plus its connection.
///
/// Collections are empty while the store is closed.
#[derive(Debug)]
pub struct SettingsStore {
    connection: StoreConnection,
    error_log: ErrorLog,
    system_settings: RecordSet<SystemSetting>,
    user_settings: RecordSet<UserSetting>,
    scan_paths: RecordSet<ScanPath>,
    profiles: RecordSet<Profile>,
    quick_views: RecordSet<QuickView>,
    user_favorites: RecordSet<UserFavorite>,
    user_hidden: RecordSet<UserHidden>,
    trainers: RecordSet<Trainer>,
}

/// Freshly loaded settings tables, installed only when all of them load.
struct LoadedSettings {
    system_settings: Vec<SystemSetting>,
    user_settings: Vec<UserSetting>,
    scan_paths: Vec<ScanPath>,
    profiles: Vec<Profile>,
    quick_views: Vec<QuickView>,
    user_favorites: Vec<UserFavorite>,
    user_hidden: Vec<UserHidden>,
    trainers: Vec<Trainer>,
}

impl SettingsStore {
    pub fn new(options: StoreOptions, error_log: ErrorLog) -> Self {
        Self {
            connection: StoreConnection::new(StoreKind::Settings, options),
            error_log,
            system_settings: RecordSet::default(),
            user_settings: RecordSet::default(),
            scan_paths: RecordSet::default(),
            profiles: RecordSet::default(),
            quick_views: RecordSet::default(),
            user_favorites: RecordSet::default(),
            user_hidden: RecordSet::default(),
            trainers: RecordSet::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    pub fn path(&self) -> Option<&Path> {
        self.connection.path()
    }

    /// Open `path` and load all eight tables.
    ///
    /// If any table fails to load the connection is dropped and the store
    /// is left closed with empty collections.
    pub fn connect(&mut self, path: &Path) -> Result<(), StoreError> {
        let result = self.open_and_load(path);
        self.error_log.logged(result)
    }

    fn open_and_load(&mut self, path: &Path) -> Result<(), StoreError> {
        self.clear();
        self.connection.open(path)?;

        match self.load_tables() {
            Ok(loaded) => {
                self.system_settings = RecordSet::new(loaded.system_settings);
                self.user_settings = RecordSet::new(loaded.user_settings);
                self.scan_paths = RecordSet::new(loaded.scan_paths);
                self.profiles = RecordSet::new(loaded.profiles);
                self.quick_views = RecordSet::new(loaded.quick_views);
                self.user_favorites = RecordSet::new(loaded.user_favorites);
                self.user_hidden = RecordSet::new(loaded.user_hidden);
                self.trainers = RecordSet::new(loaded.trainers);
                log::info!(
                    "Loaded {} system settings, {} user settings, {} scan paths, {} profiles, \
                     {} quick views, {} favorites, {} hidden entries and {} trainers",
                    self.system_settings.len(),
                    self.user_settings.len(),
                    self.scan_paths.len(),
                    self.profiles.len(),
                    self.quick_views.len(),
                    self.user_favorites.len(),
                    self.user_hidden.len(),
                    self.trainers.len(),
                );
                Ok(())
            }
            Err(e) => {
                if let Err(close_err) = self.connection.close() {
                    log::warn!("{close_err}");
                }
                Err(e)
            }
        }
    }

    fn load_tables(&self) -> Result<LoadedSettings, StoreError> {
        Ok(LoadedSettings {
            system_settings: self.connection.load()?,
            user_settings: self.connection.load()?,
            scan_paths: self.connection.load()?,
            profiles: self.connection.load()?,
            quick_views: self.connection.load()?,
            user_favorites: self.connection.load()?,
            user_hidden: self.connection.load()?,
            trainers: self.connection.load()?,
        })
    }

    /// Close the connection and drop the loaded collections.
    pub fn close(&mut self) -> Result<(), StoreError> {
        let result = self.connection.close();
        if result.is_ok() {
            self.clear();
        }
        self.error_log.logged(result)
    }

    fn clear(&mut self) {
        self.system_settings.clear();
        self.user_settings.clear();
        self.scan_paths.clear();
        self.profiles.clear();
        self.quick_views.clear();
        self.user_favorites.clear();
        self.user_hidden.clear();
        self.trainers.clear();
    }

    pub fn system_settings(&self) -> &RecordSet<SystemSetting> {
        &self.system_settings
    }

    pub fn system_settings_mut(&mut self) -> &mut RecordSet<SystemSetting> {
        &mut self.system_settings
    }

    pub fn user_settings(&self) -> &RecordSet<UserSetting> {
        &self.user_settings
    }

    pub fn user_settings_mut(&mut self) -> &mut RecordSet<UserSetting> {
        &mut self.user_settings
    }

    pub fn scan_paths(&self) -> &RecordSet<ScanPath> {
        &self.scan_paths
    }

    pub fn scan_paths_mut(&mut self) -> &mut RecordSet<ScanPath> {
        &mut self.scan_paths
    }

    pub fn profiles(&self) -> &RecordSet<Profile> {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut RecordSet<Profile> {
        &mut self.profiles
    }

    pub fn quick_views(&self) -> &RecordSet<QuickView> {
        &self.quick_views
    }

    pub fn quick_views_mut(&mut self) -> &mut RecordSet<QuickView> {
        &mut self.quick_views
    }

    pub fn user_favorites(&self) -> &RecordSet<UserFavorite> {
        &self.user_favorites
    }

    pub fn user_favorites_mut(&mut self) -> &mut RecordSet<UserFavorite> {
        &mut self.user_favorites
    }

    pub fn user_hidden(&self) -> &RecordSet<UserHidden> {
        &self.user_hidden
    }

    pub fn user_hidden_mut(&mut self) -> &mut RecordSet<UserHidden> {
        &mut self.user_hidden
    }

    pub fn trainers(&self) -> &RecordSet<Trainer> {
        &self.trainers
    }

    pub fn trainers_mut(&mut self) -> &mut RecordSet<Trainer> {
        &mut self.trainers
    }

    pub fn records<T: SettingsRecord>(&self) -> &RecordSet<T> {
        T::records(self)
    }

    pub fn records_mut<T: SettingsRecord>(&mut self) -> &mut RecordSet<T> {
        T::records_mut(self)
    }

    /// Write every changed entity back in one transaction.
    ///
    /// Changed flags are cleared only after the commit succeeds; on
    /// failure nothing is written and every flag stays set.
    pub fn save(&mut self) -> Result<SaveReport, StoreError> {
        let result = self.flush();
        self.error_log.logged(result)
    }

    fn flush(&mut self) -> Result<SaveReport, StoreError> {
        if !self.is_open() {
            return Err(StoreError::NotOpen(StoreKind::Settings));
        }

        let mut batch = SqlBatch::new();
        self.system_settings.queue_updates(&mut batch);
        self.user_settings.queue_updates(&mut batch);
        self.scan_paths.queue_updates(&mut batch);
        self.profiles.queue_updates(&mut batch);
        self.quick_views.queue_updates(&mut batch);
        self.user_favorites.queue_updates(&mut batch);
        self.user_hidden.queue_updates(&mut batch);
        self.trainers.queue_updates(&mut batch);
        if batch.is_empty() {
            log::debug!("No settings changes to save");
            return Ok(SaveReport::default());
        }

        let rows_affected = self.connection.execute_batch(&batch)?;
        self.system_settings.mark_all_saved();
        self.user_settings.mark_all_saved();
        self.scan_paths.mark_all_saved();
        self.profiles.mark_all_saved();
        self.quick_views.mark_all_saved();
        self.user_favorites.mark_all_saved();
        self.user_hidden.mark_all_saved();
        self.trainers.mark_all_saved();

        log::info!(
            "Saved {} settings change(s), {rows_affected} row(s) affected",
            batch.len()
        );
        Ok(SaveReport {
            statements: batch.len(),
            rows_affected,
        })
    }

    /// Insert `item` and append it, carrying the store-assigned id.
    pub fn add<T: SettingsRecord>(&mut self, item: T) -> Result<i64, StoreError> {
        let result = self.connection.insert_record(&item);
        let stored = self.error_log.logged(result)?;
        let id = stored.id();
        T::records_mut(self).push(stored);
        Ok(id)
    }

    /// Delete the row with `id`, then drop it from memory.
    ///
    /// Returns the number of rows the DELETE removed.
    pub fn delete<T: SettingsRecord>(&mut self, id: i64) -> Result<usize, StoreError> {
        let result = self.connection.delete_record::<T>(id);
        let removed = self.error_log.logged(result)?;
        T::records_mut(self).remove(id);
        Ok(removed)
    }

    /// Replace the in-memory entity with the same id. Nothing is written
    /// until [`SettingsStore::save`].
    pub fn update<T: SettingsRecord>(&mut self, item: T) -> bool {
        T::records_mut(self).replace(item)
    }
}

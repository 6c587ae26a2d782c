//! The content database: `ContentItems` and `TitleUpdates`.

use std::path::Path;

use aurora_dbm_catalog::{ContentItem, Record, TitleUpdateItem};

use crate::error::StoreError;
use crate::error_log::ErrorLog;
use crate::record_set::RecordSet;
use crate::rows::TableRow;
use crate::statement::SqlBatch;
use crate::store::{SaveReport, StoreConnection, StoreKind, StoreOptions};

/// Entity types stored in the content database.
pub trait ContentRecord: Record<Row: TableRow> {
    fn records(store: &ContentStore) -> &RecordSet<Self>;
    fn records_mut(store: &mut ContentStore) -> &mut RecordSet<Self>;
}

impl ContentRecord for ContentItem {
    fn records(store: &ContentStore) -> &RecordSet<Self> {
        &store.content_items
    }

    fn records_mut(store: &mut ContentStore) -> &mut RecordSet<Self> {
        &mut store.content_items
    }
}

impl ContentRecord for TitleUpdateItem {
    fn records(store: &ContentStore) -> &RecordSet<Self> {
        &store.title_updates
    }

    fn records_mut(store: &mut ContentStore) -> &mut RecordSet<Self> {
        &mut store.title_updates
    }
}

/// In-memory copy of a content database plus its connection.
///
/// Collections are empty while the store is closed.
#[derive(Debug)]
pub struct ContentStore {
    connection: StoreConnection,
    error_log: ErrorLog,
    content_items: RecordSet<ContentItem>,
    title_updates: RecordSet<TitleUpdateItem>,
}

impl ContentStore {
    pub fn new(options: StoreOptions, error_log: ErrorLog) -> Self {
        Self {
            connection: StoreConnection::new(StoreKind::Content, options),
            error_log,
            content_items: RecordSet::default(),
            title_updates: RecordSet::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    pub fn path(&self) -> Option<&Path> {
        self.connection.path()
    }

    /// Open `path` and load both tables.
    ///
    /// If loading fails the connection is dropped and the store is left
    /// closed with empty collections.
    pub fn connect(&mut self, path: &Path) -> Result<(), StoreError> {
        let result = self.open_and_load(path);
        self.error_log.logged(result)
    }

    fn open_and_load(&mut self, path: &Path) -> Result<(), StoreError> {
        self.clear();
        self.connection.open(path)?;

        match self.load_tables() {
            Ok((items, updates)) => {
                self.content_items = RecordSet::new(items);
                self.title_updates = RecordSet::new(updates);
                log::info!(
                    "Loaded {} content items and {} title updates",
                    self.content_items.len(),
                    self.title_updates.len()
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

    fn load_tables(&self) -> Result<(Vec<ContentItem>, Vec<TitleUpdateItem>), StoreError> {
        Ok((self.connection.load()?, self.connection.load()?))
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
        self.content_items.clear();
        self.title_updates.clear();
    }

    pub fn content_items(&self) -> &RecordSet<ContentItem> {
        &self.content_items
    }

    pub fn content_items_mut(&mut self) -> &mut RecordSet<ContentItem> {
        &mut self.content_items
    }

    pub fn title_updates(&self) -> &RecordSet<TitleUpdateItem> {
        &self.title_updates
    }

    pub fn title_updates_mut(&mut self) -> &mut RecordSet<TitleUpdateItem> {
        &mut self.title_updates
    }

    pub fn records<T: ContentRecord>(&self) -> &RecordSet<T> {
        T::records(self)
    }

    pub fn records_mut<T: ContentRecord>(&mut self) -> &mut RecordSet<T> {
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
            return Err(StoreError::NotOpen(StoreKind::Content));
        }

        let mut batch = SqlBatch::new();
        self.content_items.queue_updates(&mut batch);
        self.title_updates.queue_updates(&mut batch);
        if batch.is_empty() {
            log::debug!("No content changes to save");
            return Ok(SaveReport::default());
        }

        let rows_affected = self.connection.execute_batch(&batch)?;
        self.content_items.mark_all_saved();
        self.title_updates.mark_all_saved();

        log::info!(
            "Saved {} content change(s), {rows_affected} row(s) affected",
            batch.len()
        );
        Ok(SaveReport {
            statements: batch.len(),
            rows_affected,
        })
    }

    /// Insert `item` and append it, carrying the store-assigned id.
    pub fn add<T: ContentRecord>(&mut self, item: T) -> Result<i64, StoreError> {
        let result = self.connection.insert_record(&item);
        let stored = self.error_log.logged(result)?;
        let id = stored.id();
        T::records_mut(self).push(stored);
        Ok(id)
    }

    /// Delete the row with `id`, then drop it from memory.
    ///
    /// Returns the number of rows the DELETE removed.
    pub fn delete<T: ContentRecord>(&mut self, id: i64) -> Result<usize, StoreError> {
        let result = self.connection.delete_record::<T>(id);
        let removed = self.error_log.logged(result)?;
        T::records_mut(self).remove(id);
        Ok(removed)
    }

    /// Replace the in-memory entity with the same id. Nothing is written
    /// until [`ContentStore::save`].
    pub fn update<T: ContentRecord>(&mut self, item: T) -> bool {
        T::records_mut(self).replace(item)
    }
}

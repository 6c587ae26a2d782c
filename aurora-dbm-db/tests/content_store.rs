use std::path::{Path, PathBuf};
use std::time::Duration;

use aurora_dbm_catalog::{ContentItem, ContentRow, Record, TitleUpdateItem};
use aurora_dbm_db::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn content_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");
    create_database(&path, StoreKind::Content).unwrap();
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "INSERT INTO ContentItems (Id, TitleName, TitleId, DiscNum, DiscsInSet, GameCapsOnline, GameCapsOffline, SystemLink)
             VALUES (1, 'Halo 3', 1297287142, 0, 2, 33619968, 0, 1);
         INSERT INTO ContentItems (Id, TitleName, TitleId, DiscNum, DiscsInSet, GameCapsOnline, GameCapsOffline, SystemLink)
             VALUES (2, 'Gears of War', 1297287074, 1, 1, 0, 0, 0);
         INSERT INTO TitleUpdates (Id, DisplayName, TitleId, Version, FileSize)
             VALUES (1, 'TU 5', 1297287142, 5, 4096);",
    )
    .unwrap();
    (dir, path)
}

fn store() -> ContentStore {
    ContentStore::new(StoreOptions::default(), ErrorLog::disabled())
}

fn scalar<T: rusqlite::types::FromSql>(path: &Path, sql: &str) -> T {
    let conn = Connection::open(path).unwrap();
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

/// Descriptors this process holds on `path`.
#[cfg(target_os = "linux")]
fn open_handles(path: &Path) -> usize {
    let target = path.canonicalize().unwrap();
    std::fs::read_dir("/proc/self/fd")
        .unwrap()
        .filter_map(|entry| std::fs::read_link(entry.ok()?.path()).ok())
        .filter(|link| *link == target)
        .count()
}

#[test]
fn connect_loads_both_tables_in_id_order() {
    let (_dir, path) = content_db();
    let mut store = store();
    assert!(!store.is_open());

    store.connect(&path).unwrap();
    assert!(store.is_open());
    assert_eq!(store.path(), Some(path.as_path()));

    let names: Vec<&str> = store.content_items().iter().map(|c| c.title_name()).collect();
    assert_eq!(names, ["Halo 3", "Gears of War"]);
    assert!(store.content_items().iter().all(|c| !c.is_changed()));

    let update = store.title_updates().get(1).unwrap();
    assert_eq!(update.display_name(), "TU 5");
    assert_eq!(update.file_size(), "4096");
    assert_eq!(update.title_id_hex(), "4D5307E6");
}

#[test]
fn stored_values_come_back_typed() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let halo = store.content_items().get(1).unwrap();
    assert_eq!(halo.title_id(), 0x4D53_07E6);
    assert!(halo.system_link());
    assert_eq!(halo.disc_num(), 1);
    assert_eq!(halo.discs_in_set(), 2);
    assert_eq!(halo.max_online_multiplayer_players(), 2);
    assert_eq!(halo.min_online_multiplayer_players(), 1);
    assert_eq!(halo.min_offline_players(), 1);
}

#[test]
fn missing_file_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    let mut store = store();

    let err = store.connect(&path).unwrap_err();
    assert!(matches!(err, StoreError::Connect { kind: StoreKind::Content, .. }));
    assert!(!store.is_open());
    assert!(!path.exists());
}

#[test]
fn non_database_file_fails_to_connect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");
    std::fs::write(&path, b"this is not a sqlite file, just some text padding it out").unwrap();

    let mut store = store();
    assert!(matches!(
        store.connect(&path),
        Err(StoreError::Connect { .. })
    ));
    assert!(!store.is_open());
}

#[test]
fn save_writes_only_changed_rows() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    store
        .content_items_mut()
        .get_mut(2)
        .unwrap()
        .set_title_name("Gears of War (Platinum Hits)");
    assert_eq!(store.content_items().changed().count(), 1);

    // A row edited behind the store's back stays as it is.
    Connection::open(&path)
        .unwrap()
        .execute("UPDATE ContentItems SET Publisher = 'elsewhere' WHERE Id = 1", [])
        .unwrap();

    let report = store.save().unwrap();
    assert_eq!(
        report,
        SaveReport {
            statements: 1,
            rows_affected: 1
        }
    );
    assert_eq!(store.content_items().changed().count(), 0);

    let name: String = scalar(&path, "SELECT TitleName FROM ContentItems WHERE Id = 2");
    assert_eq!(name, "Gears of War (Platinum Hits)");
    let publisher: String = scalar(&path, "SELECT Publisher FROM ContentItems WHERE Id = 1");
    assert_eq!(publisher, "elsewhere");
}

#[test]
fn save_with_no_changes_writes_nothing() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();
    assert_eq!(store.save().unwrap(), SaveReport::default());
}

#[test]
fn same_value_assignment_is_still_flushed() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let item = store.content_items_mut().get_mut(1).unwrap();
    let name = item.title_name().to_string();
    item.set_title_name(name);

    assert_eq!(store.save().unwrap().statements, 1);
}

#[test]
fn online_caps_edit_reaches_disk() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    store
        .content_items_mut()
        .get_mut(1)
        .unwrap()
        .set_max_online_multiplayer_players(4);
    store.save().unwrap();

    let word: i64 = scalar(&path, "SELECT GameCapsOnline FROM ContentItems WHERE Id = 1");
    assert_eq!(word, 0x0401_0000);
}

#[test]
fn raw_disc_values_survive_a_save() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    store
        .content_items_mut()
        .get_mut(1)
        .unwrap()
        .set_publisher("Microsoft");
    store.save().unwrap();

    let disc: i64 = scalar(&path, "SELECT DiscNum FROM ContentItems WHERE Id = 1");
    assert_eq!(disc, 0);
}

#[test]
fn failed_save_writes_nothing_and_keeps_flags() {
    let (dir, path) = content_db();
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_gears BEFORE UPDATE ON ContentItems
             WHEN OLD.Id = 2 BEGIN SELECT RAISE(ABORT, 'forced'); END;",
        )
        .unwrap();

    let log_path = dir.path().join("error.log");
    let mut store = ContentStore::new(StoreOptions::default(), ErrorLog::new(&log_path));
    store.connect(&path).unwrap();
    store.content_items_mut().get_mut(1).unwrap().set_title_name("changed 1");
    store.content_items_mut().get_mut(2).unwrap().set_title_name("changed 2");

    let err = store.save().unwrap_err();
    assert!(matches!(err, StoreError::Operation { .. }));

    let name: String = scalar(&path, "SELECT TitleName FROM ContentItems WHERE Id = 1");
    assert_eq!(name, "Halo 3");
    assert_eq!(store.content_items().changed().count(), 2);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("forced"));
}

#[test]
fn save_of_vanished_row_rolls_back() {
    let (dir, path) = content_db();
    let log_path = dir.path().join("error.log");
    let mut store = ContentStore::new(StoreOptions::default(), ErrorLog::new(&log_path));
    store.connect(&path).unwrap();

    Connection::open(&path)
        .unwrap()
        .execute("DELETE FROM ContentItems WHERE Id = 2", [])
        .unwrap();
    store.content_items_mut().get_mut(1).unwrap().set_title_name("changed 1");
    store.content_items_mut().get_mut(2).unwrap().set_title_name("changed 2");

    let err = store.save().unwrap_err();
    assert!(matches!(
        err,
        StoreError::RowNotFound {
            table: "ContentItems",
            id: 2
        }
    ));

    let name: String = scalar(&path, "SELECT TitleName FROM ContentItems WHERE Id = 1");
    assert_eq!(name, "Halo 3");
    assert_eq!(store.content_items().changed().count(), 2);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("Id=2"));
}

#[test]
fn replaced_collection_cannot_save_unknown_ids() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let mut stray = ContentItem::new(ContentRow {
        id: 99,
        ..Default::default()
    });
    stray.set_title_name("never inserted");
    *store.content_items_mut() = RecordSet::new(vec![stray]);

    assert!(matches!(
        store.save(),
        Err(StoreError::RowNotFound { id: 99, .. })
    ));
    let rows: i64 = scalar(&path, "SELECT COUNT(*) FROM ContentItems");
    assert_eq!(rows, 2);
}

#[test]
fn unreadable_disc_cell_is_rewritten_only_on_edit() {
    let (_dir, path) = content_db();
    Connection::open(&path)
        .unwrap()
        .execute("UPDATE ContentItems SET DiscNum = 'x' WHERE Id = 2", [])
        .unwrap();

    let mut store = store();
    store.connect(&path).unwrap();
    assert_eq!(store.content_items().get(2).unwrap().disc_num(), 1);

    store.content_items_mut().get_mut(1).unwrap().set_publisher("Microsoft");
    store.save().unwrap();
    let untouched: String = scalar(&path, "SELECT DiscNum FROM ContentItems WHERE Id = 2");
    assert_eq!(untouched, "x");

    store.content_items_mut().get_mut(2).unwrap().set_publisher("Epic");
    store.save().unwrap();
    let rewritten: i64 = scalar(&path, "SELECT DiscNum FROM ContentItems WHERE Id = 2");
    assert_eq!(rewritten, 1);
}

#[test]
fn add_returns_assigned_id() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let mut item = ContentItem::new(ContentRow {
        title_name: "Mass Effect".to_string(),
        discs_in_set: 1,
        ..ContentRow::default()
    });
    item.set_developer("BioWare");

    let id = store.add(item).unwrap();
    assert_eq!(id, 3);

    let added = store.content_items().get(id).unwrap();
    assert_eq!(added.title_name(), "Mass Effect");
    assert!(!added.is_changed());

    let developer: String = scalar(&path, "SELECT Developer FROM ContentItems WHERE Id = 3");
    assert_eq!(developer, "BioWare");
}

#[test]
fn delete_removes_row_and_entity() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    assert_eq!(store.delete::<ContentItem>(1).unwrap(), 1);
    let ids: Vec<i64> = store.content_items().iter().map(|c| c.id()).collect();
    assert_eq!(ids, [2]);

    let count: i64 = scalar(&path, "SELECT COUNT(*) FROM ContentItems");
    assert_eq!(count, 1);
}

#[test]
fn update_replaces_by_id_in_memory_only() {
    let (_dir, path) = content_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let mut replacement = store.title_updates().get(1).unwrap().clone();
    replacement.set_version(6);
    assert!(store.update(replacement));
    assert_eq!(store.title_updates().get(1).unwrap().version(), 6);

    let version: i64 = scalar(&path, "SELECT Version FROM TitleUpdates WHERE Id = 1");
    assert_eq!(version, 5);

    store.save().unwrap();
    let version: i64 = scalar(&path, "SELECT Version FROM TitleUpdates WHERE Id = 1");
    assert_eq!(version, 6);
}

#[test]
fn malformed_row_aborts_connect() {
    let (_dir, path) = content_db();
    Connection::open(&path)
        .unwrap()
        .execute("UPDATE ContentItems SET TitleId = 'not a number' WHERE Id = 2", [])
        .unwrap();

    let mut store = store();
    let err = store.connect(&path).unwrap_err();
    match err {
        StoreError::MalformedRecord { table, row_id, .. } => {
            assert_eq!(table, "ContentItems");
            assert_eq!(row_id, Some(2));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!store.is_open());
    assert!(store.content_items().is_empty());
}

#[test]
fn missing_table_aborts_connect() {
    let (_dir, path) = content_db();
    Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE TitleUpdates")
        .unwrap();

    let mut store = store();
    assert!(matches!(
        store.connect(&path),
        Err(StoreError::Load {
            table: "TitleUpdates",
            ..
        })
    ));
    assert!(!store.is_open());
    assert!(store.content_items().is_empty());
}

#[test]
fn close_drops_collections_and_blocks_writes() {
    let (_dir, path) = content_db();
    let mut store = ContentStore::new(
        StoreOptions {
            close_timeout: Duration::from_millis(200),
            ..StoreOptions::default()
        },
        ErrorLog::disabled(),
    );
    store.connect(&path).unwrap();
    store.close().unwrap();

    assert!(!store.is_open());
    assert!(store.content_items().is_empty());
    assert!(matches!(
        store.save(),
        Err(StoreError::NotOpen(StoreKind::Content))
    ));
    assert!(matches!(
        store.add(TitleUpdateItem::new(Default::default())),
        Err(StoreError::NotOpen(StoreKind::Content))
    ));

    // Closing twice is fine.
    store.close().unwrap();
    store.connect(&path).unwrap();
    assert_eq!(store.content_items().len(), 2);
}

#[test]
fn reconnect_replaces_previous_file() {
    let (_dir_a, path_a) = content_db();
    let (_dir_b, path_b) = content_db();
    Connection::open(&path_b)
        .unwrap()
        .execute("DELETE FROM ContentItems WHERE Id = 1", [])
        .unwrap();

    let mut store = store();
    store.connect(&path_a).unwrap();
    #[cfg(target_os = "linux")]
    assert!(open_handles(&path_a) > 0);
    store.content_items_mut().get_mut(1).unwrap().set_title_name("unsaved");

    store.connect(&path_b).unwrap();
    assert_eq!(store.path(), Some(path_b.as_path()));
    assert_eq!(store.content_items().len(), 1);
    assert_eq!(store.content_items().changed().count(), 0);
    #[cfg(target_os = "linux")]
    assert_eq!(open_handles(&path_a), 0);
    let name: String = scalar(&path_a, "SELECT TitleName FROM ContentItems WHERE Id = 1");
    assert_eq!(name, "Halo 3");
}

#[test]
fn lenient_cells_load() {
    let (_dir, path) = content_db();
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "INSERT INTO ContentItems (Id, TitleName, TitleId, DiscNum, DiscsInSet, LiveRating)
                 VALUES (10, NULL, '42', 'x', NULL, '3.5');",
        )
        .unwrap();

    let mut store = store();
    store.connect(&path).unwrap();
    let item = store.content_items().get(10).unwrap();
    assert_eq!(item.title_name(), "");
    assert_eq!(item.title_id(), 42);
    assert_eq!(item.disc_num(), 1);
    assert_eq!(item.discs_in_set(), 1);
    assert_eq!(item.live_rating(), 3.5);
}

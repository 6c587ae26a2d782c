use std::path::{Path, PathBuf};

use aurora_dbm_catalog::{
    Profile, QuickView, Record, UserFavorite, UserFavoriteRow, UserHidden, UserSetting,
};
use aurora_dbm_db::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn settings_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.db");
    create_database(&path, StoreKind::Settings).unwrap();
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "INSERT INTO SystemSettings (Id, Name, Value) VALUES (1, 'Language', 'en');
             INSERT INTO UserSettings (Id, Name, Value, ProfileId) VALUES (1, 'Theme', 'dark', 'E0000012');
             INSERT INTO ScanPaths (Id, Path, DeviceId, Depth, ScriptData, OptionsFlag)
                 VALUES (1, '\\Hdd1\\Games', 'DEV1', 2, '', 8589934593);
             INSERT INTO Profiles (Id, Gametag, Xuid) VALUES (1, 'MasterChief', 'E0000012');
             INSERT INTO QuickViews (Id, DisplayName, SortMethod, FilterMethod, Flags, CreatorXUID, OrderIndex, IconHash)
                 VALUES (1, 'All', 'Title', '', 0, '', 0, ''),
                        (2, 'Recent', 'DateAdded', '', 0, '', 1, ''),
                        (3, 'Arcade', 'Title', 'xbla', 0, '', 2, '');
             INSERT INTO UserFavorites (Id, ContentId, ProfileId) VALUES (1, 5, 'E0000012');
             INSERT INTO UserHidden (Id, ContentId, ProfileId) VALUES (1, 9, 'E0000012');
             INSERT INTO Trainers (Id, TitleId, MediaId, TrainerPath, TrainerName, TrainerVersion,
                                   TrainerData, TrainerInfo, TrainerAuthor, TrainerRating, TrainerFlags, CreatorXUID)
                 VALUES (1, '4D5307E6', '12345678', 'Hdd1:\\Trainers', 'Halo 3 +4', 2, '', '', 'someone', 5, 0, '');",
        )
        .unwrap();
    (dir, path)
}

fn store() -> SettingsStore {
    SettingsStore::new(StoreOptions::default(), ErrorLog::disabled())
}

fn scalar<T: rusqlite::types::FromSql>(path: &Path, sql: &str) -> T {
    let conn = Connection::open(path).unwrap();
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn connect_loads_all_eight_tables() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    assert_eq!(store.system_settings().get(1).unwrap().value(), "en");
    assert_eq!(store.user_settings().get(1).unwrap().profile_id(), "E0000012");
    assert_eq!(store.scan_paths().get(1).unwrap().options_flag(), 8_589_934_593);
    assert_eq!(store.profiles().get(1).unwrap().gametag(), "MasterChief");
    assert_eq!(store.quick_views().len(), 3);
    assert_eq!(store.user_favorites().get(1).unwrap().content_id(), 5);
    assert_eq!(store.user_hidden().get(1).unwrap().content_id(), 9);
    assert_eq!(store.trainers().get(1).unwrap().trainer_name(), "Halo 3 +4");
}

#[test]
fn quick_view_edit_is_saved() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let view = store.quick_views_mut().get_mut(3).unwrap();
    view.set_display_name("Arcade Games");
    view.set_order_index(0);

    let report = store.save().unwrap();
    assert_eq!(report.statements, 1);
    assert!(store.quick_views().iter().all(|v| !v.is_changed()));

    let name: String = scalar(&path, "SELECT DisplayName FROM QuickViews WHERE Id = 3");
    assert_eq!(name, "Arcade Games");
}

#[test]
fn one_batch_spans_every_table() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    store.system_settings_mut().get_mut(1).unwrap().set_value("fr");
    store.profiles_mut().get_mut(1).unwrap().set_gametag("Arbiter");
    store.trainers_mut().get_mut(1).unwrap().set_trainer_rating(4);

    let report = store.save().unwrap();
    assert_eq!(
        report,
        SaveReport {
            statements: 3,
            rows_affected: 3
        }
    );
    let gametag: String = scalar(&path, "SELECT Gametag FROM Profiles WHERE Id = 1");
    assert_eq!(gametag, "Arbiter");
}

#[test]
fn delete_quick_view_keeps_order() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    assert_eq!(store.delete::<QuickView>(2).unwrap(), 1);

    let ids: Vec<i64> = store.quick_views().iter().map(|v| v.id()).collect();
    assert_eq!(ids, [1, 3]);
    let on_disk: i64 = scalar(&path, "SELECT COUNT(*) FROM QuickViews WHERE Id = 2");
    assert_eq!(on_disk, 0);
    let remaining: i64 = scalar(&path, "SELECT COUNT(*) FROM QuickViews");
    assert_eq!(remaining, 2);
}

#[test]
fn delete_unknown_id_affects_nothing() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    assert_eq!(store.delete::<UserHidden>(42).unwrap(), 0);
    assert_eq!(store.user_hidden().len(), 1);
}

#[test]
fn added_favorite_gets_next_id() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    let favorite = UserFavorite::new(UserFavoriteRow {
        content_id: 7,
        profile_id: "E0000012".to_string(),
        ..Default::default()
    });
    let id = store.add(favorite).unwrap();
    assert_eq!(id, 2);
    assert_eq!(store.user_favorites().get(2).unwrap().content_id(), 7);

    let content_id: i64 = scalar(&path, "SELECT ContentId FROM UserFavorites WHERE Id = 2");
    assert_eq!(content_id, 7);
}

#[test]
fn scan_path_flag_keeps_all_64_bits() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    store
        .scan_paths_mut()
        .get_mut(1)
        .unwrap()
        .set_options_flag(i64::MIN + 1);
    store.save().unwrap();

    let flag: i64 = scalar(&path, "SELECT OptionsFlag FROM ScanPaths WHERE Id = 1");
    assert_eq!(flag, i64::MIN + 1);
}

#[test]
fn generic_access_routes_to_the_right_table() {
    let (_dir, path) = settings_db();
    let mut store = store();
    store.connect(&path).unwrap();

    assert_eq!(store.records::<Profile>().len(), 1);
    store
        .records_mut::<UserSetting>()
        .get_mut(1)
        .unwrap()
        .set_value("light");
    assert_eq!(store.user_settings().changed().count(), 1);
}

#[test]
fn malformed_settings_row_closes_store() {
    let (_dir, path) = settings_db();
    Connection::open(&path)
        .unwrap()
        .execute("UPDATE Trainers SET TrainerRating = x'01' WHERE Id = 1", [])
        .unwrap();

    let mut store = store();
    let err = store.connect(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MalformedRecord {
            table: "Trainers",
            row_id: Some(1),
            ..
        }
    ));
    assert!(!store.is_open());
    assert!(store.system_settings().is_empty());
}

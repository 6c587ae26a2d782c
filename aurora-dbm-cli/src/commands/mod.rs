pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod content;
pub(crate) mod examine;
pub(crate) mod init;
pub(crate) mod settings;
pub(crate) mod updates;

use aurora_dbm_db::DbManager;

use crate::CliError;
use crate::config::Resolved;

/// A manager wired to the run's error log and store options.
pub(crate) fn manager(resolved: &Resolved) -> DbManager {
    DbManager::new(resolved.options, resolved.error_log.clone())
}

pub(crate) fn open_content(resolved: &Resolved) -> Result<DbManager, CliError> {
    let mut db = manager(resolved);
    db.connect_to_content(&resolved.content)?;
    Ok(db)
}

pub(crate) fn open_settings(resolved: &Resolved) -> Result<DbManager, CliError> {
    let mut db = manager(resolved);
    db.connect_to_settings(&resolved.settings)?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use aurora_dbm_db::{ErrorLog, StoreOptions};

    use super::*;
    use crate::cli_types::{ContentField, SettingsKind};

    fn resolved_in(dir: &Path) -> Resolved {
        Resolved {
            content: dir.join("content.db"),
            content_source: crate::config::Source::Flag,
            settings: dir.join("settings.db"),
            settings_source: crate::config::Source::Flag,
            error_log: ErrorLog::new(dir.join("error.log")),
            options: StoreOptions::default(),
        }
    }

    #[test]
    fn init_then_add_and_delete_settings_rows() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolved_in(dir.path());
        init::run_init(&resolved).unwrap();
        assert!(init::run_init(&resolved).is_err());

        add::run_favorite_add(&resolved, "0x10", "E0001".to_string()).unwrap();
        add::run_quick_view_add(
            &resolved,
            add::QuickViewArgs {
                name: "Racing".to_string(),
                sort: "Title".to_string(),
                filter: String::new(),
                flags: "0x3".to_string(),
                order: 2,
                creator: String::new(),
            },
        )
        .unwrap();

        let db = open_settings(&resolved).unwrap();
        assert_eq!(db.user_favorites().get(1).unwrap().content_id(), 16);
        assert_eq!(db.quick_views().get(1).unwrap().flags(), 3);
        drop(db);

        settings::run_settings_delete(&resolved, SettingsKind::QuickViews, 1).unwrap();
        assert!(matches!(
            settings::run_settings_delete(&resolved, SettingsKind::QuickViews, 1),
            Err(CliError::NotFound { id: 1, .. })
        ));
    }

    #[test]
    fn content_set_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolved_in(dir.path());
        init::run_init(&resolved).unwrap();

        let mut db = open_content(&resolved).unwrap();
        db.add_content_item(aurora_dbm_catalog::ContentItem::new(Default::default()))
            .unwrap();
        db.close_content_db().unwrap();

        content::run_content_set(&resolved, 1, ContentField::TitleName, "Halo 3").unwrap();
        content::run_content_set(&resolved, 1, ContentField::OnlineMultiplayerMax, "16").unwrap();
        assert!(matches!(
            content::run_content_set(&resolved, 9, ContentField::TitleName, "x"),
            Err(CliError::NotFound { id: 9, .. })
        ));

        let db = open_content(&resolved).unwrap();
        let item = db.content_items().get(1).unwrap();
        assert_eq!(item.title_name(), "Halo 3");
        assert_eq!(item.max_online_multiplayer_players(), 16);
    }

    #[test]
    fn missing_database_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolved_in(dir.path());
        assert!(matches!(
            open_content(&resolved),
            Err(CliError::Database(_))
        ));
        assert!(!resolved.content.exists());
    }
}

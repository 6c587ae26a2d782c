use aurora_dbm_catalog::{
    Profile, QuickView, Record, ScanPath, SystemSetting, Trainer, UserFavorite, UserHidden,
    UserSetting,
};
use aurora_dbm_core::util::truncate_str;
use aurora_dbm_db::{DbManager, RecordSet};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::SettingsKind;
use crate::config::Resolved;

use super::open_settings;

const CELL_WIDTH: usize = 32;

/// Column headers and cell text for one settings table.
struct Table {
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Table {
    fn of<T: Record>(
        headers: &'static [&'static str],
        set: &RecordSet<T>,
        cells: impl Fn(&T) -> Vec<String>,
    ) -> Self {
        Self {
            headers,
            rows: set
                .iter()
                .map(|item| {
                    let mut row = vec![item.id().to_string()];
                    row.extend(cells(item));
                    row
                })
                .collect(),
        }
    }

    fn print(&self) {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or(0)
                    .min(CELL_WIDTH)
            })
            .collect();

        let line = |cells: Vec<String>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<w$}", truncate_str(c, *w), w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        log::info!(
            "{}",
            line(self.headers.iter().map(|h| h.to_string()).collect())
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for row in &self.rows {
            log::info!("{}", line(row.clone()));
        }
        crate::log_blank();
        log::info!("{} row(s)", self.rows.len());
    }
}

fn table_for(db: &DbManager, kind: SettingsKind) -> Table {
    match kind {
        SettingsKind::System => Table::of(&["Id", "Name", "Value"], db.system_settings(), |s| {
            vec![s.name().to_string(), s.value().to_string()]
        }),
        SettingsKind::User => Table::of(
            &["Id", "Profile", "Name", "Value"],
            db.user_settings(),
            |s| {
                vec![
                    s.profile_id().to_string(),
                    s.name().to_string(),
                    s.value().to_string(),
                ]
            },
        ),
        SettingsKind::ScanPaths => Table::of(
            &["Id", "Path", "Device", "Depth", "Options"],
            db.scan_paths(),
            |p| {
                vec![
                    p.path().to_string(),
                    p.device_id().to_string(),
                    p.depth().to_string(),
                    format!("0x{:X}", p.options_flag()),
                ]
            },
        ),
        SettingsKind::Profiles => Table::of(&["Id", "Gamertag", "XUID"], db.profiles(), |p| {
            vec![p.gametag().to_string(), p.xuid().to_string()]
        }),
        SettingsKind::QuickViews => Table::of(
            &["Id", "Name", "Sort", "Filter", "Flags", "Order", "Creator"],
            db.quick_views(),
            |q| {
                vec![
                    q.display_name().to_string(),
                    q.sort_method().to_string(),
                    q.filter_method().to_string(),
                    format!("0x{:X}", q.flags()),
                    q.order_index().to_string(),
                    q.creator_xuid().to_string(),
                ]
            },
        ),
        SettingsKind::Favorites => Table::of(
            &["Id", "Content", "Profile"],
            db.user_favorites(),
            |f| vec![f.content_id().to_string(), f.profile_id().to_string()],
        ),
        SettingsKind::Hidden => Table::of(&["Id", "Content", "Profile"], db.user_hidden(), |h| {
            vec![h.content_id().to_string(), h.profile_id().to_string()]
        }),
        SettingsKind::Trainers => Table::of(
            &["Id", "TitleId", "Name", "Version", "Author", "Rating"],
            db.trainers(),
            |t| {
                vec![
                    t.title_id().to_string(),
                    t.trainer_name().to_string(),
                    t.trainer_version().to_string(),
                    t.trainer_author().to_string(),
                    t.trainer_rating().to_string(),
                ]
            },
        ),
    }
}

fn kind_name(kind: SettingsKind) -> &'static str {
    match kind {
        SettingsKind::System => SystemSetting::KIND,
        SettingsKind::User => UserSetting::KIND,
        SettingsKind::ScanPaths => ScanPath::KIND,
        SettingsKind::Profiles => Profile::KIND,
        SettingsKind::QuickViews => QuickView::KIND,
        SettingsKind::Favorites => UserFavorite::KIND,
        SettingsKind::Hidden => UserHidden::KIND,
        SettingsKind::Trainers => Trainer::KIND,
    }
}

pub(crate) fn run_settings_list(resolved: &Resolved, kind: SettingsKind) -> Result<(), CliError> {
    let db = open_settings(resolved)?;
    table_for(&db, kind).print();
    Ok(())
}

pub(crate) fn run_settings_delete(
    resolved: &Resolved,
    kind: SettingsKind,
    id: i64,
) -> Result<(), CliError> {
    let mut db = open_settings(resolved)?;
    let deleted = match kind {
        SettingsKind::System => db.delete_system_setting(id)?,
        SettingsKind::User => db.delete_user_setting(id)?,
        SettingsKind::ScanPaths => db.delete_scan_path(id)?,
        SettingsKind::Profiles => db.delete_profile(id)?,
        SettingsKind::QuickViews => db.delete_quick_view(id)?,
        SettingsKind::Favorites => db.delete_user_favorite(id)?,
        SettingsKind::Hidden => db.delete_user_hidden(id)?,
        SettingsKind::Trainers => db.delete_trainer(id)?,
    };
    if deleted == 0 {
        return Err(CliError::NotFound {
            kind: kind_name(kind),
            id,
        });
    }
    log::info!(
        "  {} {} {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        kind_name(kind),
        id,
    );
    db.close_settings_db()?;
    Ok(())
}

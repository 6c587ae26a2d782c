use aurora_dbm_catalog::{
    QuickView, QuickViewRow, UserFavorite, UserFavoriteRow, UserHidden, UserHiddenRow,
};
use aurora_dbm_core::util::parse_id;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::Resolved;

use super::open_settings;

pub(crate) struct QuickViewArgs {
    pub name: String,
    pub sort: String,
    pub filter: String,
    pub flags: String,
    pub order: i32,
    pub creator: String,
}

pub(crate) fn run_quick_view_add(resolved: &Resolved, args: QuickViewArgs) -> Result<(), CliError> {
    let flags = parse_id(&args.flags).map_err(|e| CliError::invalid_value("flags", e))?;

    let mut db = open_settings(resolved)?;
    let id = db.add_quick_view(QuickView::new(QuickViewRow {
        display_name: args.name,
        sort_method: args.sort,
        filter_method: args.filter,
        flags,
        creator_xuid: args.creator,
        order_index: args.order,
        ..Default::default()
    }))?;
    report_added("quick view", id);
    db.close_settings_db()?;
    Ok(())
}

pub(crate) fn run_favorite_add(
    resolved: &Resolved,
    content_id: &str,
    profile_id: String,
) -> Result<(), CliError> {
    let content_id = parse_id(content_id).map_err(|e| CliError::invalid_value("content id", e))?;

    let mut db = open_settings(resolved)?;
    let id = db.add_user_favorite(UserFavorite::new(UserFavoriteRow {
        id: 0,
        content_id,
        profile_id,
    }))?;
    report_added("favorite", id);
    db.close_settings_db()?;
    Ok(())
}

pub(crate) fn run_hidden_add(
    resolved: &Resolved,
    content_id: &str,
    profile_id: String,
) -> Result<(), CliError> {
    let content_id = parse_id(content_id).map_err(|e| CliError::invalid_value("content id", e))?;

    let mut db = open_settings(resolved)?;
    let id = db.add_user_hidden(UserHidden::new(UserHiddenRow {
        id: 0,
        content_id,
        profile_id,
    }))?;
    report_added("hidden entry", id);
    db.close_settings_db()?;
    Ok(())
}

fn report_added(what: &str, id: i64) {
    log::info!(
        "  {} {} {}",
        "Added".if_supports_color(Stdout, |t| t.green()),
        what,
        format!("(id {id})").if_supports_color(Stdout, |t| t.cyan()),
    );
}

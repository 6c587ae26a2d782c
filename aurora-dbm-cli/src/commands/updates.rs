use aurora_dbm_catalog::{Record, TitleUpdateItem};
use aurora_dbm_core::util::truncate_str;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::Resolved;

use super::open_content;

pub(crate) fn run_updates_list(resolved: &Resolved) -> Result<(), CliError> {
    let db = open_content(resolved)?;

    log::info!(
        "{}",
        format!(
            "{:>5}  {:<8}  {:>7}  {:<32}  {:>10}  {}",
            "Id", "TitleId", "Version", "Name", "Size", "File"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for tu in db.title_update_items() {
        log::info!(
            "{:>5}  {:<8}  {:>7}  {:<32}  {:>10}  {}",
            tu.id(),
            tu.title_id_hex(),
            tu.version(),
            truncate_str(tu.display_name(), 32),
            tu.file_size(),
            tu.file_name().if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
    log::info!("{} title update(s)", db.title_update_items().len());
    Ok(())
}

pub(crate) fn run_updates_delete(resolved: &Resolved, id: i64) -> Result<(), CliError> {
    let mut db = open_content(resolved)?;
    if db.delete_title_update(id)? == 0 {
        return Err(CliError::NotFound {
            kind: TitleUpdateItem::KIND,
            id,
        });
    }
    log::info!(
        "  {} title update {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    db.close_content_db()?;
    Ok(())
}

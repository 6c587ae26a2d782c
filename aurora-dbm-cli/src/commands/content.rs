use aurora_dbm_catalog::{ContentItem, Record};
use aurora_dbm_core::util::{parse_hex_or_decimal, parse_id, truncate_str};
use aurora_dbm_core::{ContentGroup, ContentType, NumberParseError};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ContentField;
use crate::config::Resolved;

use super::open_content;

const NAME_WIDTH: usize = 36;

/// List content items, optionally filtered by title.
pub(crate) fn run_content_list(resolved: &Resolved, filter: Option<&str>) -> Result<(), CliError> {
    let db = open_content(resolved)?;
    let needle = filter.map(str::to_lowercase);

    let items: Vec<&ContentItem> = db
        .content_items()
        .iter()
        .filter(|item| match &needle {
            Some(n) => item.title_name().to_lowercase().contains(n),
            None => true,
        })
        .collect();

    log::info!(
        "{}",
        format!(
            "{:>5}  {:<8}  {:<width$}  {:<5}  {}",
            "Id",
            "TitleId",
            "Title",
            "Disc",
            "Directory",
            width = NAME_WIDTH
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for item in &items {
        log::info!(
            "{:>5}  {:<8}  {:<width$}  {:<5}  {}",
            item.id(),
            item.title_id_hex(),
            truncate_str(item.title_name(), NAME_WIDTH),
            item.disc_info(),
            item.directory().if_supports_color(Stdout, |t| t.dimmed()),
            width = NAME_WIDTH
        );
    }
    crate::log_blank();
    log::info!(
        "{} of {} item(s)",
        items.len(),
        db.content_items().len()
    );
    Ok(())
}

/// Show every field of one content item.
pub(crate) fn run_content_show(resolved: &Resolved, id: i64, json: bool) -> Result<(), CliError> {
    let db = open_content(resolved)?;
    let item = db.content_items().get(id).ok_or(CliError::NotFound {
        kind: ContentItem::KIND,
        id,
    })?;

    if json {
        let text = serde_json::to_string_pretty(item.row())
            .map_err(|e| CliError::other(format!("Failed to serialize item {id}: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    log::info!(
        "{} {}",
        item.title_name().if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", item.title_id_hex()).if_supports_color(Stdout, |t| t.cyan()),
    );
    let field = |name: &str, value: String| log::info!("  {:<22} {}", name, value);

    field("Id", item.id().to_string());
    field("Directory", item.directory().to_string());
    field("Executable", item.executable().to_string());
    field("Media id", format!("{:08X}", item.media_id() as u32));
    field("Base version", item.base_version().to_string());
    field("Disc", item.disc_info());
    field("Description", truncate_str(item.description(), 60));
    field("Publisher", item.publisher().to_string());
    field("Developer", item.developer().to_string());
    field("Release date", item.release_date().to_string());
    field(
        "Live rating",
        format!("{:.2} ({} raters)", item.live_rating(), item.live_raters()),
    );
    field("Genre flags", item.genre_flag().to_string());
    field("Content flags", item.content_flags().to_string());
    field("Game caps flags", item.game_caps_flags().to_string());
    field("File type", item.file_type().to_string());
    field("Content type", item.content_type().to_string());
    field(
        "Group",
        format!("{} (default {})", item.content_group(), item.default_group()),
    );
    field(
        "Date added",
        item.date_added().format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    field("System link", item.system_link().to_string());
    field("Scan path", item.scan_path_id().to_string());
    field("Hash", item.hash().to_string());

    crate::log_blank();
    log::info!("{}", "Players".if_supports_color(Stdout, |t| t.bold()));
    field("Online multiplayer", item.online_multiplayer_players().to_string());
    field("Online co-op", item.online_co_op_players().to_string());
    field("Offline", item.offline_players().to_string());
    field("Offline co-op", item.offline_co_op_players().to_string());
    field(
        "Offline system link",
        item.offline_system_link_players().to_string(),
    );
    Ok(())
}

/// Set one field of a content item and write it back.
pub(crate) fn run_content_set(
    resolved: &Resolved,
    id: i64,
    field: ContentField,
    value: &str,
) -> Result<(), CliError> {
    let mut db = open_content(resolved)?;
    let item = db
        .content_items_mut()
        .get_mut(id)
        .ok_or(CliError::NotFound {
            kind: ContentItem::KIND,
            id,
        })?;

    apply_field(item, field, value)?;

    let report = db.save_content_changes()?;
    log::debug!(
        "{} statement(s), {} row(s) affected",
        report.statements,
        report.rows_affected
    );
    log::info!(
        "  {} {} of item {}",
        "Updated".if_supports_color(Stdout, |t| t.green()),
        field_name(field),
        id,
    );
    db.close_content_db()?;
    Ok(())
}

/// Delete a content item.
pub(crate) fn run_content_delete(resolved: &Resolved, id: i64) -> Result<(), CliError> {
    let mut db = open_content(resolved)?;
    if db.delete_content_item(id)? == 0 {
        return Err(CliError::NotFound {
            kind: ContentItem::KIND,
            id,
        });
    }
    log::info!(
        "  {} content item {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    db.close_content_db()?;
    Ok(())
}

fn field_name(field: ContentField) -> String {
    field
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| format!("{field:?}"))
}

fn apply_field(item: &mut ContentItem, field: ContentField, value: &str) -> Result<(), CliError> {
    let name = field_name(field);
    let int = |v: &str| parse_id(v).map_err(|e| CliError::invalid_value(&name, e));
    let players = |v: &str| parse_players(v).map_err(|e| CliError::invalid_value(&name, e));

    match field {
        ContentField::TitleName => item.set_title_name(value),
        ContentField::Description => item.set_description(value),
        ContentField::Publisher => item.set_publisher(value),
        ContentField::Developer => item.set_developer(value),
        ContentField::ReleaseDate => item.set_release_date(value),
        ContentField::Directory => item.set_directory(value),
        ContentField::TitleId => item.set_title_id(int(value)?),
        ContentField::MediaId => item.set_media_id(int(value)?),
        ContentField::BaseVersion => item.set_base_version(int(value)?),
        ContentField::DiscNum => item.set_disc_num(int(value)?),
        ContentField::DiscsInSet => item.set_discs_in_set(int(value)?),
        ContentField::LiveRating => {
            let rating = parse_rating(value).ok_or_else(|| {
                CliError::invalid_value(&name, NumberParseError::Invalid(value.to_string()))
            })?;
            item.set_live_rating(rating);
        }
        ContentField::LiveRaters => item.set_live_raters(int(value)?),
        ContentField::GenreFlag => item.set_genre_flag(int(value)?.into()),
        ContentField::ContentFlags => item.set_content_flags(int(value)?.into()),
        ContentField::GameCapsFlags => item.set_game_caps_flags(int(value)?.into()),
        ContentField::ContentType => item.set_content_type(ContentType::new(int(value)?)),
        ContentField::ContentGroup => item.set_content_group(ContentGroup::new(int(value)?)),
        ContentField::DefaultGroup => item.set_default_group(ContentGroup::new(int(value)?)),
        ContentField::SystemLink => {
            let flag = parse_bool(value).ok_or_else(|| {
                CliError::invalid_value(&name, NumberParseError::Invalid(value.to_string()))
            })?;
            item.set_system_link(flag);
        }
        ContentField::OnlineMultiplayerMin => {
            item.set_min_online_multiplayer_players(players(value)?)
        }
        ContentField::OnlineMultiplayerMax => {
            item.set_max_online_multiplayer_players(players(value)?)
        }
        ContentField::OnlineCoOpMin => item.set_min_online_co_op_players(players(value)?),
        ContentField::OnlineCoOpMax => item.set_max_online_co_op_players(players(value)?),
        ContentField::OfflinePlayersMin => item.set_min_offline_players(players(value)?),
        ContentField::OfflinePlayersMax => item.set_max_offline_players(players(value)?),
        ContentField::OfflineCoOpMin => item.set_min_offline_co_op_players(players(value)?),
        ContentField::OfflineCoOpMax => item.set_max_offline_co_op_players(players(value)?),
        ContentField::OfflineSystemLink => {
            item.set_offline_system_link_players(players(value)?)
        }
    }
    Ok(())
}

/// A player count occupies one byte of a caps word.
fn parse_players(input: &str) -> Result<u8, NumberParseError> {
    let value = parse_hex_or_decimal(input)?;
    u8::try_from(value).map_err(|_| NumberParseError::OutOfRange {
        input: input.to_string(),
        bits: 8,
    })
}

/// A finite rating; NaN and infinities cannot be stored.
fn parse_rating(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

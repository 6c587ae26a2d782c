//! aurora-dbm CLI
//!
//! Command-line interface for inspecting and editing the Aurora dashboard's
//! content and settings databases.

mod cli_types;
mod commands;
mod config;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{
    Cli, Commands, ConfigAction, ContentAction, ProfileEntryAction, QuickViewAction,
    SettingsAction, UpdatesAction,
};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file = config::load_config_file()?;
    let resolved = config::resolve(
        &file,
        config::Overrides {
            content: cli.content,
            settings: cli.settings,
            error_log: cli.error_log,
        },
    );

    match cli.command {
        Commands::Init => commands::init::run_init(&resolved),
        Commands::Examine { path } => commands::examine::run_examine(&resolved, path),
        Commands::Content { action } => match action {
            ContentAction::List { filter } => {
                commands::content::run_content_list(&resolved, filter.as_deref())
            }
            ContentAction::Show { id, json } => {
                commands::content::run_content_show(&resolved, id, json)
            }
            ContentAction::Set { id, field, value } => {
                commands::content::run_content_set(&resolved, id, field, &value)
            }
            ContentAction::Delete { id } => commands::content::run_content_delete(&resolved, id),
        },
        Commands::Updates { action } => match action {
            UpdatesAction::List => commands::updates::run_updates_list(&resolved),
            UpdatesAction::Delete { id } => commands::updates::run_updates_delete(&resolved, id),
        },
        Commands::Settings { action } => match action {
            SettingsAction::List { kind } => commands::settings::run_settings_list(&resolved, kind),
            SettingsAction::Delete { kind, id } => {
                commands::settings::run_settings_delete(&resolved, kind, id)
            }
        },
        Commands::QuickView { action } => match action {
            QuickViewAction::Add {
                name,
                sort,
                filter,
                flags,
                order,
                creator,
            } => commands::add::run_quick_view_add(
                &resolved,
                commands::add::QuickViewArgs {
                    name,
                    sort,
                    filter,
                    flags,
                    order,
                    creator,
                },
            ),
        },
        Commands::Favorite { action } => match action {
            ProfileEntryAction::Add {
                content_id,
                profile_id,
            } => commands::add::run_favorite_add(&resolved, &content_id, profile_id),
        },
        Commands::Hidden { action } => match action {
            ProfileEntryAction::Add {
                content_id,
                profile_id,
            } => commands::add::run_hidden_add(&resolved, &content_id, profile_id),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&file, &resolved),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Install the logger. `info` lines are the command's normal output and are
/// printed bare; other levels carry a prefix. `RUST_LOG` refines the level.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            other => writeln!(buf, "[{}] {}", other, record.args()),
        })
        .init();
}

/// Print an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

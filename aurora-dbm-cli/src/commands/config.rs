use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{self, ConfigFile, Resolved};

/// Show the effective settings and where each came from.
pub(crate) fn run_config_show(file: &ConfigFile, resolved: &Resolved) -> Result<(), CliError> {
    log::info!(
        "{}",
        "aurora-dbm Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match config::config_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    log::info!(
        "  {:<14} {} {}",
        "content",
        resolved.content.display(),
        format!("({})", resolved.content_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<14} {} {}",
        "settings",
        resolved.settings.display(),
        format!("({})", resolved.settings_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    match resolved.error_log.path() {
        Some(p) => log::info!("  {:<14} {}", "error log", p.display()),
        None => log::info!(
            "  {:<14} {}",
            "error log",
            "disabled".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    log::info!(
        "  {:<14} {} ms{}",
        "close timeout",
        resolved.options.close_timeout.as_millis(),
        if file.store.close_timeout_ms.is_some() {
            ""
        } else {
            " (default)"
        },
    );

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config::config_path() {
        Some(p) => {
            println!("{}", p.display());
            Ok(())
        }
        None => Err(CliError::config("could not determine config directory")),
    }
}

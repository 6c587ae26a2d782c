use aurora_dbm_db::{StoreKind, create_database};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::Resolved;

/// Create empty content and settings databases at the configured paths.
///
/// Existing files are left alone and reported; the other file is still created.
pub(crate) fn run_init(resolved: &Resolved) -> Result<(), CliError> {
    let mut failures = 0;

    for (path, kind) in [
        (&resolved.content, StoreKind::Content),
        (&resolved.settings, StoreKind::Settings),
    ] {
        match create_database(path, kind) {
            Ok(()) => log::info!(
                "  {} {} database {}",
                "Created".if_supports_color(Stdout, |t| t.green()),
                kind,
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            ),
            Err(e) => {
                failures += 1;
                log::warn!("{e}");
            }
        }
    }

    if failures > 0 {
        return Err(CliError::other(format!(
            "{failures} database(s) were not created"
        )));
    }
    Ok(())
}

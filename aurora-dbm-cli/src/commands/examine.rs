use std::path::{Path, PathBuf};

use aurora_dbm_core::util::truncate_str;
use aurora_dbm_db::{ExamineReport, examine};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::Resolved;

const VALUE_WIDTH: usize = 40;

/// Summarize one file, or both configured databases when no path is given.
pub(crate) fn run_examine(resolved: &Resolved, path: Option<PathBuf>) -> Result<(), CliError> {
    let paths: Vec<&Path> = match &path {
        Some(p) => vec![p.as_path()],
        None => vec![resolved.content.as_path(), resolved.settings.as_path()],
    };

    for (i, path) in paths.into_iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        let report = examine(path)?;
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ExamineReport) {
    log::info!(
        "{} {}",
        "Database:".if_supports_color(Stdout, |t| t.bold()),
        report.path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Tables: {}", report.tables.join(", "));
    crate::log_blank();

    for table in &report.known {
        match table.row_count {
            None => log::info!(
                "  {:<16} {}",
                table.name,
                "(not present)".if_supports_color(Stdout, |t| t.dimmed()),
            ),
            Some(count) => {
                log::info!(
                    "  {:<16} {} row(s)",
                    table.name.if_supports_color(Stdout, |t| t.bold()),
                    count,
                );
                for (n, row) in table.sample.iter().enumerate() {
                    log::info!("    #{}", n + 1);
                    for (column, value) in row {
                        log::info!(
                            "      {:<20} {}",
                            column.if_supports_color(Stdout, |t| t.dimmed()),
                            truncate_str(value, VALUE_WIDTH),
                        );
                    }
                }
            }
        }
    }
}

//! Human-readable status lines for a run.

use std::io::{self, Write};

use colored::Colorize;

use cogito_core::{Direction, ReconcileConfig, Side, UserRecord};
use cogito_reconcile::{Action, LoadOutcome, RunReport, SideReport, SyncStatus};

const BIN: &str = "cogito-dbsync";

/// Title and resolved paths; printed before anything is read.
pub fn write_banner(out: &mut impl Write, config: &ReconcileConfig) -> io::Result<()> {
    writeln!(out, "{}", "=== Database Sync Tool ===".bold())?;
    writeln!(out)?;
    writeln!(out, "Local database: {}", config.local_path.display())?;
    writeln!(out, "Server database: {}", config.server_path.display())?;
    writeln!(out)
}

pub fn write_report(out: &mut impl Write, report: &RunReport) -> io::Result<()> {
    write_side_check(out, &report.local)?;
    writeln!(out)?;
    write_side_check(out, &report.server)?;
    writeln!(out)?;

    write_user_listing(out, &report.local)?;
    write_user_listing(out, &report.server)?;

    match &report.status {
        SyncStatus::InSync => {
            writeln!(out, "{}", "✓ Databases are in sync!".green())?;
        }
        SyncStatus::OutOfSync {
            comparison,
            empty_side,
            action,
        } => {
            writeln!(out, "{}", "⚠️  Databases are out of sync!".yellow())?;
            if let Some(side) = empty_side {
                writeln!(
                    out,
                    "{}",
                    format!(
                        "⚠️  {} database is empty but {} has users.",
                        side.title(),
                        side.other()
                    )
                    .yellow()
                )?;
            }
            writeln!(out)?;
            write_exclusive(out, Side::Local, &comparison.only_local)?;
            write_exclusive(out, Side::Server, &comparison.only_server)?;
            write_action(out, report, action)?;
        }
        SyncStatus::NothingToCompare => {
            writeln!(
                out,
                "{}",
                "Could not read both databases; nothing to compare.".yellow()
            )?;
        }
    }
    Ok(())
}

fn write_side_check(out: &mut impl Write, side: &SideReport) -> io::Result<()> {
    writeln!(out, "Checking {} database...", side.side)?;
    if !side.exists {
        writeln!(
            out,
            "  {} not found at {}",
            side.side.title(),
            side.path.display()
        )?;
    }
    if let LoadOutcome::Failed(err) = &side.load {
        writeln!(out, "{}", format!("✗ {err}").red())?;
    }
    writeln!(out, "{} users: {}", side.side.title(), side.load.users().len())
}

fn write_user_listing(out: &mut impl Write, side: &SideReport) -> io::Result<()> {
    let users = side.load.users();
    if users.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        format!("=== {} Database Users ===", side.side.title()).bold()
    )?;
    for u in users {
        writeln!(out, "  - {} ({}) [{}]", u.username, u.email, u.role)?;
    }
    writeln!(out)
}

fn write_exclusive(out: &mut impl Write, side: Side, users: &[UserRecord]) -> io::Result<()> {
    if users.is_empty() {
        return Ok(());
    }
    writeln!(out, "Users only in {side} database:")?;
    for u in users {
        writeln!(out, "  - {} ({})", u.username, u.email)?;
    }
    writeln!(out)
}

fn write_action(out: &mut impl Write, report: &RunReport, action: &Action) -> io::Result<()> {
    match action {
        Action::Suggested(directions) => write_suggestions(out, directions),
        Action::Refused {
            requested,
            suggestions,
        } => {
            let source = requested.source();
            let source_exists = match source {
                Side::Local => report.local.exists,
                Side::Server => report.server.exists,
            };
            let reason = if source_exists {
                "has no users"
            } else {
                "was not found"
            };
            writeln!(
                out,
                "{}",
                format!("✗ Not running {requested}: the {source} database {reason}.").red()
            )?;
            write_suggestions(out, suggestions)
        }
        Action::Copied {
            direction,
            from,
            to,
            ..
        } => {
            write_copying(out, *direction)?;
            writeln!(
                out,
                "{}",
                format!("✓ Copied database from {} to {}", from.display(), to.display()).green()
            )?;
            let dest = direction.destination();
            writeln!(
                out,
                "{}",
                format!(
                    "✓ Sync complete! {} database now matches {}.",
                    dest.title(),
                    dest.other()
                )
                .green()
            )
        }
        Action::CopyFailed {
            direction, error, ..
        } => {
            write_copying(out, *direction)?;
            writeln!(out, "{}", format!("✗ Error copying database: {error}").red())
        }
    }
}

fn write_copying(out: &mut impl Write, direction: Direction) -> io::Result<()> {
    writeln!(
        out,
        "Copying {} database to {}...",
        direction.source(),
        direction.destination()
    )
}

fn write_suggestions(out: &mut impl Write, directions: &[Direction]) -> io::Result<()> {
    if directions.is_empty() {
        return Ok(());
    }
    writeln!(out, "To sync databases, run:")?;
    for d in directions {
        writeln!(
            out,
            "  {BIN} {:<14} (copy {} → {})",
            d.as_arg(),
            d.source(),
            d.destination()
        )?;
    }
    Ok(())
}

//! cogito-dbsync: reconcile users between the local and server databases.
//!
//! # Usage
//!
//! ```text
//! cogito-dbsync                     report differences only
//! cogito-dbsync copy-to-local       replace the local database with the server one
//! cogito-dbsync copy-to-server      replace the server database with the local one
//! cogito-dbsync [MODE] --local <PATH> --server <PATH> [--json]
//! ```
//!
//! Paths default to `data/cogito.db` and `/opt/cogito/data/cogito.db`, and can
//! be overridden with `DB_PATH` / `SERVER_DB_PATH` or the flags above.

mod json;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cogito_core::{Direction, ReconcileConfig, StdFileSystem};
use cogito_reconcile::Reconciler;
use cogito_store::SqliteUserStore;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cogito-dbsync",
    version,
    about = "Compare users between the local and server Cogito databases",
    long_about = None,
)]
struct Cli {
    /// Copy direction: copy-to-local | copy-to-server. Omit to only report.
    #[arg(value_name = "MODE")]
    mode: Option<Direction>,

    /// Local database path (overrides $DB_PATH).
    #[arg(long, value_name = "PATH")]
    local: Option<PathBuf>,

    /// Server database path (overrides $SERVER_DB_PATH).
    #[arg(long, value_name = "PATH")]
    server: Option<PathBuf>,

    /// Emit the run report as JSON instead of status lines.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = ReconcileConfig::from_env().with_overrides(self.local, self.server);

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if !self.json {
            report::write_banner(&mut out, &config)?;
        }

        let reconciler = Reconciler::new(config, StdFileSystem, SqliteUserStore::new());
        let run = reconciler.run(self.mode).context("database sync failed")?;

        if self.json {
            json::write_report(&mut out, &run)?;
        } else {
            report::write_report(&mut out, &run)?;
        }
        out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    Cli::parse().run()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

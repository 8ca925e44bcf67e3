//! Binary entry point: resolve the store location, open it, then either
//! seed demonstration data or run the interactive menu.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use book_library::db::initialize;
use book_library::{run_seed, Config, Menu};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "book-library")]
#[command(about = "Manage a personal catalog of authors and books")]
#[command(version)]
struct Cli {
    /// SQLite file holding the catalog
    #[arg(long, global = true, env = "BOOK_LIBRARY_DB")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive menu (default)
    Menu,
    /// Insert the sample authors and books
    Seed,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.database)?;

    match cli.command.unwrap_or(Command::Menu) {
        Command::Seed => {
            let report = run_seed(config.db_path()).with_context(|| {
                format!("failed to seed {}", config.db_path().display())
            })?;
            println!(
                "Sample data added to the database ({} authors, {} books).",
                report.author_ids.len(),
                report.book_ids.len()
            );
        }
        Command::Menu => {
            let conn = initialize(config.db_path()).with_context(|| {
                format!("failed to open library at {}", config.db_path().display())
            })?;
            let stdout = io::stdout();
            let colored = stdout.is_terminal();
            let mut menu = Menu::new(conn, io::stdin().lock(), stdout.lock(), colored);
            menu.run()?;
        }
    }

    Ok(())
}

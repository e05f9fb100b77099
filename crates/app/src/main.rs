mod args;
mod commands;

use services::{AppServices, Clock, MEMORY_DB_URL};
use tracing_subscriber::EnvFilter;

use crate::args::{ArgsError, Args, Command};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  overlord [--db <url>] [--content <dir>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status                              progress overview (default)");
    eprintln!("  modules                             list modules with card progress");
    eprintln!("  read <module> <card>                show a study card and mark it read");
    eprintln!("  complete <module>                   mark a module complete");
    eprintln!("  quiz <module> [answer...]           show questions, or grade answers in order");
    eprintln!("  bookmark add <kind> <id> [title]    kinds: module, card, timeline, glossary");
    eprintln!("  bookmark rm <kind> <id>");
    eprintln!("  path <id|none>                      choose or clear a learning path");
    eprintln!("  french                              toggle the French perspective");
    eprintln!("  reset                               erase all progress");
    eprintln!("  glossary [query]                    search terms and definitions");
    eprintln!("  timeline [--category c] [--from d --to d] [--search q]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {}  ({MEMORY_DB_URL} for a throwaway store)", args::DEFAULT_DB_URL);
    eprintln!("  --content {}", args::DEFAULT_CONTENT_DIR);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DB_URL, STUDY_CONTENT_DIR, RUST_LOG");
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Create the database file and its parent directory so `SQLite` can open it.
fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == MEMORY_DB_URL || db_url.starts_with("sqlite::memory:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidValue {
            what: "--db value",
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidValue {
            what: "--db value",
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|e| {
            eprintln!("{e}");
            print_usage();
        })?;

    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new(&parsed.db_url, &parsed.content_dir, Clock::default_clock()).await?;
    commands::execute(&app, parsed.command).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

mod cli;
mod config;
mod countdown;
mod db;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    info!(
        "Using {} ({}), cache at {:?}",
        config.location.city().name,
        config.display.lang,
        db_path
    );

    match cli.command {
        Some(Commands::Times { at }) => {
            handlers::handle_times(&conn, &config, at)?;
        }
        Some(Commands::Calendar { year }) => {
            handlers::handle_calendar(&conn, &config, year)?;
        }
        Some(Commands::City { name }) => {
            handlers::handle_city(&mut config, name.as_deref())?;
        }
        Some(Commands::Lang { lang }) => {
            handlers::handle_lang(&mut config, &lang)?;
        }
        Some(Commands::Refresh) => {
            handlers::handle_refresh(&conn, &config)?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}

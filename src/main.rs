mod cli;
mod config;
mod db;
mod models;
mod tracking;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::{handlers, profile};
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = db::open(&db_path)?;

    match cli.command {
        Some(Commands::Setup { reset, profile: args }) => {
            profile::handle_setup(&conn, reset, &args)?;
        }
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }

        // Everything else needs a profile first
        Some(cmd) => {
            profile::ensure_profile(&conn)?;
            match cmd {
                Commands::Profile { profile: args } => {
                    profile::handle_profile(&conn, &args)?;
                }
                Commands::Add { name, fields } => {
                    handlers::handle_add(&conn, &config, &name, &fields)?;
                }
                Commands::Edit {
                    habit,
                    name,
                    fields,
                } => {
                    handlers::handle_edit(&conn, &config, &habit, name.as_deref(), &fields)?;
                }
                Commands::Delete { habit, yes } => {
                    handlers::handle_delete(&conn, &habit, yes)?;
                }
                Commands::List { date, all } => {
                    handlers::handle_list(&conn, &config, date.as_deref(), all)?;
                }
                Commands::Mark { habit, date, value } => {
                    handlers::handle_mark(&conn, &config.tracking, &habit, date.as_deref(), &value)?;
                }
                Commands::Show { habit } => {
                    handlers::handle_show(&conn, &config, &habit)?;
                }
                Commands::Stats {
                    range,
                    habit,
                    offset,
                } => {
                    handlers::handle_stats(&conn, &config, range, habit.as_deref(), offset)?;
                }
                Commands::Export { json } => {
                    handlers::handle_export(&conn, &config, json)?;
                }
                Commands::Setup { .. } | Commands::Config { .. } => unreachable!(),
            }
        }

        // No subcommand → today's habits
        None => {
            profile::ensure_profile(&conn)?;
            handlers::handle_list(&conn, &config, None, false)?;
        }
    }

    Ok(())
}

//! StallMap CLI
//!
//! Command-line interface for managing festival stalls and publishing maps

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stallmap_core::logging_facility::{init, init_with_filter};
use std::path::PathBuf;

mod commands;
mod config;

use commands::Context;
use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "stallmap")]
#[command(about = "StallMap - festival stall locations, menus and maps", long_about = None)]
struct Cli {
    /// Settings file (TOML); defaults to ./stallmap.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database file (overrides settings)
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Stall operations
    Stall(commands::stall::StallArgs),
    /// Product list operations
    Products(commands::products::ProductsArgs),
    /// Publish HTML maps
    Map(commands::map::MapArgs),
    /// Choose a coordinate on a map page
    Pick(commands::pick::PickArgs),
    /// List candidate stall sites
    Presets,
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(db) = cli.db {
        settings.database.path = db;
    }

    let profile = settings
        .logging_profile()
        .map_err(anyhow::Error::msg)?;
    match settings.logging.filter.as_deref() {
        Some(filter) => init_with_filter(profile, filter),
        None => init(profile),
    }

    let ctx = Context::new(settings);

    match cli.command {
        Commands::Init => commands::init::execute(&ctx),
        Commands::Stall(args) => commands::stall::execute(&ctx, args),
        Commands::Products(args) => commands::products::execute(&ctx, args),
        Commands::Map(args) => commands::map::execute(&ctx, args),
        Commands::Pick(args) => commands::pick::execute(&ctx, args),
        Commands::Presets => commands::presets::execute(),
        Commands::Seed(args) => commands::seed::execute(&ctx, args),
    }
}

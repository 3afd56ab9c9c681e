//! Map publishing commands
//!
//! Usage: stallmap map <visitor|preview> [--output FILE] [--cache-token TOKEN]

use clap::{Args, Subcommand};
use stallmap_core::render::MapMode;
use stallmap_engine::commands::publish::publish_map;
use std::path::PathBuf;

use super::Context;

#[derive(Debug, Args)]
pub struct MapArgs {
    #[command(subcommand)]
    pub command: MapCommand,
}

#[derive(Debug, Subcommand)]
pub enum MapCommand {
    /// Public map for visitors
    Visitor(PublishArgs),
    /// Operator map with stall ids, candidate sites and a coordinate readout
    Preview(PublishArgs),
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Output HTML file (defaults to the configured path)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Token appended to asset URLs; defaults to the current time in milliseconds
    #[arg(long)]
    pub cache_token: Option<String>,
}

/// Execute map command
pub fn execute(ctx: &Context, args: MapArgs) -> anyhow::Result<()> {
    match args.command {
        MapCommand::Visitor(args) => execute_publish(ctx, MapMode::Visitor, args),
        MapCommand::Preview(args) => execute_publish(ctx, MapMode::Preview, args),
    }
}

/// Time-based token so browsers refetch a regenerated page
pub fn default_cache_token() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn execute_publish(ctx: &Context, mode: MapMode, args: PublishArgs) -> anyhow::Result<()> {
    let settings = &ctx.settings;
    let options = settings
        .map_options(mode)?
        .with_cache_token(args.cache_token.unwrap_or_else(default_cache_token));
    let output = args
        .output
        .unwrap_or_else(|| settings.default_output(mode).to_path_buf());

    let repo = ctx.open_repo()?;
    let published = publish_map(&repo, &options, ctx.currency_unit(), &output)?;

    println!(
        "Wrote {} ({} stalls)",
        published.path.display(),
        published.stall_count
    );
    Ok(())
}

//! Seed import command
//!
//! Usage: stallmap seed import <PATH>

use clap::{Args, Subcommand};
use stallmap_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::PathBuf;

use super::Context;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file (or every .yaml/.yml file in a directory)
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(ctx: &Context, args: SeedArgs) -> anyhow::Result<()> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(ctx, import_args),
    }
}

fn execute_import(ctx: &Context, args: ImportArgs) -> anyhow::Result<()> {
    let mut repo = ctx.open_repo()?;

    let seed_files = if args.path.is_dir() {
        // Sorted for determinism
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let result =
            apply_engine_command(EngineCommand::ImportSeed { path: seed_file }, &mut repo)?;
        if let EngineCommandResult::SeedImported(import) = result {
            println!(
                "✓ Imported {} stalls (digest: {})",
                import.stall_ids.len(),
                import.digest
            );
        }
    }

    Ok(())
}

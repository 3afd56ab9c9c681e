//! Stall commands
//!
//! Usage: stallmap stall <add|list|show|move|edit|delete|clear> ...

use anyhow::bail;
use clap::{Args, Subcommand};
use stallmap_core::catalog::{to_display_record, DisplayStall};
use stallmap_core::model::{StallDraft, StallId, StallUpdate};
use stallmap_engine::commands::stall::list_display_stalls;
use stallmap_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::input::{CoordinateArgs, ProductArgs};
use super::Context;

#[derive(Debug, Args)]
pub struct StallArgs {
    #[command(subcommand)]
    pub command: StallCommand,
}

#[derive(Debug, Subcommand)]
pub enum StallCommand {
    /// Register a new stall
    Add(AddArgs),
    /// List all stalls with their menus
    List(ListArgs),
    /// Show one stall
    Show(ShowArgs),
    /// Move a stall
    Move(MoveArgs),
    /// Replace a stall's name, position and description (and optionally menu)
    Edit(EditArgs),
    /// Delete a stall and its products
    Delete(IdArg),
    /// Delete every stall
    Clear(ClearArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Stall name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub position: CoordinateArgs,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub products: ProductArgs,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: i64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    pub id: i64,

    #[command(flatten)]
    pub position: CoordinateArgs,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i64,

    /// New stall name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub position: CoordinateArgs,

    /// New description; omitted clears it
    #[arg(long)]
    pub description: Option<String>,

    #[command(flatten)]
    pub products: ProductArgs,
}

#[derive(Debug, Args)]
pub struct IdArg {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm deletion of every stall
    #[arg(long)]
    pub yes: bool,
}

/// Execute stall command
pub fn execute(ctx: &Context, args: StallArgs) -> anyhow::Result<()> {
    match args.command {
        StallCommand::Add(args) => execute_add(ctx, args),
        StallCommand::List(args) => execute_list(ctx, args),
        StallCommand::Show(args) => execute_show(ctx, args),
        StallCommand::Move(args) => execute_move(ctx, args),
        StallCommand::Edit(args) => execute_edit(ctx, args),
        StallCommand::Delete(args) => execute_delete(ctx, args),
        StallCommand::Clear(args) => execute_clear(ctx, args),
    }
}

fn execute_add(ctx: &Context, args: AddArgs) -> anyhow::Result<()> {
    let (latitude, longitude) = args.position.resolve()?;
    let products = args
        .products
        .resolve(ctx.currency_unit())?
        .unwrap_or_default();

    let draft = StallDraft {
        name: args.name,
        latitude,
        longitude,
        description: args.description,
        products,
    };

    let mut repo = ctx.open_repo()?;
    if let EngineCommandResult::Registered(id) =
        apply_engine_command(EngineCommand::RegisterStall { draft }, &mut repo)?
    {
        let stall = repo.get_stall_by_id(id)?;
        println!("Registered stall {}: {} ({})", id, stall.name, stall.coordinate);
    }
    Ok(())
}

fn execute_list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repo()?;
    let records = list_display_stalls(&repo, ctx.currency_unit())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No stalls registered.");
        return Ok(());
    }
    for record in &records {
        print_record(record);
    }
    Ok(())
}

fn execute_show(ctx: &Context, args: ShowArgs) -> anyhow::Result<()> {
    let repo = ctx.open_repo()?;
    let stall = repo.get_stall_by_id(StallId(args.id))?;
    let record = to_display_record(&stall, ctx.currency_unit());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn execute_move(ctx: &Context, args: MoveArgs) -> anyhow::Result<()> {
    let (latitude, longitude) = args.position.resolve()?;
    let stall_id = StallId(args.id);

    let mut repo = ctx.open_repo()?;
    apply_engine_command(
        EngineCommand::MoveStall {
            stall_id,
            latitude,
            longitude,
        },
        &mut repo,
    )?;

    let stall = repo.get_stall_by_id(stall_id)?;
    println!("Moved stall {} to {}", stall_id, stall.coordinate);
    Ok(())
}

fn execute_edit(ctx: &Context, args: EditArgs) -> anyhow::Result<()> {
    let (latitude, longitude) = args.position.resolve()?;
    let products = args.products.resolve(ctx.currency_unit())?;
    let stall_id = StallId(args.id);

    let update = StallUpdate {
        name: args.name,
        latitude,
        longitude,
        description: args.description,
    };

    let mut repo = ctx.open_repo()?;
    apply_engine_command(
        EngineCommand::EditStall {
            stall_id,
            update,
            products,
        },
        &mut repo,
    )?;

    println!("Updated stall {}", stall_id);
    Ok(())
}

fn execute_delete(ctx: &Context, args: IdArg) -> anyhow::Result<()> {
    let stall_id = StallId(args.id);
    let mut repo = ctx.open_repo()?;

    match apply_engine_command(EngineCommand::RemoveStall { stall_id }, &mut repo)? {
        EngineCommandResult::Removed { removed: true, .. } => {
            println!("Deleted stall {}", stall_id)
        }
        _ => println!("Stall {} not found; nothing deleted", stall_id),
    }
    Ok(())
}

fn execute_clear(ctx: &Context, args: ClearArgs) -> anyhow::Result<()> {
    if !args.yes {
        bail!("refusing to delete every stall without --yes");
    }

    let mut repo = ctx.open_repo()?;
    if let EngineCommandResult::Cleared { count } =
        apply_engine_command(EngineCommand::ClearStalls, &mut repo)?
    {
        println!("Deleted {} stalls", count);
    }
    Ok(())
}

fn print_record(record: &DisplayStall) {
    println!("[{}] {} ({})", record.id, record.name, record.coordinate_label());
    if let Some(description) = record.description_text() {
        println!("    {}", description);
    }
    for product in &record.products {
        println!("    - {}", product.label);
    }
}

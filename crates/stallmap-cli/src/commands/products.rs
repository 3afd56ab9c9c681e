//! Product list commands
//!
//! Usage: stallmap products set <ID> (--product NAME:PRICE)... | --products-file FILE

use anyhow::bail;
use clap::{Args, Subcommand};
use stallmap_core::model::StallId;
use stallmap_engine::{apply_engine_command, EngineCommand};

use super::input::ProductArgs;
use super::Context;

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Replace a stall's whole menu
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    pub id: i64,

    #[command(flatten)]
    pub products: ProductArgs,
}

/// Execute products command
pub fn execute(ctx: &Context, args: ProductsArgs) -> anyhow::Result<()> {
    match args.command {
        ProductsCommand::Set(args) => execute_set(ctx, args),
    }
}

fn execute_set(ctx: &Context, args: SetArgs) -> anyhow::Result<()> {
    let Some(products) = args.products.resolve(ctx.currency_unit())? else {
        bail!("provide --product or --products-file");
    };
    let stall_id = StallId(args.id);
    let count = products.len();

    let mut repo = ctx.open_repo()?;
    apply_engine_command(EngineCommand::SetProducts { stall_id, products }, &mut repo)?;

    println!("Stall {} now lists {} products", stall_id, count);
    Ok(())
}

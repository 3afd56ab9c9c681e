//! Database initialization command
//!
//! Usage: stallmap init

use super::Context;
use stallmap_store::migrations::applied_migrations;

pub fn execute(ctx: &Context) -> anyhow::Result<()> {
    let repo = ctx.open_repo()?;
    let migrations = applied_migrations(repo.connection())?;

    println!(
        "Initialized {} ({} migrations, {} stalls)",
        ctx.settings.database.path.display(),
        migrations.len(),
        repo.count_stalls()?
    );
    Ok(())
}

//! Interactive coordinate picking
//!
//! Usage: stallmap pick [--stall ID] [--page FILE]
//!
//! Writes a map page, then waits for the `lat,lng` pair copied from it to be
//! pasted on stdin. With `--stall` the chosen position is applied to that stall.

use anyhow::Context as _;
use clap::Args;
use stallmap_core::model::StallId;
use stallmap_core::picker::{pick_from_reader, spawn_picker, PickOutcome};
use stallmap_core::render::{render_picker_page, MapMode};
use stallmap_engine::commands::stall::apply_pick;
use std::io::Write;
use std::path::PathBuf;

use super::map::default_cache_token;
use super::Context;

#[derive(Debug, Args)]
pub struct PickArgs {
    /// Move this stall to the chosen position
    #[arg(long)]
    pub stall: Option<i64>,

    /// Keep the picker page at this path instead of a temporary file
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,
}

pub fn execute(ctx: &Context, args: PickArgs) -> anyhow::Result<()> {
    let mut repo = match args.stall {
        Some(id) => {
            let repo = ctx.open_repo()?;
            // Fail before any interaction when the stall is unknown.
            repo.get_stall_by_id(StallId(id))?;
            Some(repo)
        }
        None => None,
    };

    let view = ctx.settings.map_view(MapMode::Preview)?;
    let html = render_picker_page(&view, Some(&default_cache_token()));

    // Removed on drop unless --page was given.
    let mut temp_page = None;
    let page_path = match args.page {
        Some(path) => {
            std::fs::write(&path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            path
        }
        None => {
            let mut file = tempfile::Builder::new()
                .prefix("stallmap-picker-")
                .suffix(".html")
                .tempfile()?;
            file.write_all(html.as_bytes())?;
            let path = file.path().to_path_buf();
            temp_page = Some(file);
            path
        }
    };

    eprintln!("Open {} in a browser and click the position.", page_path.display());
    eprintln!("Paste the copied \"lat,lng\" here (blank line cancels):");

    let handle = spawn_picker(|reply| pick_from_reader(std::io::stdin().lock(), reply));
    let outcome = handle.wait();
    drop(temp_page);

    match (args.stall, repo.as_mut()) {
        (Some(id), Some(repo)) => match apply_pick(repo, StallId(id), outcome)? {
            Some(coordinate) => println!("Moved stall {} to {}", id, coordinate),
            None => println!("Selection cancelled"),
        },
        _ => match outcome {
            PickOutcome::Selected(coordinate) => println!("{}", coordinate.to_pair()),
            PickOutcome::Cancelled => println!("Selection cancelled"),
        },
    }
    Ok(())
}

//! Map publishing: read the store, render, write the HTML artifact.

use serde::Serialize;
use stallmap_core::presets::builtin_presets;
use stallmap_core::render::{render_map, MapMode, MapOptions};
use stallmap_core::{log_op_end, log_op_error, log_op_start};
use stallmap_store::errors::{io_error, Result};
use stallmap_store::StallRepo;
use std::path::{Path, PathBuf};

use crate::commands::stall::list_display_stalls;

/// A written map file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedMap {
    pub path: PathBuf,
    pub stall_count: usize,
}

/// Render the current stalls into an HTML document
///
/// Preview maps also draw the built-in candidate sites.
///
/// ## Errors
///
/// - `Storage`: reading stalls failed
/// - `Serialization`: marker data could not be encoded
pub fn render_stall_map(
    repo: &StallRepo,
    options: &MapOptions,
    currency_unit: &str,
) -> Result<String> {
    let stalls = list_display_stalls(repo, currency_unit)?;
    let presets = match options.mode {
        MapMode::Preview => builtin_presets(),
        MapMode::Visitor => Vec::new(),
    };
    Ok(render_map(options, &stalls, &presets)?)
}

/// Render the map and write it to `output`
///
/// ## Errors
///
/// - `Storage`: reading stalls failed
/// - `Io`: the file could not be written
pub fn publish_map(
    repo: &StallRepo,
    options: &MapOptions,
    currency_unit: &str,
    output: &Path,
) -> Result<PublishedMap> {
    let started = log_op_start!("publish_map", mode = ?options.mode);

    let result = publish_map_impl(repo, options, currency_unit, output).map_err(|e| {
        log_op_error!("publish_map", started, e.clone());
        e
    })?;

    log_op_end!("publish_map", started, stall_count = result.stall_count);

    Ok(result)
}

fn publish_map_impl(
    repo: &StallRepo,
    options: &MapOptions,
    currency_unit: &str,
    output: &Path,
) -> Result<PublishedMap> {
    let html = render_stall_map(repo, options, currency_unit)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("publish_map", e))?;
        }
    }
    std::fs::write(output, html).map_err(|e| io_error("publish_map", e))?;

    Ok(PublishedMap {
        path: output.to_path_buf(),
        stall_count: repo.count_stalls()?,
    })
}

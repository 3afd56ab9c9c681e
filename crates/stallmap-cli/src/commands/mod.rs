//! Subcommand implementations
//!
//! Each module exposes its clap arguments and an `execute` entry point.

use anyhow::Context as _;
use stallmap_store::StallRepo;

use crate::config::Settings;

pub mod init;
pub mod input;
pub mod map;
pub mod pick;
pub mod presets;
pub mod products;
pub mod seed;
pub mod stall;

/// Resolved settings shared by every subcommand
pub struct Context {
    pub settings: Settings,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Open the configured database, migrating it if needed
    pub fn open_repo(&self) -> anyhow::Result<StallRepo> {
        let path = &self.settings.database.path;
        StallRepo::open(path).with_context(|| format!("failed to open database {}", path.display()))
    }

    pub fn currency_unit(&self) -> &str {
        &self.settings.map.currency_unit
    }
}

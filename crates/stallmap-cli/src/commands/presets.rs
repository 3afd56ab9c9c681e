//! Candidate site listing
//!
//! Usage: stallmap presets

use stallmap_core::presets::builtin_presets;

pub fn execute() -> anyhow::Result<()> {
    for preset in builtin_presets() {
        println!(
            "{}\t{}\t{}",
            preset.name,
            preset.coordinate.to_pair(),
            preset.description
        );
    }
    Ok(())
}

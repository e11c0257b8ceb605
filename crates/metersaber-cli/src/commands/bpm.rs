//! Print a song's declared tempo.

use std::path::Path;

use anyhow::{Context, Result};
use metersaber_core::SongManifest;

pub fn run(song: &Path) -> Result<()> {
    let manifest_path = SongManifest::locate(song)?;
    let bpm = SongManifest::load(&manifest_path)?
        .bpm()
        .with_context(|| format!("song info {} declares no usable tempo", manifest_path.display()))?;
    println!("{}", bpm);
    Ok(())
}

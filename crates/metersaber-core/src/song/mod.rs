//! Song files: the `info.json` manifest and per-difficulty beatmaps.

mod beatmap;
mod manifest;

pub use beatmap::*;
pub use manifest::*;

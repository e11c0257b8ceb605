pub mod config;
pub mod convert;
pub mod error;
pub mod song;
pub mod tempo;

pub use config::ConversionDefaults;
pub use convert::{
    ConversionReport, ConvertOptions, EntryReport, convert, convert_with, retime_beatmap,
};
pub use error::{Error, Result};
pub use song::{
    Beatmap, DifficultyEntry, MANIFEST_FILE_NAME, Note, Obstacle, SongManifest,
    load_bpm_from_folder,
};
pub use tempo::{Bpm, Ratio, TempoChange, rescale, rescale_with_offset};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Song info not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Invalid song info {}: {source}", path.display())]
    ManifestInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Beatmap for difficulty {difficulty} not found: {}", path.display())]
    BeatmapNotFound { difficulty: String, path: PathBuf },

    #[error("Invalid beatmap for difficulty {difficulty} ({}): {source}", path.display())]
    BeatmapInvalid {
        difficulty: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Beatmap reference of difficulty {difficulty} escapes the song folder: {reference}")]
    InvalidBeatmapReference {
        difficulty: String,
        reference: String,
    },

    #[error("Invalid tempo: {0} (must be a finite number > 0)")]
    InvalidTempo(f64),

    #[error("Invalid tempo ratio: {0}")]
    InvalidRatio(String),

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

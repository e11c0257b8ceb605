use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::tempo::Bpm;

/// File name of the song-level descriptor inside a song folder.
pub const MANIFEST_FILE_NAME: &str = "info.json";

/// Song-level descriptor (`info.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongManifest {
    pub song_name: String,
    pub song_sub_name: String,
    pub author_name: String,
    pub beats_per_minute: f64,
    pub preview_start_time: f64,
    pub preview_duration: f64,
    pub cover_image_path: String,
    pub environment_name: String,
    pub difficulty_levels: Vec<DifficultyEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One difficulty declared by a [`SongManifest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DifficultyEntry {
    pub difficulty: String,
    pub difficulty_rank: i32,
    pub audio_path: String,
    pub json_path: String,
    /// Audio lead-in correction in milliseconds, independent of tempo.
    pub offset: i32,
    pub old_offset: i32,
    /// Per-difficulty tempo, present in some manifest variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beats_per_minute: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SongManifest {
    /// Resolve a song location to its `info.json` path.
    ///
    /// `location` may be the song folder or the `info.json` file itself.
    pub fn locate<P: AsRef<Path>>(location: P) -> Result<PathBuf> {
        let location = location.as_ref();
        if location.is_dir() {
            let path = location.join(MANIFEST_FILE_NAME);
            if !path.is_file() {
                return Err(Error::ManifestNotFound { path });
            }
            return Ok(path);
        }
        let named_info = location.file_name().is_some_and(|n| n == MANIFEST_FILE_NAME);
        if !named_info || !location.is_file() {
            return Err(Error::ManifestNotFound {
                path: location.to_path_buf(),
            });
        }
        Ok(location.to_path_buf())
    }

    /// Load the manifest from an `info.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Self::parse(&content).map_err(|source| Error::ManifestInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Declared song tempo.
    pub fn bpm(&self) -> Result<Bpm> {
        Bpm::new(self.beats_per_minute)
    }
}

impl DifficultyEntry {
    /// The beatmap reference as a validated relative path.
    ///
    /// Only plain file and folder names are accepted so the reference can be
    /// mirrored under any output folder without escaping it.
    pub fn relative_path(&self) -> Result<PathBuf> {
        let reference = Path::new(&self.json_path);
        let valid = !self.json_path.is_empty()
            && reference
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !valid {
            return Err(Error::InvalidBeatmapReference {
                difficulty: self.difficulty.clone(),
                reference: self.json_path.clone(),
            });
        }
        Ok(reference.to_path_buf())
    }
}

/// Load the declared tempo from the `info.json` inside `folder`.
pub fn load_bpm_from_folder<P: AsRef<Path>>(folder: P) -> Result<Bpm> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(Error::ManifestNotFound {
            path: folder.join(MANIFEST_FILE_NAME),
        });
    }
    SongManifest::load(folder.join(MANIFEST_FILE_NAME))?.bpm()
}

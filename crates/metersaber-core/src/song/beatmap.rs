use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// One difficulty's note and obstacle timeline, keyed by beat-time.
///
/// Only the tempo and the beat-times are interpreted. Layout metadata is kept
/// as the raw JSON numbers it was read as, and events are never parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    #[serde(rename = "_version", skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
    #[serde(rename = "_beatsPerMinute", default)]
    pub beats_per_minute: f64,
    #[serde(rename = "_beatsPerBar", skip_serializing_if = "Option::is_none", default)]
    pub beats_per_bar: Option<Number>,
    #[serde(rename = "_noteJumpSpeed", skip_serializing_if = "Option::is_none", default)]
    pub note_jump_speed: Option<Number>,
    #[serde(rename = "_shuffle", skip_serializing_if = "Option::is_none", default)]
    pub shuffle: Option<Number>,
    #[serde(rename = "_shufflePeriod", skip_serializing_if = "Option::is_none", default)]
    pub shuffle_period: Option<Number>,
    #[serde(rename = "_events", skip_serializing_if = "Option::is_none", default)]
    pub events: Option<Vec<Value>>,
    #[serde(rename = "_notes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<Vec<Note>>,
    #[serde(rename = "_obstacles", skip_serializing_if = "Option::is_none", default)]
    pub obstacles: Option<Vec<Obstacle>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_time")]
    pub time: f64,
    #[serde(rename = "_lineIndex")]
    pub line_index: i64,
    #[serde(rename = "_lineLayer")]
    pub line_layer: i64,
    #[serde(rename = "_type")]
    pub kind: i64,
    #[serde(rename = "_cutDirection")]
    pub cut_direction: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(rename = "_time")]
    pub time: f64,
    #[serde(rename = "_lineIndex")]
    pub line_index: i64,
    #[serde(rename = "_type")]
    pub kind: i64,
    /// Length in beats.
    #[serde(rename = "_duration")]
    pub duration: f64,
    #[serde(rename = "_width")]
    pub width: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Beatmap {
    /// Load the beatmap of `difficulty` from `path`.
    pub fn load<P: AsRef<Path>>(path: P, difficulty: &str) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::BeatmapNotFound {
                difficulty: difficulty.to_string(),
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        serde_json::from_str(&content).map_err(|source| Error::BeatmapInvalid {
            difficulty: difficulty.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_deref().unwrap_or_default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_deref().unwrap_or_default()
    }

    /// Serialize to `writer`, compact unless `pretty` is set.
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }
}

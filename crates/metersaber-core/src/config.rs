//! Persisted conversion defaults.
//!
//! Front-ends may remember the inputs of the last successful conversion and
//! offer them again on the next start. The value is loaded and saved
//! explicitly; nothing in the conversion itself reads it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionDefaults {
    pub song: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub source_bpm: Option<f64>,
    pub target_bpm: Option<f64>,
    pub saved_at: Option<DateTime<Utc>>,
}

impl ConversionDefaults {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))
    }

    /// Stamp and write the defaults, creating the parent folder if needed.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.saved_at = Some(Utc::now());
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

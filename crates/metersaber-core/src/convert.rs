//! Song-wide tempo conversion.
//!
//! Conversion runs in three phases:
//! 1. Load the manifest and every beatmap, retiming each in memory.
//! 2. Serialize every retimed beatmap into a temporary file next to its destination.
//! 3. Persist all temporary files into place.
//!
//! A failure in phase 1 or 2 leaves the output folder without any new beatmap.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::song::{Beatmap, DifficultyEntry, SongManifest};
use crate::tempo::TempoChange;

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Write pretty-printed JSON instead of compact JSON.
    pub pretty: bool,
}

/// Summary of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub output_dir: PathBuf,
    pub change: TempoChange,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryReport {
    pub difficulty: String,
    pub path: PathBuf,
    pub notes: usize,
    pub obstacles: usize,
}

struct StagedEntry {
    report: EntryReport,
    relative_path: PathBuf,
    beatmap: Beatmap,
}

/// Convert every difficulty of the song at `song` from `source_bpm` to
/// `target_bpm`, writing the retimed beatmaps under `output`.
///
/// `song` may be the song folder or its `info.json`.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    song: P,
    output: Q,
    source_bpm: f64,
    target_bpm: f64,
) -> Result<ConversionReport> {
    let change = TempoChange::from_raw(source_bpm, target_bpm)?;
    convert_with(song, output, change, &ConvertOptions::default())
}

/// [`convert`] with an already validated tempo pair and explicit options.
pub fn convert_with<P: AsRef<Path>, Q: AsRef<Path>>(
    song: P,
    output: Q,
    change: TempoChange,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let output = output.as_ref();
    let manifest_path = SongManifest::locate(song)?;
    let song_dir = manifest_path.parent().unwrap_or(Path::new("."));
    let manifest = SongManifest::load(&manifest_path)?;

    info!(
        "Converting {} difficulties of {:?} from {} to {} BPM",
        manifest.difficulty_levels.len(),
        manifest.song_name,
        change.source,
        change.target
    );

    let staged = manifest
        .difficulty_levels
        .iter()
        .map(|entry| stage_entry(song_dir, output, entry, &change))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(output).map_err(|e| Error::write(output, e))?;

    let mut pending = Vec::with_capacity(staged.len());
    for entry in &staged {
        let dest = output.join(&entry.relative_path);
        let file = write_temp(&dest, &entry.beatmap, options.pretty)?;
        pending.push((file, dest));
    }

    for (file, dest) in pending {
        file.persist(&dest)
            .map_err(|e| Error::write(&dest, e.error))?;
        debug!("Wrote {:?}", dest);
    }

    info!("New beatmaps are in {:?}", output);

    Ok(ConversionReport {
        output_dir: output.to_path_buf(),
        change,
        entries: staged.into_iter().map(|s| s.report).collect(),
    })
}

fn stage_entry(
    song_dir: &Path,
    output: &Path,
    entry: &DifficultyEntry,
    change: &TempoChange,
) -> Result<StagedEntry> {
    let relative_path = entry.relative_path()?;
    let mut beatmap = Beatmap::load(song_dir.join(&relative_path), &entry.difficulty)?;

    if let Some(declared) = entry.beats_per_minute
        && declared != change.source.get()
    {
        warn!(
            "{} declares {} BPM but is converted from {} BPM",
            entry.difficulty, declared, change.source
        );
    }

    retime_beatmap(&mut beatmap, change, entry.offset);
    debug!(
        "Retimed {} ({} notes, {} obstacles, offset {} ms)",
        entry.difficulty,
        beatmap.notes().len(),
        beatmap.obstacles().len(),
        entry.offset
    );

    Ok(StagedEntry {
        report: EntryReport {
            difficulty: entry.difficulty.clone(),
            path: output.join(&relative_path),
            notes: beatmap.notes().len(),
            obstacles: beatmap.obstacles().len(),
        },
        relative_path,
        beatmap,
    })
}

/// Retime every note and obstacle of `beatmap` and declare the target tempo.
///
/// Positions keep `offset_ms` fixed in real time; obstacle durations are spans
/// and scale without it.
pub fn retime_beatmap(beatmap: &mut Beatmap, change: &TempoChange, offset_ms: i32) {
    for note in beatmap.notes.iter_mut().flatten() {
        note.time = change.position(note.time, offset_ms);
    }
    for obstacle in beatmap.obstacles.iter_mut().flatten() {
        obstacle.time = change.position(obstacle.time, offset_ms);
        obstacle.duration = change.span(obstacle.duration);
    }
    beatmap.beats_per_minute = change.target.get();
}

fn write_temp(dest: &Path, beatmap: &Beatmap, pretty: bool) -> Result<NamedTempFile> {
    let dir = dest.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| Error::write(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::write(dest, e))?;
    let mut writer = BufWriter::new(file.as_file_mut());
    beatmap
        .write_json(&mut writer, pretty)
        .map_err(|e| Error::write(dest, e.into()))?;
    writer.flush().map_err(|e| Error::write(dest, e))?;
    drop(writer);

    Ok(file)
}

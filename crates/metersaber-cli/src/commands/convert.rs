//! Convert command: gather the conversion inputs and run the pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use metersaber_core::{
    Bpm, ConversionDefaults, ConvertOptions, SongManifest, TempoChange, convert_with,
    load_bpm_from_folder,
};
use tracing::{info, warn};

use crate::cli::ConvertArgs;

/// Fully resolved conversion inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub song: PathBuf,
    pub output: PathBuf,
    pub change: TempoChange,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let mut defaults = match &args.defaults {
        Some(path) if path.exists() => match ConversionDefaults::load(path) {
            Ok(d) => {
                info!("Loaded defaults from {:?}", path);
                d
            }
            Err(e) => {
                warn!("Failed to load defaults: {}, ignoring them", e);
                ConversionDefaults::default()
            }
        },
        _ => ConversionDefaults::default(),
    };

    let inputs = resolve(&args, &defaults)?;
    let options = ConvertOptions { pretty: args.pretty };

    let report = convert_with(&inputs.song, &inputs.output, inputs.change, &options)
        .with_context(|| format!("failed to convert {}", inputs.song.display()))?;

    for entry in &report.entries {
        println!(
            "{}: {} notes, {} obstacles -> {}",
            entry.difficulty,
            entry.notes,
            entry.obstacles,
            entry.path.display()
        );
    }
    println!("new beatmaps are in {}", report.output_dir.display());

    if let Some(path) = &args.defaults
        && !args.no_save_defaults
    {
        defaults.song = Some(inputs.song);
        defaults.output = Some(inputs.output);
        defaults.source_bpm = Some(inputs.change.source.get());
        defaults.target_bpm = Some(inputs.change.target.get());
        if let Err(e) = defaults.save(path) {
            warn!("Failed to save defaults: {}", e);
        }
    }

    Ok(())
}

/// Combine command-line values, stored defaults and the song files.
///
/// Command-line values always win. A missing source tempo is read from the
/// song's info.json; a missing target tempo comes from `--ratio`, then from an
/// info.json already present in the output folder. Stored tempos are the last
/// resort.
pub fn resolve(args: &ConvertArgs, defaults: &ConversionDefaults) -> Result<Inputs> {
    let Some(song) = args.song.clone().or_else(|| defaults.song.clone()) else {
        bail!("no song given (use --song)");
    };
    let Some(output) = args.output.clone().or_else(|| defaults.output.clone()) else {
        bail!("no output folder given (use --output)");
    };
    if same_folder(&song, &output) {
        bail!("output folder must differ from the song folder");
    }

    let source = match args.source_bpm {
        Some(bpm) => Bpm::new(bpm).context("invalid source BPM")?,
        None => song_bpm(&song).or_else(|e| match defaults.source_bpm {
            Some(bpm) => {
                warn!("{:#}, using stored source BPM {}", e, bpm);
                Bpm::new(bpm).context("invalid stored source BPM")
            }
            None => Err(e),
        })?,
    };

    let target = match (args.target_bpm, args.ratio) {
        (Some(bpm), _) => Bpm::new(bpm).context("invalid target BPM")?,
        (None, Some(ratio)) => source.scale(ratio).context("invalid tempo ratio")?,
        (None, None) => match load_bpm_from_folder(&output) {
            Ok(bpm) => bpm,
            Err(e) => match defaults.target_bpm {
                Some(bpm) => Bpm::new(bpm).context("invalid stored target BPM")?,
                None => {
                    return Err(e).context("no target BPM given (use --target-bpm or --ratio)");
                }
            },
        },
    };

    Ok(Inputs {
        song,
        output,
        change: TempoChange::new(source, target),
    })
}

fn song_bpm(song: &Path) -> Result<Bpm> {
    let manifest_path = SongManifest::locate(song)?;
    SongManifest::load(&manifest_path)?
        .bpm()
        .with_context(|| format!("no source BPM in {}", manifest_path.display()))
}

fn same_folder(song: &Path, output: &Path) -> bool {
    let song_dir = if song.is_file() {
        song.parent().unwrap_or(song)
    } else {
        song
    };
    match (song_dir.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metersaber_core::Ratio;
    use std::fs;
    use tempfile::TempDir;

    fn args(song: Option<PathBuf>, output: Option<PathBuf>) -> ConvertArgs {
        ConvertArgs {
            song,
            output,
            source_bpm: None,
            target_bpm: None,
            ratio: None,
            pretty: false,
            defaults: None,
            no_save_defaults: false,
        }
    }

    fn song_folder(bpm: f64) -> TempDir {
        let temp = TempDir::new().unwrap();
        let info = format!(r#"{{"beatsPerMinute": {bpm}, "difficultyLevels": []}}"#);
        fs::write(temp.path().join("info.json"), info).unwrap();
        temp
    }

    #[test]
    fn test_explicit_values_win() {
        let song = song_folder(100.0);
        let mut a = args(Some(song.path().into()), Some("out".into()));
        a.source_bpm = Some(90.0);
        a.target_bpm = Some(180.0);
        let defaults = ConversionDefaults {
            source_bpm: Some(1.0),
            target_bpm: Some(2.0),
            ..Default::default()
        };

        let inputs = resolve(&a, &defaults).unwrap();
        assert_eq!(inputs.change, TempoChange::from_raw(90.0, 180.0).unwrap());
        assert_eq!(inputs.output, PathBuf::from("out"));
    }

    #[test]
    fn test_source_from_song_and_ratio() {
        let song = song_folder(100.0);
        let mut a = args(Some(song.path().into()), Some("out".into()));
        a.ratio = Some(Ratio::new(3, 2).unwrap());

        let inputs = resolve(&a, &ConversionDefaults::default()).unwrap();
        assert_eq!(inputs.change.source.get(), 100.0);
        assert_eq!(inputs.change.target.get(), 150.0);
    }

    #[test]
    fn test_target_from_output_folder() {
        let song = song_folder(100.0);
        let output = song_folder(140.0);
        let a = args(Some(song.path().into()), Some(output.path().into()));

        let inputs = resolve(&a, &ConversionDefaults::default()).unwrap();
        assert_eq!(inputs.change.target.get(), 140.0);
    }

    #[test]
    fn test_paths_from_defaults() {
        let song = song_folder(120.0);
        let defaults = ConversionDefaults {
            song: Some(song.path().into()),
            output: Some("stored-out".into()),
            target_bpm: Some(60.0),
            ..Default::default()
        };

        let inputs = resolve(&args(None, None), &defaults).unwrap();
        assert_eq!(inputs.song, song.path());
        assert_eq!(inputs.output, PathBuf::from("stored-out"));
        assert_eq!(inputs.change, TempoChange::from_raw(120.0, 60.0).unwrap());
    }

    #[test]
    fn test_missing_inputs() {
        let defaults = ConversionDefaults::default();
        assert!(resolve(&args(None, Some("out".into())), &defaults).is_err());
        assert!(resolve(&args(Some("song".into()), None), &defaults).is_err());

        let song = song_folder(120.0);
        let a = args(Some(song.path().into()), Some("no-such-output".into()));
        assert!(resolve(&a, &defaults).is_err());
    }

    #[test]
    fn test_rejects_non_positive_bpm() {
        let song = song_folder(120.0);
        let mut a = args(Some(song.path().into()), Some("out".into()));
        a.target_bpm = Some(0.0);
        assert!(resolve(&a, &ConversionDefaults::default()).is_err());
    }

    #[test]
    fn test_rejects_in_place_output() {
        let song = song_folder(120.0);
        let mut a = args(Some(song.path().into()), Some(song.path().into()));
        a.target_bpm = Some(150.0);
        assert!(resolve(&a, &ConversionDefaults::default()).is_err());
    }
}

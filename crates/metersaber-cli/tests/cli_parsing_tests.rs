//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without touching any song files.

use std::path::PathBuf;

use clap::Parser;
use metersaber_core::Ratio;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "metersaber")]
struct Args {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Convert {
        #[arg(long)]
        song: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        source_bpm: Option<f64>,
        #[arg(long, conflicts_with = "ratio")]
        target_bpm: Option<f64>,
        #[arg(long)]
        ratio: Option<Ratio>,
        #[arg(long)]
        pretty: bool,
        #[arg(long)]
        defaults: Option<PathBuf>,
        #[arg(long)]
        no_save_defaults: bool,
    },
    Bpm {
        song: PathBuf,
    },
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Args::try_parse_from(["metersaber"]).is_err());
}

#[test]
fn test_parse_convert_full() {
    let args = Args::try_parse_from([
        "metersaber",
        "convert",
        "--song",
        "songs/test/info.json",
        "-o",
        "songs/test-fast",
        "--source-bpm",
        "120",
        "--target-bpm",
        "180.5",
        "--pretty",
    ])
    .unwrap();
    assert!(!args.verbose);
    match args.command {
        Command::Convert {
            song,
            output,
            source_bpm,
            target_bpm,
            ratio,
            pretty,
            defaults,
            no_save_defaults,
        } => {
            assert_eq!(song, Some(PathBuf::from("songs/test/info.json")));
            assert_eq!(output, Some(PathBuf::from("songs/test-fast")));
            assert_eq!(source_bpm, Some(120.0));
            assert_eq!(target_bpm, Some(180.5));
            assert!(ratio.is_none());
            assert!(pretty);
            assert!(defaults.is_none());
            assert!(!no_save_defaults);
        }
        _ => panic!("Expected Convert command"),
    }
}

#[test]
fn test_parse_convert_ratio() {
    let args =
        Args::try_parse_from(["metersaber", "convert", "--ratio", "3/2", "--verbose"]).unwrap();
    assert!(args.verbose);
    match args.command {
        Command::Convert { ratio, .. } => {
            assert_eq!(ratio, Some(Ratio::new(3, 2).unwrap()));
        }
        _ => panic!("Expected Convert command"),
    }
}

#[test]
fn test_parse_ratio_conflicts_with_target() {
    let result = Args::try_parse_from([
        "metersaber",
        "convert",
        "--ratio",
        "2",
        "--target-bpm",
        "240",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_invalid_ratio() {
    assert!(Args::try_parse_from(["metersaber", "convert", "--ratio", "3/0"]).is_err());
    assert!(Args::try_parse_from(["metersaber", "convert", "--ratio", "fast"]).is_err());
}

#[test]
fn test_parse_invalid_bpm() {
    assert!(Args::try_parse_from(["metersaber", "convert", "--source-bpm", "quick"]).is_err());
}

#[test]
fn test_parse_bpm() {
    let args = Args::try_parse_from(["metersaber", "bpm", "songs/test"]).unwrap();
    match args.command {
        Command::Bpm { song } => assert_eq!(song, PathBuf::from("songs/test")),
        _ => panic!("Expected Bpm command"),
    }
}

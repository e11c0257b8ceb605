//! CLI argument definitions for metersaber.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use metersaber_core::Ratio;

#[derive(Parser)]
#[command(name = "metersaber")]
#[command(about = "Retime beatmaps for a new song tempo", version)]
pub struct Args {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert every difficulty of a song to a new tempo
    Convert(ConvertArgs),
    /// Print the tempo declared in a song's info.json
    Bpm {
        /// Song folder or its info.json
        song: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Song folder or its info.json
    #[arg(long, value_name = "PATH")]
    pub song: Option<PathBuf>,

    /// Folder receiving the converted beatmaps
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Tempo the beatmaps are written at (defaults to the song's info.json)
    #[arg(long, value_name = "BPM")]
    pub source_bpm: Option<f64>,

    /// New tempo (defaults to the output folder's info.json)
    #[arg(long, value_name = "BPM", conflicts_with = "ratio")]
    pub target_bpm: Option<f64>,

    /// Derive the new tempo from the source tempo, e.g. 3/2
    #[arg(long, value_name = "N/D")]
    pub ratio: Option<Ratio>,

    /// Write pretty-printed JSON
    #[arg(long)]
    pub pretty: bool,

    /// File remembering the inputs of the last successful conversion
    #[arg(long, value_name = "FILE", env = "METERSABER_DEFAULTS")]
    pub defaults: Option<PathBuf>,

    /// Do not update the defaults file after converting
    #[arg(long)]
    pub no_save_defaults: bool,
}

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(args.verbose)));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Convert(convert_args) => commands::convert::run(convert_args),
        Command::Bpm { song } => commands::bpm::run(&song),
    }
}

/// Directives used when RUST_LOG is unset. Binary events are targeted by the
/// binary name (`metersaber`), not the package name.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "metersaber=debug,metersaber_core=debug"
    } else {
        "metersaber=info,metersaber_core=info"
    }
}

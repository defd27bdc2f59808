// Modosaurus CLI entry point.
//
// Prints every scale (on every tonic) that contains all the given notes,
// one per line: `<tonic> <scale name>: <scale notes>`.
//
// Usage:
//   modosaurus <NOTE>...        e.g. `modosaurus C E G`
//   modosaurus -v | --version
//
// Unrecognised notes are ignored (a warning goes to stderr). Set
// MODOSAURUS_CATALOG to a JSON file to search a different set of scales,
// and RUST_LOG to change log verbosity.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use modosaurus::config::Config;
use modosaurus::find_matches;
use std::io::{BufWriter, Write};
use tracing_subscriber::EnvFilter;

/// A tool to match groups of notes to possible scales.
#[derive(Parser, Debug)]
#[command(name = "modosaurus", version, disable_version_flag = true)]
struct Args {
    /// A note (e.g. Ab, E, F#)
    #[arg(value_name = "NOTE", required = true, num_args = 1..)]
    notes: Vec<String>,

    /// Print version
    #[allow(dead_code)]
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let catalog = config.load_catalog().with_context(|| match &config.catalog_path {
        Some(path) => format!("loading scale catalog from {}", path.display()),
        None => "loading built-in scale catalog".to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for scale_match in find_matches(&catalog, &args.notes) {
        writeln!(out, "{scale_match}")?;
    }
    out.flush()?;
    Ok(())
}

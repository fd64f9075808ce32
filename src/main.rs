//! codekg CLI - walk a codebase, report fact counts, optionally emit JSON.
//!
//! The binary is the thin front door: extraction lives in the library, and
//! the `--json` output is the handoff artifact for the external graph
//! ingestion layer.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use codekg::CodebaseWalker;

/// Extract declaration and reference facts from a codebase.
#[derive(Parser, Debug)]
#[command(name = "codekg", version, about)]
struct Cli {
    /// Codebase root directory to walk.
    root: PathBuf,

    /// Write the aggregated facts as JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log filter, e.g. "codekg=debug".
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).context("invalid --log filter")?)
        .with_writer(std::io::stderr)
        .init();

    if !cli.root.is_dir() {
        bail!("{} is not a directory", cli.root.display());
    }

    let facts = CodebaseWalker::new().walk(&cli.root);

    println!("Files:          {}", facts.files.len());
    println!("Functions:      {}", facts.functions.len());
    println!("Classes:        {}", facts.classes.len());
    println!("Variables:      {}", facts.variables.len());
    println!("Imports:        {}", facts.imports.len());
    println!("Function calls: {}", facts.calls.len());

    if let Some(path) = cli.json {
        let json = serde_json::to_string_pretty(&facts).context("serialize facts")?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

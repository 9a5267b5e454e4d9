//! Renamer CLI: replace a string in names and text contents under a directory; use --dry-run to preview.

use anyhow::Result;
use clap::Parser;
use renamer::engine::arg_parser::Cli;
use renamer::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

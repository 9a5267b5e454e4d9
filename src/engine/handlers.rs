//! CLI command handler: scan, list, confirm, then run; --dry-run prints the plan instead.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::arg_parser::Cli;
use crate::engine::tools::path_relative_to;
use crate::engine::validate::{validate_change, validate_exclusions, validate_root};
use crate::pipeline::{RunState, run_scanned, scan};
use crate::utils::{Colors, apply_file_to_opts, load_renamer_toml, setup_logging};
use crate::{RenameOpts, RunReport};

/// Settings resolved from `.renamer.toml` then CLI flags (CLI wins).
struct RunSettings {
    opts: RenameOpts,
    verbose: bool,
    assume_yes: bool,
}

fn setup_settings(cli: &Cli) -> RunSettings {
    let file = load_renamer_toml(&cli.dir);
    let mut opts = RenameOpts::default();
    let mut verbose = false;
    let mut assume_yes = false;
    if let Some(file) = &file {
        apply_file_to_opts(file, &mut opts);
        verbose = file.settings.verbose.unwrap_or(false);
        assume_yes = file.settings.assume_yes.unwrap_or(false);
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    if let Some(v) = cli.emit_bom {
        opts.emit_bom = v;
    }
    if cli.threads.is_some() {
        opts.num_threads = cli.threads;
    }
    opts.dry_run = cli.dry_run;
    let verbose = cli.verbose.unwrap_or(verbose);
    opts.progress = verbose;
    setup_logging(verbose);
    if file.is_some() {
        debug!("Loaded settings from config file in {}", cli.dir.display());
    }
    RunSettings {
        opts,
        verbose,
        assume_yes: cli.yes.unwrap_or(assume_yes),
    }
}

/// Ask on stdout, read one line from stdin. Only "Y" (any case) proceeds.
fn ask_if_sure() -> Result<bool> {
    print!("Are you sure? (Y/N): ");
    std::io::stdout().flush().context("flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(report: &RunReport) {
    info!(
        "{} | {} | {}",
        Colors::colorize(Colors::REWRITTEN, &format!("Rewritten: {}", report.rewritten.len())),
        Colors::colorize(Colors::SKIPPED, &format!("Skipped: {}", report.skipped.len())),
        Colors::colorize(Colors::RENAMED, &format!("Renamed: {}", report.renamed.len()))
    );
}

/// Scan, list what was found, confirm, then rewrite and rename.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let settings = setup_settings(cli);
    let (from, to) = cli.change_pair();
    let pair = validate_change(from, to)?;
    validate_root(&cli.dir)?;
    let exclusions = validate_exclusions(&settings.opts.exclude)?;

    info!("Searching files...");
    let mut state = RunState::new();
    let entries = scan(&cli.dir, &exclusions)
        .map_err(|e| state.abort(e))
        .with_context(|| format!("scan {}", cli.dir.display()))?;
    for entry in &entries {
        println!("{}", entry.path.display());
    }
    println!();
    println!("{} elements will be parsed.", entries.len());

    if settings.opts.dry_run {
        warn!("RUNNING IN DRY-RUN MODE. NOTHING WILL BE CHANGED.");
        let report = run_scanned(&mut state, entries, &pair, &settings.opts)?;
        for step in &report.renamed {
            let from = path_relative_to(&step.from, &cli.dir).unwrap_or_else(|| step.from.clone());
            let to = path_relative_to(&step.to, &cli.dir).unwrap_or_else(|| step.to.clone());
            println!("{} -> {}", from.display(), to.display());
        }
        info!("{} renames planned", report.renamed.len());
        return Ok(());
    }

    if !settings.assume_yes && !ask_if_sure()? {
        info!("Nothing changed.");
        return Ok(());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        cancel_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    let mut opts = settings.opts;
    opts.cancel = Some(cancel);
    if settings.verbose {
        debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    }

    info!("Renaming...");
    let report = run_scanned(&mut state, entries, &pair, &opts)
        .with_context(|| format!("rename in {}", cli.dir.display()))?;
    print_summary(&report);
    info!("Rename completed.");
    Ok(())
}

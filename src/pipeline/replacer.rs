//! Content stage over all files: queue every file, let the pool rewrite them independently,
//! and join every worker before returning.

use log::debug;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use crate::engine::progress::{create_progress_bar, flush_progress_remainder};
use crate::error::RenameError;
use crate::utils::config::{PROGRESS_UPDATE_BATCH_SIZE, WorkerThreadLimits};
use crate::utils::fd_limit::resolve_worker_count;
use crate::types::is_cancelled;
use crate::{CancelFlag, FileSystemEntry, ReplacementPair, RewriteOutcome, SkipReason};

use super::context::{RewriteContext, create_rewrite_channels};
use super::error_handler::first_failure;
use super::workers::spawn_rewrite_workers;

/// Settings for [`rewrite_all`].
#[derive(Clone, Debug, Default)]
pub struct RewriteSettings {
    pub emit_bom: bool,
    pub num_threads: Option<usize>,
    pub progress: bool,
    pub cancel: Option<CancelFlag>,
}

/// What the content stage did, in input order.
#[derive(Clone, Debug, Default)]
pub struct RewriteReport {
    pub rewritten: Vec<FileSystemEntry>,
    pub skipped: Vec<(FileSystemEntry, SkipReason)>,
}

/// Rewrite every `File` entry (directories are ignored). Returns only after all workers finished.
///
/// A failing file does not stop the others. If any failed, the failure of the earliest file in
/// `entries` order is returned; files already rewritten stay rewritten.
pub fn rewrite_all(
    entries: &[FileSystemEntry],
    pair: &ReplacementPair,
    settings: &RewriteSettings,
) -> Result<RewriteReport, RenameError> {
    let files: Vec<&FileSystemEntry> = entries.iter().filter(|e| e.is_file()).collect();
    if files.is_empty() {
        return Ok(RewriteReport::default());
    }

    let num_threads = resolve_worker_count(
        settings.num_threads,
        WorkerThreadLimits::current().all_threads,
        files.len(),
    );
    debug!(
        "Rewriting {} files with {} workers",
        files.len(),
        num_threads
    );

    let progress = settings
        .progress
        .then(|| create_progress_bar(files.len(), "Rewriting"));
    let ctx = RewriteContext {
        pair: Arc::new(pair.clone()),
        emit_bom: settings.emit_bom,
        cancel: settings.cancel.clone(),
        progress: progress.clone(),
        done: Arc::new(AtomicUsize::new(0)),
    };

    let channels = create_rewrite_channels(files.len());
    let handles = spawn_rewrite_workers(channels.job_rx, &channels.result_tx, &ctx, num_threads);
    // Dropping the last result sender closes the channel once workers exit.
    drop(channels.result_tx);

    for (idx, entry) in files.iter().enumerate() {
        if channels.job_tx.send((idx, (*entry).clone())).is_err() {
            break;
        }
    }
    drop(channels.job_tx);

    // Barrier: nothing after this line runs until every worker is done.
    let mut panicked = 0_usize;
    for h in handles {
        if h.join().is_err() {
            panicked += 1;
        }
    }
    flush_progress_remainder(progress.as_ref(), files.len(), PROGRESS_UPDATE_BATCH_SIZE);

    let mut results: Vec<_> = channels.result_rx.try_iter().collect();
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut report = RewriteReport::default();
    let mut failures = Vec::new();
    for (idx, entry, outcome) in results {
        match outcome {
            Ok(RewriteOutcome::Rewritten { .. }) => report.rewritten.push(entry),
            Ok(RewriteOutcome::Skipped(reason)) => report.skipped.push((entry, reason)),
            Err(err) => failures.push((idx, entry.path, err)),
        }
    }
    debug!(
        "Content stage done: {} rewritten, {} skipped, {} failed",
        report.rewritten.len(),
        report.skipped.len(),
        failures.len()
    );

    if let Some(err) = first_failure(failures) {
        return Err(err);
    }
    if panicked > 0 {
        return Err(RenameError::WorkerPanicked { count: panicked });
    }
    if is_cancelled(&settings.cancel) {
        return Err(RenameError::Cancelled);
    }
    Ok(report)
}

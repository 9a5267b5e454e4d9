use crossbeam_channel::{Receiver, Sender};
use log::{Level, log};
use std::thread::{self, JoinHandle};

use crate::engine::progress::report_progress_batched;
use crate::error::RenameError;
use crate::types::is_cancelled;
use crate::utils::config::PROGRESS_UPDATE_BATCH_SIZE;
use crate::{RewriteOutcome, SkipReason};

use super::content::rewrite_file;
use super::context::{RewriteContext, RewriteJob, RewriteResult};

/// Log level for one file's outcome: `Warn` for undecodable text, `Debug` otherwise.
/// Failures are logged by the error handler.
pub fn outcome_log_level(outcome: &Result<RewriteOutcome, RenameError>) -> Level {
    match outcome {
        Ok(RewriteOutcome::Skipped(SkipReason::NotUtf8)) => Level::Warn,
        _ => Level::Debug,
    }
}

/// Single rewrite worker: take files from job_rx, rewrite, report on result_tx.
/// Once cancelled, remaining jobs are drained without being touched.
fn rewrite_worker_loop(
    job_rx: Receiver<RewriteJob>,
    result_tx: Sender<RewriteResult>,
    ctx: RewriteContext,
) {
    while let Ok((idx, entry)) = job_rx.recv() {
        if is_cancelled(&ctx.cancel) {
            continue;
        }
        let outcome = rewrite_file(&entry.path, &ctx.pair, ctx.emit_bom);
        let level = outcome_log_level(&outcome);
        match &outcome {
            Ok(RewriteOutcome::Skipped(SkipReason::NotUtf8)) => {
                log!(level, "Skipped {}: not valid UTF-8", entry.path.display())
            }
            Ok(o) => log!(level, "{}: {:?}", entry.path.display(), o),
            Err(e) => log!(level, "{}: failed: {}", entry.path.display(), e),
        }
        report_progress_batched(
            ctx.progress.as_ref(),
            &ctx.done,
            PROGRESS_UPDATE_BATCH_SIZE,
        );
        if result_tx.send((idx, entry, outcome)).is_err() {
            break;
        }
    }
    drop(result_tx);
}

/// Spawn rewrite workers. Caller must drop its job sender and result sender after this so
/// workers exit and the result channel closes.
pub fn spawn_rewrite_workers(
    job_rx: Receiver<RewriteJob>,
    result_tx: &Sender<RewriteResult>,
    ctx: &RewriteContext,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|_| {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || rewrite_worker_loop(job_rx, result_tx, ctx))
        })
        .collect()
}

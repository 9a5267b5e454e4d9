//! Content-stage context: shared read-only data handed to every rewrite worker, and the channels between them.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use crate::engine::progress::ProgressBar;
use crate::error::RenameError;
use crate::{CancelFlag, FileSystemEntry, ReplacementPair, RewriteOutcome};

/// One unit of work: the file and its position in the input (for deterministic error reporting).
pub type RewriteJob = (usize, FileSystemEntry);

/// Result of one unit of work.
pub type RewriteResult = (usize, FileSystemEntry, Result<RewriteOutcome, RenameError>);

/// Shared by all workers. Nothing in here is mutated except the progress counter.
#[derive(Clone)]
pub struct RewriteContext {
    pub pair: Arc<ReplacementPair>,
    pub emit_bom: bool,
    pub cancel: Option<CancelFlag>,
    pub progress: Option<ProgressBar>,
    pub done: Arc<AtomicUsize>,
}

/// Job and result channels. Main thread gets job_tx and result_rx; workers get job_rx and result_tx.
pub struct RewriteChannels {
    pub job_tx: Sender<RewriteJob>,
    pub job_rx: Receiver<RewriteJob>,
    pub result_tx: Sender<RewriteResult>,
    pub result_rx: Receiver<RewriteResult>,
}

/// Both channels hold every job, so queueing and reporting never block.
pub fn create_rewrite_channels(job_count: usize) -> RewriteChannels {
    let cap = job_count.max(1);
    let (job_tx, job_rx) = bounded::<RewriteJob>(cap);
    let (result_tx, result_rx) = bounded::<RewriteResult>(cap);
    RewriteChannels {
        job_tx,
        job_rx,
        result_tx,
        result_rx,
    }
}

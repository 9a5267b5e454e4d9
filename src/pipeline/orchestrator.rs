use log::debug;
use std::path::Path;

use crate::error::RenameError;
use crate::{
    EntryKind, ExclusionSet, FileSystemEntry, RenameOpts, RenameStep, ReplacementPair, RunPhase,
    RunReport,
};

use super::rename::{execute_steps, plan_renames};
use super::replacer::{RewriteSettings, rewrite_all};
use super::walk::scan;

/// Tracks the phase of one run. Phases only move forward.
#[derive(Debug)]
pub struct RunState {
    phase: RunPhase,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Scanning,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Move to `next`. Returns false (and stays put) for backwards moves or moves out of a terminal phase.
    pub fn advance(&mut self, next: RunPhase) -> bool {
        if self.phase.is_terminal() || next <= self.phase {
            return false;
        }
        debug!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        true
    }

    /// Record `err` as the end of the run and hand it back.
    pub fn abort(&mut self, err: RenameError) -> RenameError {
        debug!("Aborted during {:?}: {}", self.phase, err);
        self.advance(RunPhase::Aborted);
        err
    }
}

fn steps_of(steps: &[RenameStep], kind: EntryKind) -> Vec<RenameStep> {
    steps.iter().filter(|s| s.kind == kind).cloned().collect()
}

/// Full run: scan -> rewrite contents -> rename files -> rename directories.
///
/// The root itself is never renamed. With `opts.dry_run`, scans and plans only:
/// `report.renamed` holds the planned steps.
pub fn run(root: &Path, pair: &ReplacementPair, opts: &RenameOpts) -> Result<RunReport, RenameError> {
    let mut state = RunState::new();
    let exclusions = ExclusionSet::new(&opts.exclude);
    let scanned = scan(root, &exclusions).map_err(|e| state.abort(e))?;
    run_scanned(&mut state, scanned, pair, opts)
}

/// Everything after the scan, for callers that scanned first (e.g. to confirm with the user).
/// Content rewriting is fully joined before the first rename.
pub fn run_scanned(
    state: &mut RunState,
    scanned: Vec<FileSystemEntry>,
    pair: &ReplacementPair,
    opts: &RenameOpts,
) -> Result<RunReport, RenameError> {
    let mut report = RunReport {
        dry_run: opts.dry_run,
        ..RunReport::default()
    };

    if opts.dry_run {
        report.renamed = plan_renames(&scanned, pair);
        report.scanned = scanned;
        state.advance(RunPhase::Done);
        return Ok(report);
    }

    state.advance(RunPhase::ContentRewriting);
    let settings = RewriteSettings {
        emit_bom: opts.emit_bom,
        num_threads: opts.num_threads,
        progress: opts.progress,
        cancel: opts.cancel.clone(),
    };
    let rewritten = rewrite_all(&scanned, pair, &settings).map_err(|e| state.abort(e))?;
    report.rewritten = rewritten.rewritten;
    report.skipped = rewritten.skipped;

    let plan = plan_renames(&scanned, pair);

    state.advance(RunPhase::RenamingFiles);
    let files = steps_of(&plan, EntryKind::File);
    let mut renamed = execute_steps(&files, &opts.cancel).map_err(|e| state.abort(e))?;

    state.advance(RunPhase::RenamingDirectories);
    let dirs = steps_of(&plan, EntryKind::Directory);
    renamed.extend(execute_steps(&dirs, &opts.cancel).map_err(|e| state.abort(e))?);

    state.advance(RunPhase::Done);
    report.renamed = renamed;
    report.scanned = scanned;
    Ok(report)
}
